//! Shogi and 5×5 minishogi.
//!
//! Both sides draw from the same role vocabulary as chess plus `Lance`,
//! `Silver` and `Gold`; promotion flips a piece's `promoted` flag instead of
//! changing its role, and captured pieces join the capturer's pool
//! unpromoted.

use std::{fmt, str::FromStr};

use crate::{
    board::Board,
    color::{ByColor, Color},
    fen::{FromSetup, Setup},
    m::Move,
    point::Point,
    pool::Pool,
    position::{king_safe_after, Position, PositionError, Promotions},
    role::Role,
    san::{ParseSanError, SanError},
    types::Piece,
};

const SHOGI_BACK: [Role; 9] = [
    Role::Lance,
    Role::Knight,
    Role::Silver,
    Role::Gold,
    Role::King,
    Role::Gold,
    Role::Silver,
    Role::Knight,
    Role::Lance,
];

fn promotable(role: Role) -> bool {
    matches!(
        role,
        Role::Pawn | Role::Lance | Role::Knight | Role::Silver | Role::Bishop | Role::Rook
    )
}

/// Board, turn, pools and promotion-zone depth shared by the shogi-family
/// variants.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct ShogiCore {
    pub board: Board,
    pub turn: Color,
    pub pools: ByColor<Pool>,
    pub zone: i8,
}

impl ShogiCore {
    pub fn standard() -> ShogiCore {
        let mut board = Board::empty(9, 9);
        for (file, &role) in SHOGI_BACK.iter().enumerate() {
            let file = file as i8;
            board.set(Point::new(file, 0), Some(role.of(Color::White)));
            board.set(Point::new(file, 8), Some(role.of(Color::Black)));
        }
        board.set(Point::new(1, 1), Some(Role::Bishop.of(Color::White)));
        board.set(Point::new(7, 1), Some(Role::Rook.of(Color::White)));
        board.set(Point::new(7, 7), Some(Role::Bishop.of(Color::Black)));
        board.set(Point::new(1, 7), Some(Role::Rook.of(Color::Black)));
        for file in 0..9 {
            board.set(Point::new(file, 2), Some(Color::White.pawn()));
            board.set(Point::new(file, 6), Some(Color::Black.pawn()));
        }
        ShogiCore {
            board,
            turn: Color::White,
            pools: ByColor::default(),
            zone: 3,
        }
    }

    pub fn mini() -> ShogiCore {
        let mut board = Board::empty(5, 5);
        let back = [Role::King, Role::Gold, Role::Silver, Role::Bishop, Role::Rook];
        for (file, &role) in back.iter().enumerate() {
            let file = file as i8;
            board.set(Point::new(file, 0), Some(role.of(Color::White)));
            board.set(Point::new(4 - file, 4), Some(role.of(Color::Black)));
        }
        board.set(Point::new(0, 1), Some(Color::White.pawn()));
        board.set(Point::new(4, 3), Some(Color::Black.pawn()));
        ShogiCore {
            board,
            turn: Color::White,
            pools: ByColor::default(),
            zone: 1,
        }
    }

    pub fn in_zone(&self, color: Color, rank: i8) -> bool {
        match color {
            Color::White => rank >= self.board.height() - self.zone,
            Color::Black => rank < self.zone,
        }
    }

    /// Whether an unpromoted piece of this role could never move again from
    /// `rank` (and so must promote when moving there, or may not be dropped
    /// there).
    pub fn stuck(&self, role: Role, color: Color, rank: i8) -> bool {
        let last = color.fold(self.board.height() - 1, 0);
        match role {
            Role::Pawn | Role::Lance => rank == last,
            Role::Knight => (rank - last).abs() <= 1,
            _ => false,
        }
    }

    pub fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        if from == to {
            return false;
        }
        let fwd = piece.color.forward();
        let df = to.file - from.file;
        let dr = to.rank - from.rank;
        let gold_step = (df.abs() + dr.abs() == 1) || (df.abs() == 1 && dr == fwd);
        match (piece.role, piece.promoted) {
            (Role::Pawn, false) => df == 0 && dr == fwd,
            (Role::Lance, false) => {
                let path = self.board.path(from, to);
                dr.signum() == fwd && df == 0 && path.clear
            }
            (Role::Knight, false) => df.abs() == 1 && dr == 2 * fwd,
            (Role::Silver, false) => (df.abs() == 1 && dr.abs() == 1) || (df == 0 && dr == fwd),
            (Role::Gold, _)
            | (Role::Pawn, true)
            | (Role::Lance, true)
            | (Role::Knight, true)
            | (Role::Silver, true) => gold_step,
            (Role::King, _) => df.abs() <= 1 && dr.abs() <= 1,
            (Role::Bishop, promoted) => {
                let path = self.board.path(from, to);
                (path.diagonal() && path.clear)
                    || (promoted && df.abs() <= 1 && dr.abs() <= 1)
            }
            (Role::Rook, promoted) => {
                let path = self.board.path(from, to);
                (path.parallel() && path.clear)
                    || (promoted && df.abs() <= 1 && dr.abs() <= 1)
            }
            (Role::Queen, _) => false,
        }
    }

    pub fn pseudo_legal(&self, m: Move) -> bool {
        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if !self.board.contains(from) || !self.board.contains(to) {
                    return false;
                }
                let Some(piece) = self.board.piece_at(from) else {
                    return false;
                };
                if piece.color != self.turn || piece.role != role {
                    return false;
                }
                let occupant = self.board.piece_at(to);
                if occupant.is_some_and(|o| o.color == piece.color) {
                    return false;
                }
                if occupant.map(|o| o.role) != capture {
                    return false;
                }
                let promotion_ok = match promotion {
                    None => {
                        piece.promoted || !self.stuck(role, piece.color, to.rank)
                    }
                    Some(r) => {
                        r == piece.role
                            && !piece.promoted
                            && promotable(role)
                            && (self.in_zone(piece.color, from.rank)
                                || self.in_zone(piece.color, to.rank))
                    }
                };
                promotion_ok && self.attacks(piece, from, to)
            }
            Move::Drop { role, to } => self.drop_pseudo_legal(role, to),
            Move::EnPassant { .. } | Move::Castle(_) => false,
        }
    }

    fn drop_pseudo_legal(&self, role: Role, to: Point) -> bool {
        if !self.board.contains(to)
            || self.board.piece_at(to).is_some()
            || self.pools.by_color(self.turn).count(role) == 0
            || self.stuck(role, self.turn, to.rank)
        {
            return false;
        }
        if role == Role::Pawn {
            // no two unpromoted pawns of one color on a file
            let twin = (0..self.board.height()).any(|rank| {
                self.board
                    .piece_at(Point::new(to.file, rank))
                    .is_some_and(|p| {
                        p.color == self.turn && p.role == Role::Pawn && !p.promoted
                    })
            });
            if twin {
                return false;
            }
        }
        true
    }

    pub fn apply(&mut self, m: Move) {
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => {
                let Some(mut piece) = self.board.take(from) else {
                    debug_assert!(false, "played {m} with empty origin");
                    return;
                };
                if let Some(captured) = self.board.take(to) {
                    // captured pieces revert to their base role
                    self.pools.by_color_mut(self.turn).add(captured.role);
                }
                if promotion.is_some() {
                    piece.promoted = true;
                }
                self.board.set(to, Some(piece));
            }
            Move::Drop { role, to } => {
                let taken = self.pools.by_color_mut(self.turn).take(role);
                debug_assert!(taken, "dropped {role:?} missing from the pool");
                self.board.set(to, Some(role.of(self.turn)));
            }
            Move::EnPassant { .. } | Move::Castle(_) => {
                debug_assert!(false, "{m} is not a shogi move");
            }
        }
        self.turn = !self.turn;
    }

    fn from_setup(setup: &Setup, size: i8, zone: i8) -> Result<ShogiCore, PositionError> {
        if setup.board.width() != size || setup.board.height() != size {
            return Err(PositionError::WrongBoardSize);
        }
        if !setup.castling.is_empty() {
            return Err(PositionError::BadCastlingRights);
        }
        if setup.ep_square.is_some() {
            return Err(PositionError::BadEpSquare);
        }
        let pools = setup.pools.clone().unwrap_or_default();
        for color in Color::ALL {
            if pools.by_color(color).count(Role::King) > 0 {
                return Err(PositionError::UnsupportedRole);
            }
        }
        let core = ShogiCore {
            board: setup.board.clone(),
            turn: setup.turn,
            pools,
            zone,
        };
        for color in Color::ALL {
            match core.board.pieces().filter(|&(_, p)| p == color.king()).count() {
                0 => return Err(PositionError::MissingKing),
                1 => (),
                _ => return Err(PositionError::TooManyKings),
            }
        }
        for (p, piece) in core.board.pieces() {
            if piece.role == Role::Queen {
                return Err(PositionError::UnsupportedRole);
            }
            if !piece.promoted && core.stuck(piece.role, piece.color, p.rank) {
                return Err(PositionError::PawnOnBackrank);
            }
        }
        Ok(core)
    }

    pub fn promotions(&self, from: Point, to: Point) -> Promotions {
        let mut choices = Promotions::new();
        if self.board.contains(from) && self.board.contains(to) {
            if let Some(piece) = self.board.piece_at(from) {
                if piece.color == self.turn
                    && !piece.promoted
                    && promotable(piece.role)
                    && (self.in_zone(piece.color, from.rank)
                        || self.in_zone(piece.color, to.rank))
                {
                    if !self.stuck(piece.role, piece.color, to.rank) {
                        choices.push(None);
                    }
                    choices.push(Some(piece.role));
                    return choices;
                }
            }
        }
        choices.push(None);
        choices
    }
}

/// Refuses drops of a pawn that would deliver an immediate checkmate
/// (uchifuzume). Escape moves are probed with king safety only, so the check
/// cannot recurse.
fn pawn_drop_mates<P: Position>(pos: &P, m: Move) -> bool {
    let mut scratch = pos.clone();
    scratch.play_unchecked(m);
    let defender = scratch.turn();
    if !scratch.is_check(defender) {
        return false;
    }
    for (from, piece) in scratch.board().pieces() {
        if piece.color != defender {
            continue;
        }
        for to in scratch.board().points() {
            for promotion in scratch.promotions(from, to) {
                if let Some(reply) = scratch.normal_move(from, to, promotion) {
                    if scratch.pseudo_legal(reply) && king_safe_after(&scratch, reply) {
                        return false;
                    }
                }
            }
        }
    }
    for role in scratch.pool(defender).roles() {
        for to in scratch.board().points() {
            if scratch.board().piece_at(to).is_none() {
                let reply = Move::Drop { role, to };
                if scratch.pseudo_legal(reply) && king_safe_after(&scratch, reply) {
                    return false;
                }
            }
        }
    }
    true
}

fn shogi_legal<P: Position>(pos: &P, m: Move) -> bool {
    if !pos.pseudo_legal(m) || !king_safe_after(pos, m) {
        return false;
    }
    if let Move::Drop {
        role: Role::Pawn, ..
    } = m
    {
        if pawn_drop_mates(pos, m) {
            return false;
        }
    }
    true
}

macro_rules! shogi_position_impl {
    ($ty:ident) => {
        impl Position for $ty {
            fn board(&self) -> &Board {
                &self.0.board
            }

            fn turn(&self) -> Color {
                self.0.turn
            }

            fn pool(&self, color: Color) -> &Pool {
                self.0.pools.by_color(color)
            }

            fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
                self.0.attacks(piece, from, to)
            }

            fn pseudo_legal(&self, m: Move) -> bool {
                self.0.pseudo_legal(m)
            }

            fn legal(&self, m: Move) -> bool {
                shogi_legal(self, m)
            }

            fn play_unchecked(&mut self, m: Move) {
                self.0.apply(m);
            }

            fn promotions(&self, from: Point, to: Point) -> Promotions {
                self.0.promotions(from, to)
            }
        }
    };
}

/// Standard 9×9 shogi.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Shogi(pub(crate) ShogiCore);

impl Default for Shogi {
    fn default() -> Shogi {
        Shogi(ShogiCore::standard())
    }
}

shogi_position_impl!(Shogi);

impl FromSetup for Shogi {
    fn from_setup(setup: &Setup) -> Result<Shogi, PositionError> {
        let pos = Shogi(ShogiCore::from_setup(setup, 9, 3)?);
        if pos.is_check(!pos.turn()) {
            return Err(PositionError::OppositeCheck);
        }
        Ok(pos)
    }
}

/// 5×5 minishogi: no knights or lances, a one-rank promotion zone.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MiniShogi(pub(crate) ShogiCore);

impl Default for MiniShogi {
    fn default() -> MiniShogi {
        MiniShogi(ShogiCore::mini())
    }
}

shogi_position_impl!(MiniShogi);

impl FromSetup for MiniShogi {
    fn from_setup(setup: &Setup) -> Result<MiniShogi, PositionError> {
        let pos = MiniShogi(ShogiCore::from_setup(setup, 5, 1)?);
        if pos.is_check(!pos.turn()) {
            return Err(PositionError::OppositeCheck);
        }
        Ok(pos)
    }
}

/// A move in shogi notation:
/// `[+]<Role>[<origin>]{-|x|*}<destination>[+|=]`.
///
/// Squares are written `<file number><rank letter>` with files counted from
/// the right and ranks lettered from the top, e.g. the white center pawn
/// push is `P-5f`. The origin square appears in full whenever another piece
/// of the same kind could reach the destination; there is no file/rank
/// disambiguation ladder in shogi notation.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct ShogiSan {
    /// `+` prefix: the moving piece is already promoted.
    pub promoted: bool,
    pub role: Role,
    pub from: Option<Point>,
    pub drop: bool,
    pub capture: bool,
    pub to: Point,
    /// Trailing `+` (promotes) or `=` (stays) when the move touches the
    /// promotion zone with a promotable piece.
    pub promotion: Option<bool>,
}

fn write_square(out: &mut String, p: Point, width: i8, height: i8) {
    out.push((b'0' + (width - p.file) as u8) as char);
    out.push((b'a' + (height - 1 - p.rank) as u8) as char);
}

fn parse_square(s: &[u8], width: i8, height: i8) -> Result<Point, ParseSanError> {
    if s.len() != 2 {
        return Err(ParseSanError);
    }
    let file_num: i8 = btoi::btoi(&s[..1]).map_err(|_| ParseSanError)?;
    let rank_idx = match s[1] {
        ch @ b'a'..=b'z' => (ch - b'a') as i8,
        _ => return Err(ParseSanError),
    };
    let p = Point::new(width - file_num, height - 1 - rank_idx);
    if p.file < 0 || p.file >= width || p.rank < 0 || p.rank >= height {
        return Err(ParseSanError);
    }
    Ok(p)
}

impl ShogiSan {
    pub fn from_ascii(s: &[u8], width: i8, height: i8) -> Result<ShogiSan, ParseSanError> {
        let (promoted, s) = match s.split_first() {
            Some((b'+', rest)) => (true, rest),
            _ => (false, s),
        };
        let (&letter, s) = s.split_first().ok_or(ParseSanError)?;
        if !letter.is_ascii_uppercase() {
            return Err(ParseSanError);
        }
        let role = Role::from_char(char::from(letter)).ok_or(ParseSanError)?;
        let (promotion, s) = match s.split_last() {
            Some((b'+', rest)) => (Some(true), rest),
            Some((b'=', rest)) => (Some(false), rest),
            _ => (None, s),
        };
        let (from, separator, dest) = match s.len() {
            3 => (None, s[0], &s[1..]),
            5 => (Some(parse_square(&s[..2], width, height)?), s[2], &s[3..]),
            _ => return Err(ParseSanError),
        };
        let to = parse_square(dest, width, height)?;
        let (drop, capture) = match separator {
            b'*' => (true, false),
            b'x' => (false, true),
            b'-' => (false, false),
            _ => return Err(ParseSanError),
        };
        if drop && (from.is_some() || promoted || promotion.is_some()) {
            return Err(ParseSanError);
        }
        Ok(ShogiSan {
            promoted,
            role,
            from,
            drop,
            capture,
            to,
            promotion,
        })
    }

    pub fn write(&self, width: i8, height: i8) -> String {
        let mut out = String::new();
        if self.promoted {
            out.push('+');
        }
        out.push(self.role.upper_char());
        if let Some(from) = self.from {
            write_square(&mut out, from, width, height);
        }
        out.push(if self.drop {
            '*'
        } else if self.capture {
            'x'
        } else {
            '-'
        });
        write_square(&mut out, self.to, width, height);
        if let Some(promotes) = self.promotion {
            out.push(if promotes { '+' } else { '=' });
        }
        out
    }

    /// Converts a legal move to shogi notation, qualifying the origin square
    /// whenever another identical piece could also reach the destination.
    pub fn from_move<P: Position>(pos: &P, m: Move) -> ShogiSan {
        match m {
            Move::Drop { role, to } => ShogiSan {
                promoted: false,
                role,
                from: None,
                drop: true,
                capture: false,
                to,
                promotion: None,
            },
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let piece = pos
                    .board()
                    .piece_at(from)
                    .unwrap_or_else(|| role.of(pos.turn()));
                let ambiguous = pos.board().pieces().any(|(q, other)| {
                    q != from
                        && other == piece
                        && [None, Some(role)].into_iter().any(|promo| {
                            pos.normal_move(q, to, promo)
                                .is_some_and(|alt| pos.legal(alt))
                        })
                });
                // a marker is written whenever the mover had a promotion
                // choice, so a plain destination stays unambiguous
                let could_promote = pos
                    .promotions(from, to)
                    .iter()
                    .any(|choice| choice.is_some());
                let promotion_marker = if promotion.is_some() {
                    Some(true)
                } else if could_promote {
                    Some(false)
                } else {
                    None
                };
                ShogiSan {
                    promoted: piece.promoted,
                    role,
                    from: ambiguous.then_some(from),
                    drop: false,
                    capture: capture.is_some(),
                    to,
                    promotion: promotion_marker,
                }
            }
            Move::EnPassant { .. } | Move::Castle(_) => ShogiSan {
                promoted: false,
                role: m.role(),
                from: None,
                drop: false,
                capture: false,
                to: m.to().unwrap_or(Point::new(0, 0)),
                promotion: None,
            },
        }
    }

    /// Resolves the notation against a position.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if no unique matching legal move exists.
    pub fn to_move<P: Position>(&self, pos: &P) -> Result<Move, SanError> {
        if self.drop {
            let m = Move::Drop {
                role: self.role,
                to: self.to,
            };
            return if pos.legal(m) {
                Ok(m)
            } else {
                Err(SanError::Illegal)
            };
        }
        let promotion = (self.promotion == Some(true)).then_some(self.role);
        let candidates: Vec<Move> = match self.from {
            Some(from) => pos
                .normal_move(from, self.to, promotion)
                .into_iter()
                .collect(),
            None => pos
                .board()
                .pieces()
                .filter(|&(_, piece)| {
                    piece.color == pos.turn()
                        && piece.role == self.role
                        && piece.promoted == self.promoted
                })
                .filter_map(|(from, _)| pos.normal_move(from, self.to, promotion))
                .collect(),
        };
        let mut resolved = None;
        for m in candidates {
            if m.is_capture() != self.capture || !pos.legal(m) {
                continue;
            }
            if resolved.is_some() {
                return Err(SanError::Ambiguous);
            }
            resolved = Some(m);
        }
        resolved.ok_or(SanError::Illegal)
    }
}

impl fmt::Display for ShogiSan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write(9, 9))
    }
}

impl FromStr for ShogiSan {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<ShogiSan, ParseSanError> {
        ShogiSan::from_ascii(s.as_bytes(), 9, 9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(pos: Shogi, san: &str) -> Shogi {
        let m = san
            .parse::<ShogiSan>()
            .expect("valid notation")
            .to_move(&pos)
            .expect("unique legal move");
        pos.play(m).expect("legal move")
    }

    #[test]
    fn test_opening_pawn_push() {
        let pos = Shogi::default();
        let m = pos
            .normal_move(
                Point::new(4, 2),
                Point::new(4, 3),
                None,
            )
            .expect("pawn move resolves");
        assert!(pos.legal(m));
        assert_eq!(ShogiSan::from_move(&pos, m).to_string(), "P-5f");
    }

    #[test]
    fn test_notation_round_trip() {
        let pos = Shogi::default();
        for san in ["P-5f", "P-7f", "S-6h", "R-5h"] {
            let parsed = san.parse::<ShogiSan>().expect("valid notation");
            let m = parsed.to_move(&pos).expect("unique legal move");
            assert_eq!(ShogiSan::from_move(&pos, m).to_string(), *san);
        }
    }

    #[test]
    fn test_gold_disambiguation_uses_full_origin() {
        // both golds can reach 5h from the starting position
        let pos = Shogi::default();
        let left_gold = pos
            .normal_move(Point::new(3, 0), Point::new(4, 1), None)
            .expect("gold move resolves");
        assert!(pos.legal(left_gold));
        let san = ShogiSan::from_move(&pos, left_gold);
        assert_eq!(san.to_string(), "G6i-5h");
        assert_eq!(san.to_move(&pos).expect("resolvable"), left_gold);
        assert_eq!(
            "G-5h".parse::<ShogiSan>().expect("valid").to_move(&pos),
            Err(SanError::Ambiguous)
        );
    }

    #[test]
    fn test_forced_promotion_when_stuck() {
        let mut core = ShogiCore::standard();
        core.board = Board::empty(9, 9);
        core.board.set(Point::new(4, 0), Some(Color::White.king()));
        core.board.set(Point::new(4, 8), Some(Color::Black.king()));
        core.board.set(Point::new(0, 7), Some(Color::White.pawn()));
        let pos = Shogi(core);
        let push = Move::Normal {
            role: Role::Pawn,
            from: Point::new(0, 7),
            capture: None,
            to: Point::new(0, 8),
            promotion: None,
        };
        assert!(!pos.legal(push), "a pawn may not stay stuck on the last rank");
        let promote = Move::Normal {
            role: Role::Pawn,
            from: Point::new(0, 7),
            capture: None,
            to: Point::new(0, 8),
            promotion: Some(Role::Pawn),
        };
        assert_eq!(pos.promotions(Point::new(0, 7), Point::new(0, 8)).as_slice(), [Some(Role::Pawn)]);
        let pos = pos.play(promote).expect("forced promotion is legal");
        let pawn = pos
            .board()
            .piece_at(Point::new(0, 8))
            .expect("pawn arrived");
        assert!(pawn.promoted);
    }

    #[test]
    fn test_capture_joins_pool_and_is_droppable() {
        let pos = play(Shogi::default(), "P-7f");
        let pos = play(pos, "P-3d");
        // the white bishop trades itself for the black one
        let pos = play(pos, "Bx2b");
        assert_eq!(pos.pool(Color::White).count(Role::Bishop), 1);
        let pos = play(pos, "Sx2b");
        assert_eq!(pos.pool(Color::Black).count(Role::Bishop), 1);
        assert!(pos.droppable(Role::Bishop));
    }

    #[test]
    fn test_pawn_drop_file_restriction_direct() {
        let mut core = ShogiCore::standard();
        core.pools.by_color_mut(Color::White).add(Role::Pawn);
        let pos = Shogi(core);
        // every file already has an unpromoted white pawn
        for file in 0..9 {
            assert!(!pos.legal(Move::Drop {
                role: Role::Pawn,
                to: Point::new(file, 4),
            }));
        }
    }

    #[test]
    fn test_pawn_drop_mate_is_refused() {
        // black king cornered on 1a (file 8, rank 8); a white pawn dropped
        // on 1b mates immediately and must be refused
        let mut core = ShogiCore::standard();
        core.board = Board::empty(9, 9);
        core.board.set(Point::new(8, 8), Some(Color::Black.king()));
        core.board.set(Point::new(4, 0), Some(Color::White.king()));
        // the gold covers both flight squares, the lance defends the pawn
        core.board.set(Point::new(6, 7), Some(Role::Gold.of(Color::White)));
        core.board.set(Point::new(8, 6), Some(Role::Lance.of(Color::White)));
        core.pools.by_color_mut(Color::White).add(Role::Pawn);
        let pos = Shogi(core);
        let drop = Move::Drop {
            role: Role::Pawn,
            to: Point::new(8, 7),
        };
        assert!(pos.pseudo_legal(drop));
        assert!(!pos.legal(drop), "pawn drop checkmate is prohibited");
    }

    #[test]
    fn test_minishogi_setup() {
        let pos = MiniShogi::default();
        assert_eq!(pos.board().width(), 5);
        assert_eq!(
            pos.board().piece_at(Point::new(0, 0)),
            Some(Color::White.king())
        );
        assert_eq!(
            pos.board().piece_at(Point::new(4, 4)),
            Some(Color::Black.king())
        );
        assert!(!pos.legal_moves().is_empty());
    }
}
