//! Orthodox chess and Gardner 5×5 minichess.

use crate::{
    board::Board,
    color::Color,
    fen::{FromSetup, Setup},
    m::Move,
    point::Point,
    position::{king_safe_after, Position, PositionError, Promotions},
    role::Role,
    types::{CastlingRights, CastlingSide, Piece},
};

/// Rule knobs distinguishing the chess-family variants that share this
/// module's movement core.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ChessRules {
    pub double_step: bool,
    pub castling: bool,
    /// Mark promoted pieces on the board (crazyhouse: they go back to the
    /// pool as pawns).
    pub track_promoted: bool,
}

pub(crate) const STANDARD_RULES: ChessRules = ChessRules {
    double_step: true,
    castling: true,
    track_promoted: false,
};

const GARDNER_RULES: ChessRules = ChessRules {
    double_step: false,
    castling: false,
    track_promoted: false,
};

const CHESS_ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Board, turn and move rights shared by the chess-family variants.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub(crate) struct ChessCore {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    pub ep_square: Option<Point>,
}

impl ChessCore {
    pub fn standard() -> ChessCore {
        let mut board = Board::empty(8, 8);
        let back = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        fill_back_ranks(&mut board, &back);
        ChessCore {
            board,
            turn: Color::White,
            castling: CastlingRights::all(),
            ep_square: None,
        }
    }

    pub fn gardner() -> ChessCore {
        let mut board = Board::empty(5, 5);
        let back = [Role::Rook, Role::Knight, Role::Bishop, Role::Queen, Role::King];
        fill_back_ranks(&mut board, &back);
        ChessCore {
            board,
            turn: Color::White,
            castling: CastlingRights::empty(),
            ep_square: None,
        }
    }

    fn back_rank(&self, color: Color) -> i8 {
        color.fold(0, self.board.height() - 1)
    }

    fn promotion_rank(&self, color: Color) -> i8 {
        self.back_rank(!color)
    }

    fn pawn_rank(&self, color: Color) -> i8 {
        color.fold(1, self.board.height() - 2)
    }

    fn king_home(&self, color: Color) -> Point {
        Point::new(4, self.back_rank(color))
    }

    fn rook_home(&self, color: Color, side: CastlingSide) -> Point {
        Point::new(
            side.is_king_side().then(|| self.board.width() - 1).unwrap_or(0),
            self.back_rank(color),
        )
    }

    pub fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        if from == to {
            return false;
        }
        let df = (to.file - from.file).abs();
        let dr = to.rank - from.rank;
        match piece.role {
            Role::Pawn => dr == piece.color.forward() && df == 1,
            Role::Knight => df * dr.abs() == 2,
            Role::King => df <= 1 && dr.abs() <= 1,
            Role::Bishop => {
                let path = self.board.path(from, to);
                path.diagonal() && path.clear
            }
            Role::Rook => {
                let path = self.board.path(from, to);
                path.parallel() && path.clear
            }
            Role::Queen => {
                let path = self.board.path(from, to);
                path.valid() && path.clear
            }
            _ => false,
        }
    }

    pub fn pseudo_legal(&self, m: Move, rules: &ChessRules) -> bool {
        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if !self.board.contains(from) || !self.board.contains(to) || from == to {
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
                if role == Role::Pawn && to.rank == self.promotion_rank(piece.color) {
                    if !matches!(
                        promotion,
                        Some(Role::Knight | Role::Bishop | Role::Rook | Role::Queen)
                    ) {
                        return false;
                    }
                } else if promotion.is_some() {
                    return false;
                }
                if role == Role::Pawn {
                    let fwd = piece.color.forward();
                    if occupant.is_some() {
                        to.rank - from.rank == fwd && (to.file - from.file).abs() == 1
                    } else if to.file == from.file {
                        if to.rank - from.rank == fwd {
                            true
                        } else if rules.double_step
                            && to.rank - from.rank == 2 * fwd
                            && from.rank == self.pawn_rank(piece.color)
                        {
                            self.board.piece_at(from.offset(0, fwd)).is_none()
                        } else {
                            false
                        }
                    } else {
                        false
                    }
                } else {
                    self.attacks(piece, from, to)
                }
            }
            Move::EnPassant { from, to } => {
                if !self.board.contains(from) || !self.board.contains(to) {
                    return false;
                }
                let Some(piece) = self.board.piece_at(from) else {
                    return false;
                };
                piece.role == Role::Pawn
                    && piece.color == self.turn
                    && self.ep_square == Some(to)
                    && to.rank - from.rank == piece.color.forward()
                    && (to.file - from.file).abs() == 1
                    && self.board.piece_at(to).is_none()
                    && self
                        .board
                        .piece_at(Point::new(to.file, from.rank))
                        .is_some_and(|c| c.role == Role::Pawn && c.color != self.turn)
            }
            Move::Castle(side) => {
                if !rules.castling || !self.castling.has(self.turn, side) {
                    return false;
                }
                let king = self.king_home(self.turn);
                let rook = self.rook_home(self.turn, side);
                self.board.piece_at(king) == Some(self.turn.king())
                    && self.board.piece_at(rook) == Some(Role::Rook.of(self.turn))
                    && self.board.path(king, rook).clear
            }
            Move::Drop { .. } => false,
        }
    }

    /// Squares the castling king starts on and passes over. The landing
    /// square is covered by the king-safety simulation.
    pub fn castle_transit(&self, side: CastlingSide) -> [Point; 2] {
        let king = self.king_home(self.turn);
        [king, king.offset(side.is_king_side().then_some(1).unwrap_or(-1), 0)]
    }

    pub fn promotions(&self, from: Point, to: Point) -> Promotions {
        let mut choices = Promotions::new();
        if self.board.contains(from)
            && self.board.contains(to)
            && self
                .board
                .piece_at(from)
                .is_some_and(|piece| {
                    piece.role == Role::Pawn
                        && piece.color == self.turn
                        && to.rank == self.promotion_rank(piece.color)
                })
        {
            choices.extend([
                Some(Role::Queen),
                Some(Role::Rook),
                Some(Role::Bishop),
                Some(Role::Knight),
            ]);
        } else {
            choices.push(None);
        }
        choices
    }

    /// Applies a board move and returns the captured piece, if any.
    /// Drops are the pool-variant's business, never the core's.
    pub fn apply(&mut self, m: Move, rules: &ChessRules) -> Option<Piece> {
        let captured = match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => {
                let Some(mut piece) = self.board.take(from) else {
                    debug_assert!(false, "played {m} with empty origin");
                    return None;
                };
                let captured = self.board.take(to);
                if piece.role == Role::King {
                    self.castling.discard_color(piece.color);
                }
                if piece.role == Role::Rook {
                    for side in CastlingSide::ALL {
                        if from == self.rook_home(piece.color, side) {
                            self.castling.discard(piece.color, side);
                        }
                    }
                }
                if captured.is_some_and(|c| c.role == Role::Rook) {
                    for side in CastlingSide::ALL {
                        if to == self.rook_home(!piece.color, side) {
                            self.castling.discard(!piece.color, side);
                        }
                    }
                }
                self.ep_square = (piece.role == Role::Pawn
                    && (to.rank - from.rank).abs() == 2)
                    .then(|| Point::new(from.file, (from.rank + to.rank) / 2));
                if let Some(role) = promotion {
                    piece.role = role;
                    piece.promoted = rules.track_promoted;
                }
                self.board.set(to, Some(piece));
                captured
            }
            Move::EnPassant { from, to } => {
                let piece = self.board.take(from);
                let captured = self.board.take(Point::new(to.file, from.rank));
                self.board.set(to, piece);
                self.ep_square = None;
                captured
            }
            Move::Castle(side) => {
                let rank = self.back_rank(self.turn);
                let (king_to, rook_from, rook_to) = match side {
                    CastlingSide::KingSide => (6, self.board.width() - 1, 5),
                    CastlingSide::QueenSide => (2, 0, 3),
                };
                let king = self.board.take(self.king_home(self.turn));
                let rook = self.board.take(Point::new(rook_from, rank));
                self.board.set(Point::new(king_to, rank), king);
                self.board.set(Point::new(rook_to, rank), rook);
                self.castling.discard_color(self.turn);
                self.ep_square = None;
                None
            }
            Move::Drop { .. } => {
                debug_assert!(false, "drop passed to the chess core");
                None
            }
        };
        self.turn = !self.turn;
        captured
    }

    /// Validates a parsed [`Setup`] against this module's invariants.
    pub fn from_setup(
        setup: &Setup,
        width: i8,
        height: i8,
        rules: &ChessRules,
    ) -> Result<ChessCore, PositionError> {
        let board = &setup.board;
        if board.width() != width || board.height() != height {
            return Err(PositionError::WrongBoardSize);
        }
        for color in Color::ALL {
            match board.pieces().filter(|(_, p)| *p == color.king()).count() {
                0 => return Err(PositionError::MissingKing),
                1 => (),
                _ => return Err(PositionError::TooManyKings),
            }
        }
        for (p, piece) in board.pieces() {
            if !CHESS_ROLES.contains(&piece.role) {
                return Err(PositionError::UnsupportedRole);
            }
            if piece.role == Role::Pawn && (p.rank == 0 || p.rank == height - 1) {
                return Err(PositionError::PawnOnBackrank);
            }
        }
        let core = ChessCore {
            board: setup.board.clone(),
            turn: setup.turn,
            castling: setup.castling,
            ep_square: setup.ep_square,
        };
        if !rules.castling && !core.castling.is_empty() {
            return Err(PositionError::BadCastlingRights);
        }
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if core.castling.has(color, side)
                    && (board.piece_at(core.king_home(color)) != Some(color.king())
                        || board.piece_at(core.rook_home(color, side))
                            != Some(Role::Rook.of(color)))
                {
                    return Err(PositionError::BadCastlingRights);
                }
            }
        }
        if let Some(ep) = core.ep_square {
            let mover = !core.turn;
            let pawn = ep.offset(0, mover.forward());
            let origin = ep.offset(0, -mover.forward());
            let valid = board.contains(ep)
                && board.contains(pawn)
                && board.contains(origin)
                && board.piece_at(ep).is_none()
                && board.piece_at(origin).is_none()
                && board.piece_at(pawn) == Some(mover.pawn());
            if !valid {
                return Err(PositionError::BadEpSquare);
            }
        }
        Ok(core)
    }
}

fn fill_back_ranks(board: &mut Board, back: &[Role]) {
    let height = board.height();
    for (file, &role) in back.iter().enumerate() {
        let file = file as i8;
        board.set(Point::new(file, 0), Some(role.of(Color::White)));
        board.set(Point::new(file, 1), Some(Color::White.pawn()));
        board.set(Point::new(file, height - 1), Some(role.of(Color::Black)));
        board.set(Point::new(file, height - 2), Some(Color::Black.pawn()));
    }
}

/// Checks the extra castling condition beyond king safety on the resulting
/// position: the king must not start from or pass over an attacked square.
pub(crate) fn castle_legal<P: Position>(pos: &P, core: &ChessCore, m: Move) -> bool {
    if let Move::Castle(side) = m {
        if core
            .castle_transit(side)
            .iter()
            .any(|&sq| pos.attacked(sq, !pos.turn()))
        {
            return false;
        }
    }
    king_safe_after(pos, m)
}

/// Orthodox chess on the standard 8×8 board.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Chess(pub(crate) ChessCore);

impl Default for Chess {
    fn default() -> Chess {
        Chess(ChessCore::standard())
    }
}

impl Position for Chess {
    fn board(&self) -> &Board {
        &self.0.board
    }

    fn turn(&self) -> Color {
        self.0.turn
    }

    fn castling(&self) -> CastlingRights {
        self.0.castling
    }

    fn ep_square(&self) -> Option<Point> {
        self.0.ep_square
    }

    fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        self.0.attacks(piece, from, to)
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        self.0.pseudo_legal(m, &STANDARD_RULES)
    }

    fn legal(&self, m: Move) -> bool {
        self.pseudo_legal(m) && castle_legal(self, &self.0, m)
    }

    fn play_unchecked(&mut self, m: Move) {
        self.0.apply(m, &STANDARD_RULES);
    }

    fn promotions(&self, from: Point, to: Point) -> Promotions {
        self.0.promotions(from, to)
    }
}

impl FromSetup for Chess {
    fn from_setup(setup: &Setup) -> Result<Chess, PositionError> {
        if setup.pools.is_some() {
            return Err(PositionError::UnsupportedPool);
        }
        let pos = Chess(ChessCore::from_setup(setup, 8, 8, &STANDARD_RULES)?);
        if pos.is_check(!pos.turn()) {
            return Err(PositionError::OppositeCheck);
        }
        Ok(pos)
    }
}

/// Gardner minichess: 5×5, no castling, no double pawn step, no en passant.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MiniChess(pub(crate) ChessCore);

impl Default for MiniChess {
    fn default() -> MiniChess {
        MiniChess(ChessCore::gardner())
    }
}

impl Position for MiniChess {
    fn board(&self) -> &Board {
        &self.0.board
    }

    fn turn(&self) -> Color {
        self.0.turn
    }

    fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        self.0.attacks(piece, from, to)
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        self.0.pseudo_legal(m, &GARDNER_RULES)
    }

    fn play_unchecked(&mut self, m: Move) {
        self.0.apply(m, &GARDNER_RULES);
    }

    fn promotions(&self, from: Point, to: Point) -> Promotions {
        self.0.promotions(from, to)
    }
}

impl FromSetup for MiniChess {
    fn from_setup(setup: &Setup) -> Result<MiniChess, PositionError> {
        if setup.pools.is_some() {
            return Err(PositionError::UnsupportedPool);
        }
        let pos = MiniChess(ChessCore::from_setup(setup, 5, 5, &GARDNER_RULES)?);
        if pos.is_check(!pos.turn()) {
            return Err(PositionError::OppositeCheck);
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pos: &Chess, from: &str, to: &str) -> Move {
        pos.normal_move(
            from.parse().expect("valid square"),
            to.parse().expect("valid square"),
            None,
        )
        .expect("movable piece")
    }

    #[test]
    fn test_starting_moves() {
        let pos = Chess::default();
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn test_play_determinism() {
        let pos = Chess::default();
        let e4 = m(&pos, "e2", "e4");
        let one = pos.clone().play(e4).expect("legal move");
        let two = pos.clone().play(e4).expect("legal move");
        assert_eq!(one, two);
    }

    #[test]
    fn test_double_step_sets_ep_square() {
        let pos = Chess::default();
        let mv = m(&pos, "e2", "e4");
        let pos = pos.play(mv).expect("legal move");
        assert_eq!(pos.ep_square(), Some("e3".parse().expect("valid square")));
        let mv = m(&pos, "g8", "f6");
        let pos = pos.play(mv).expect("legal move");
        assert_eq!(pos.ep_square(), None);
    }

    #[test]
    fn test_en_passant_capture() {
        let mut pos = Chess::default();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            let mv = m(&pos, from, to);
            pos = pos.play(mv).expect("legal move");
        }
        let ep = m(&pos, "e5", "d6");
        assert!(matches!(ep, Move::EnPassant { .. }));
        let pos = pos.play(ep).expect("legal en passant");
        assert_eq!(
            pos.board().piece_at("d5".parse().expect("valid square")),
            None,
            "captured pawn removed from the passed square"
        );
    }

    #[test]
    fn test_castling() {
        let mut pos = Chess::default();
        for (from, to) in [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("f8", "c5"),
        ] {
            let mv = m(&pos, from, to);
            pos = pos.play(mv).expect("legal move");
        }
        let castle = pos
            .normal_move(
                "e1".parse().expect("valid square"),
                "g1".parse().expect("valid square"),
                None,
            )
            .expect("king move resolves");
        assert_eq!(castle, Move::Castle(CastlingSide::KingSide));
        let pos = pos.play(castle).expect("legal castling");
        assert_eq!(
            pos.board().role_at("g1".parse().expect("valid square")),
            Some(Role::King)
        );
        assert_eq!(
            pos.board().role_at("f1".parse().expect("valid square")),
            Some(Role::Rook)
        );
        assert!(!pos.castling().has(Color::White, CastlingSide::QueenSide));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // a pinned knight may pass the shape check but must not expose the
        // king
        let mut pos = Chess::default();
        for (from, to) in [
            ("e2", "e4"),
            ("e7", "e5"),
            ("d2", "d4"),
            ("d7", "d6"),
            ("f1", "b5"),
            ("b8", "c6"),
            ("d4", "d5"),
        ] {
            let mv = m(&pos, from, to);
            pos = pos.play(mv).expect("legal move");
        }
        // knight on c6 is pinned against the king on e8
        let pinned = m(&pos, "c6", "d4");
        assert!(pos.pseudo_legal(pinned));
        assert!(!pos.legal(pinned));
    }

    #[test]
    fn test_legality_invariant_king_never_left_attacked() {
        let pos = Chess::default();
        for mv in pos.legal_moves() {
            let next = pos.clone().play(mv).expect("generated move is legal");
            assert!(
                !next.is_check(pos.turn()),
                "move {mv} leaves the mover in check"
            );
        }
    }

    #[test]
    fn test_minichess_has_no_double_step() {
        let pos = MiniChess::default();
        let single = pos
            .normal_move(
                "b2".parse().expect("valid square"),
                "b3".parse().expect("valid square"),
                None,
            )
            .expect("pawn move resolves");
        assert!(pos.legal(single));
        let double = Move::Normal {
            role: Role::Pawn,
            from: "b2".parse().expect("valid square"),
            capture: None,
            to: "b4".parse().expect("valid square"),
            promotion: None,
        };
        assert!(!pos.legal(double));
    }
}
