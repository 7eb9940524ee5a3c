//! Parse and write Forsyth-Edwards Notation.
//!
//! The board field lists ranks from the top, `~` after a piece letter marks
//! a promoted piece, and an optional `[...]` segment after the board holds
//! the drop pools. Halfmove and fullmove counters are accepted and ignored.

use std::{fmt, str::FromStr};

use crate::{
    board::Board,
    color::{ByColor, Color},
    point::Point,
    pool::Pool,
    position::PositionError,
    types::{CastlingRights, CastlingSide, Piece},
};

/// An unvalidated snapshot of board, pools, turn and move rights.
///
/// A setup carries no variant rules. Validation against a variant happens in
/// [`FromSetup`], which checks piece placement, castling rights and the en
/// passant square for plausibility and rejects what the variant cannot
/// represent.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Setup {
    pub board: Board,
    /// Drop pools, present only when the source notation carried them.
    pub pools: Option<ByColor<Pool>>,
    pub turn: Color,
    pub castling: CastlingRights,
    pub ep_square: Option<Point>,
}

/// Validates a [`Setup`] into a variant position.
pub trait FromSetup: Sized {
    /// # Errors
    ///
    /// Returns a [`PositionError`] naming the first rule the setup breaks.
    fn from_setup(setup: &Setup) -> Result<Self, PositionError>;
}

/// Error when parsing an invalid FEN.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ParseFenError {
    #[error("invalid board part in fen")]
    Board,
    #[error("invalid pool part in fen")]
    Pool,
    #[error("invalid turn part in fen")]
    Turn,
    #[error("invalid castling part in fen")]
    Castling,
    #[error("invalid en passant part in fen")]
    EpSquare,
}

fn parse_board(part: &str) -> Result<(Board, Option<ByColor<Pool>>), ParseFenError> {
    let (placement, pool_part) = match part.split_once('[') {
        Some((placement, rest)) => {
            let pool = rest.strip_suffix(']').ok_or(ParseFenError::Pool)?;
            (placement, Some(pool))
        }
        None => (part, None),
    };

    let rows: Vec<&str> = placement.split('/').collect();
    let height = rows.len() as i8;
    if height == 0 || height > 26 {
        return Err(ParseFenError::Board);
    }

    // each row is a run-length encoded rank; the first row is the top rank
    let mut ranks = Vec::with_capacity(rows.len());
    let mut width = None;
    for row in rows {
        let mut rank: Vec<Option<Piece>> = Vec::new();
        let mut empty_run: i8 = 0;
        for ch in row.chars() {
            if let Some(digit) = ch.to_digit(10) {
                empty_run = empty_run
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as i8))
                    .ok_or(ParseFenError::Board)?;
            } else {
                for _ in 0..empty_run {
                    rank.push(None);
                }
                empty_run = 0;
                if ch == '~' {
                    match rank.last_mut() {
                        Some(Some(piece)) if !piece.promoted => piece.promoted = true,
                        _ => return Err(ParseFenError::Board),
                    }
                } else {
                    rank.push(Some(Piece::from_char(ch).ok_or(ParseFenError::Board)?));
                }
            }
        }
        for _ in 0..empty_run {
            rank.push(None);
        }
        if rank.is_empty() || rank.len() > 26 {
            return Err(ParseFenError::Board);
        }
        if *width.get_or_insert(rank.len()) != rank.len() {
            return Err(ParseFenError::Board);
        }
        ranks.push(rank);
    }

    let width = width.unwrap_or(0) as i8;
    let mut board = Board::empty(width, height);
    for (row, rank) in ranks.into_iter().enumerate() {
        for (file, piece) in rank.into_iter().enumerate() {
            board.set(Point::new(file as i8, height - 1 - row as i8), piece);
        }
    }

    let pools = match pool_part {
        None => None,
        Some(segment) => {
            let mut pools = ByColor::<Pool>::default();
            for ch in segment.chars() {
                let piece = Piece::from_char(ch).ok_or(ParseFenError::Pool)?;
                pools.by_color_mut(piece.color).add(piece.role);
            }
            Some(pools)
        }
    };

    Ok((board, pools))
}

fn parse_castling(part: &str) -> Result<CastlingRights, ParseFenError> {
    if part == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut castling = CastlingRights::empty();
    for ch in part.chars() {
        castling |= match ch {
            'K' => CastlingRights::single(Color::White, CastlingSide::KingSide),
            'Q' => CastlingRights::single(Color::White, CastlingSide::QueenSide),
            'k' => CastlingRights::single(Color::Black, CastlingSide::KingSide),
            'q' => CastlingRights::single(Color::Black, CastlingSide::QueenSide),
            _ => return Err(ParseFenError::Castling),
        };
    }
    Ok(castling)
}

/// A [`Setup`] with FEN parsing and writing attached.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fen(pub Setup);

impl Fen {
    pub fn into_setup(self) -> Setup {
        self.0
    }

    /// Validates the setup against a variant's rules.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if the setup is not a legal position of
    /// the variant.
    pub fn into_position<P: FromSetup>(self) -> Result<P, PositionError> {
        P::from_setup(&self.0)
    }

    pub fn from_position<P: crate::position::Position>(pos: &P) -> Fen {
        let pools = ByColor::new_with(|color| pos.pool(color).clone());
        Fen(Setup {
            board: pos.board().clone(),
            pools: (!pools.white.is_empty() || !pools.black.is_empty()).then_some(pools),
            turn: pos.turn(),
            castling: pos.castling(),
            ep_square: pos.ep_square(),
        })
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Fen, ParseFenError> {
        let mut parts = s.split(' ').filter(|part| !part.is_empty());

        let (board, pools) = parse_board(parts.next().ok_or(ParseFenError::Board)?)?;

        let turn = match parts.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ParseFenError::Turn),
        };

        let castling = match parts.next() {
            Some(part) => parse_castling(part)?,
            None => CastlingRights::empty(),
        };

        let ep_square = match parts.next() {
            Some("-") | None => None,
            Some(part) => Some(part.parse().map_err(|_| ParseFenError::EpSquare)?),
        };

        // halfmove clock and fullmove number, if present, are ignored
        for part in parts.take(2) {
            if part.bytes().any(|b| !b.is_ascii_digit()) {
                return Err(ParseFenError::Board);
            }
        }

        Ok(Fen(Setup {
            board,
            pools,
            turn,
            castling,
            ep_square,
        }))
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = &self.0;
        for rank in (0..setup.board.height()).rev() {
            let mut empty_run = 0;
            for file in 0..setup.board.width() {
                match setup.board.piece_at(Point::new(file, rank)) {
                    None => empty_run += 1,
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{}", piece.char())?;
                        if piece.promoted {
                            f.write_str("~")?;
                        }
                    }
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        if let Some(pools) = &setup.pools {
            f.write_str("[")?;
            for color in Color::ALL {
                for (role, count) in pools.by_color(color).iter() {
                    for _ in 0..count {
                        write!(f, "{}", role.of(color).char())?;
                    }
                }
            }
            f.write_str("]")?;
        }

        write!(f, " {} ", setup.turn.char())?;

        if setup.castling.is_empty() {
            f.write_str("-")?;
        } else {
            for (flag, ch) in [
                (CastlingRights::WHITE_KING_SIDE, 'K'),
                (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
                (CastlingRights::BLACK_KING_SIDE, 'k'),
                (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
            ] {
                if setup.castling.contains(flag) {
                    write!(f, "{ch}")?;
                }
            }
        }

        match setup.ep_square {
            Some(p) => write!(f, " {p}"),
            None => f.write_str(" -"),
        }
    }
}
