use std::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`], [`Role`] and promotion state.
///
/// The `promoted` flag carries shogi promotion state and, in crazyhouse,
/// marks pieces that started life as pawns and must return to the pool as
/// pawns when captured. It is part of structural equality.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub promoted: bool,
}

impl Piece {
    /// FEN-style letter: uppercase for white, lowercase for black. The
    /// promotion flag is not encoded here; notations that track it append
    /// their own marker.
    pub fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    pub const fn from_char(ch: char) -> Option<Piece> {
        if let Some(role) = Role::from_char(ch) {
            Some(Piece {
                color: Color::from_white(ch.is_ascii_uppercase()),
                role,
                promoted: false,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn promote(self) -> Piece {
        Piece {
            promoted: true,
            ..self
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.promoted {
            f.write_str("+")?;
        }
        write!(f, "{}", self.char())
    }
}

/// `KingSide` (`O-O`) or `QueenSide` (`O-O-O`).
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide = 0,
    QueenSide = 1,
}

impl CastlingSide {
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

bitflags::bitflags! {
    /// Castling rights of both sides.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    pub fn single(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::single(color, side))
    }

    pub fn discard_color(&mut self, color: Color) {
        self.remove(
            CastlingRights::single(color, CastlingSide::KingSide)
                | CastlingRights::single(color, CastlingSide::QueenSide),
        );
    }

    pub fn discard(&mut self, color: Color, side: CastlingSide) {
        self.remove(CastlingRights::single(color, side));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Color::White.king().char(), 'K');
        assert_eq!(Color::Black.pawn().char(), 'p');
        assert_eq!(Piece::from_char('q'), Some(Role::Queen.of(Color::Black)));
    }

    #[test]
    fn test_discard_rights() {
        let mut rights = CastlingRights::all();
        rights.discard_color(Color::White);
        assert!(!rights.has(Color::White, CastlingSide::KingSide));
        assert!(rights.has(Color::Black, CastlingSide::QueenSide));
    }
}
