use std::fmt;

use crate::{point::Point, role::Role, types::CastlingSide};

/// Information about a move, meaningful only relative to the position it was
/// generated against.
///
/// Moves are cheap immutable values compared field by field; captured-piece
/// and check information is re-derived from the reference position when
/// needed.
///
/// # Display
///
/// `Move` implements [`fmt::Display`] using long algebraic notation. With a
/// position for context, prefer [SAN](crate::san) or the coordinate form
/// ([`Coord`](crate::coord::Coord)).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A normal board move, e.g. `Bd3xh7`.
    ///
    /// For chess promotions, `promotion` carries the new role. For
    /// shogi-family promotions, it carries the moving role itself: shogi
    /// promotion flips the piece's `promoted` flag without changing the
    /// role.
    Normal {
        role: Role,
        from: Point,
        capture: Option<Role>,
        to: Point,
        promotion: Option<Role>,
    },
    /// An en passant capture, e.g. `e5xd6`.
    EnPassant { from: Point, to: Point },
    /// A castling move, `O-O` or `O-O-O`. The concrete king and rook squares
    /// follow from the position's board size.
    Castle(CastlingSide),
    /// A drop from the pool onto an empty square, e.g. `N@e5`.
    Drop { role: Role, to: Point },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(self) -> Role {
        match self {
            Move::Normal { role, .. } | Move::Drop { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle(_) => Role::King,
        }
    }

    /// Gets the origin square, or `None` for drops and castling.
    pub const fn from(self) -> Option<Point> {
        match self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => Some(from),
            Move::Castle(_) | Move::Drop { .. } => None,
        }
    }

    /// Gets the destination square, or `None` for castling.
    pub const fn to(self) -> Option<Point> {
        match self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } | Move::Drop { to, .. } => {
                Some(to)
            }
            Move::Castle(_) => None,
        }
    }

    /// Gets the role of the captured piece, or `None`.
    pub const fn capture(self) -> Option<Role> {
        match self {
            Move::Normal { capture, .. } => capture,
            Move::EnPassant { .. } => Some(Role::Pawn),
            _ => None,
        }
    }

    /// Checks if the move is a capture.
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Checks if the move is en passant.
    pub const fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Gets the castling side.
    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Move::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Checks if the move is a castling move.
    pub const fn is_castle(self) -> bool {
        matches!(self, Move::Castle(_))
    }

    /// Gets the promotion role, if any.
    pub const fn promotion(self) -> Option<Role> {
        match self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }

    /// Checks if the move is a drop.
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                write!(
                    f,
                    "{}{}{}",
                    from,
                    if capture.is_some() { 'x' } else { '-' },
                    to
                )?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }
                Ok(())
            }
            Move::EnPassant { from, to } => write!(f, "{from}x{to}"),
            Move::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            Move::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
            Move::Drop { role, to } => write!(f, "{}@{}", role.upper_char(), to),
        }
    }
}

/// A container for the legal moves of a position.
///
/// Heap-allocated: boards are sized at runtime and the editor variant lets
/// every piece reach every square, so no inline capacity bounds the count.
pub type MoveList = Vec<Move>;
