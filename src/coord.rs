//! Read and write plain coordinate notation, e.g. `e2e4`, `e7e8=Q` or
//! `N@e5`.
//!
//! Unlike [SAN](crate::san), the coordinate form needs no disambiguation and
//! round-trips unconditionally; it is the preferred wire format where
//! bandwidth allows.

use std::{fmt, str::FromStr};

use crate::{
    m::Move,
    point::Point,
    position::Position,
    role::Role,
    san::SanError,
};

/// Error when parsing invalid coordinate notation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("invalid coordinate notation")]
pub struct ParseCoordError;

/// A move in coordinate notation.
///
/// Castling is written as the king's two-file slide (`e1g1`); promotions
/// append `=` and the new role. Shogi-family promotions append `=+`, the
/// role being implied by the piece on the origin square.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Coord {
    Normal {
        from: Point,
        to: Point,
        promotion: Option<PromotionTag>,
    },
    Drop {
        role: Role,
        to: Point,
    },
    /// A null move, written `--`.
    Null,
}

/// What follows `=` in coordinate notation.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PromotionTag {
    /// A chess promotion to a concrete role, e.g. `=Q`.
    Role(Role),
    /// A shogi promotion flag flip, written `=+`.
    Flip,
}

impl Coord {
    pub fn from_ascii(s: &[u8]) -> Result<Coord, ParseCoordError> {
        if s == b"--" {
            return Ok(Coord::Null);
        }

        if let [letter, b'@', dest @ ..] = s {
            let role = Role::from_char(char::from(*letter))
                .filter(|_| letter.is_ascii_uppercase())
                .ok_or(ParseCoordError)?;
            let to = Point::from_ascii(dest).map_err(|_| ParseCoordError)?;
            return Ok(Coord::Drop { role, to });
        }

        let (s, promotion) = match s {
            [rest @ .., b'=', b'+'] => (rest, Some(PromotionTag::Flip)),
            [rest @ .., b'=', letter] => (
                rest,
                Some(PromotionTag::Role(
                    Role::from_char(char::from(*letter))
                        .filter(|_| letter.is_ascii_uppercase())
                        .ok_or(ParseCoordError)?,
                )),
            ),
            _ => (s, None),
        };

        // the origin square ends where the destination's file letter starts
        let split = s
            .iter()
            .skip(1)
            .position(|ch| ch.is_ascii_lowercase())
            .ok_or(ParseCoordError)?
            + 1;
        let from = Point::from_ascii(&s[..split]).map_err(|_| ParseCoordError)?;
        let to = Point::from_ascii(&s[split..]).map_err(|_| ParseCoordError)?;
        Ok(Coord::Normal {
            from,
            to,
            promotion,
        })
    }

    /// Converts a move to coordinate notation. Castling renders as the
    /// king's slide, which needs the position for the king's home square.
    pub fn from_move<P: Position>(pos: &P, m: Move) -> Coord {
        match m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => Coord::Normal {
                from,
                to,
                promotion: promotion.map(|p| {
                    if p == role {
                        PromotionTag::Flip
                    } else {
                        PromotionTag::Role(p)
                    }
                }),
            },
            Move::EnPassant { from, to } => Coord::Normal {
                from,
                to,
                promotion: None,
            },
            Move::Castle(side) => {
                let rank = pos.turn().fold(0, pos.board().height() - 1);
                let king = pos
                    .king(pos.turn())
                    .unwrap_or(Point::new(pos.board().width() / 2, rank));
                Coord::Normal {
                    from: king,
                    to: Point::new(king.file + if side.is_king_side() { 2 } else { -2 }, rank),
                    promotion: None,
                }
            }
            Move::Drop { role, to } => Coord::Drop { role, to },
        }
    }

    /// Resolves the notation against a position.
    ///
    /// # Errors
    ///
    /// Returns [`SanError::Illegal`] when the move is not legal. Coordinate
    /// notation cannot be ambiguous.
    pub fn to_move<P: Position>(&self, pos: &P) -> Result<Move, SanError> {
        let m = match *self {
            Coord::Normal {
                from,
                to,
                promotion,
            } => {
                let promotion = match promotion {
                    None => None,
                    Some(PromotionTag::Role(role)) => Some(role),
                    Some(PromotionTag::Flip) => Some(
                        pos.board()
                            .role_at(from)
                            .ok_or(SanError::Illegal)?,
                    ),
                };
                pos.normal_move(from, to, promotion)
                    .ok_or(SanError::Illegal)?
            }
            Coord::Drop { role, to } => Move::Drop { role, to },
            Coord::Null => return Err(SanError::Illegal),
        };
        if pos.legal(m) {
            Ok(m)
        } else {
            Err(SanError::Illegal)
        }
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Coord, ParseCoordError> {
        Coord::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Coord::Normal {
                from,
                to,
                promotion,
            } => {
                write!(f, "{from}{to}")?;
                match promotion {
                    Some(PromotionTag::Role(role)) => write!(f, "={}", role.upper_char()),
                    Some(PromotionTag::Flip) => f.write_str("=+"),
                    None => Ok(()),
                }
            }
            Coord::Drop { role, to } => write!(f, "{}@{}", role.upper_char(), to),
            Coord::Null => f.write_str("--"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chess::Chess, fen::Fen, types::CastlingSide};

    #[test]
    fn test_round_trip() {
        for coord in ["e2e4", "g1f3", "e7e8=Q", "N@e5", "a1i9", "--"] {
            let parsed: Coord = coord.parse().expect("valid coordinate notation");
            assert_eq!(parsed.to_string(), *coord);
        }
        assert!("e2".parse::<Coord>().is_err());
        assert!("e2e9=x".parse::<Coord>().is_err());
    }

    #[test]
    fn test_resolve_and_write() {
        let pos = Chess::default();
        let m = "e2e4"
            .parse::<Coord>()
            .expect("valid coordinate notation")
            .to_move(&pos)
            .expect("legal move");
        assert_eq!(m.role(), Role::Pawn);
        assert_eq!(Coord::from_move(&pos, m).to_string(), "e2e4");
    }

    #[test]
    fn test_castling_as_king_slide() {
        let pos: Chess = "4k3/8/8/8/8/8/8/4K2R w K -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let m = "e1g1"
            .parse::<Coord>()
            .expect("valid coordinate notation")
            .to_move(&pos)
            .expect("legal move");
        assert_eq!(m, Move::Castle(CastlingSide::KingSide));
        assert_eq!(Coord::from_move(&pos, m).to_string(), "e1g1");
    }
}
