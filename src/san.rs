//! Read and write Standard Algebraic Notation.
//!
//! A [`San`] is a pattern: the origin file and rank are optional and act as
//! wildcards when resolving against a position. When writing a move, the
//! origin is qualified as little as possible: nothing, then the file, then
//! the rank, then both, stopping at the first form that picks the move out
//! uniquely among the legal moves of the position.

use std::{fmt, str::FromStr};

use crate::{
    m::Move,
    point::{file_from_char, rank_from_char, Point},
    position::Position,
    role::Role,
    types::CastlingSide,
};

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug, thiserror::Error)]
#[error("invalid san")]
pub struct ParseSanError;

/// Error when resolving a SAN against a position.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum SanError {
    #[error("illegal san")]
    Illegal,
    #[error("ambiguous san")]
    Ambiguous,
}

/// A move in Standard Algebraic Notation, e.g. `Nxf6`, `exd5`, `O-O` or
/// `N@e5`.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<i8>,
        rank: Option<i8>,
        capture: bool,
        to: Point,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
    Drop {
        role: Role,
        to: Point,
    },
    /// A null move, written `--`.
    Null,
}

impl San {
    pub fn from_ascii(s: &[u8]) -> Result<San, ParseSanError> {
        match s {
            b"--" | b"Z0" | b"none" => return Ok(San::Null),
            b"O-O" | b"0-0" => return Ok(San::Castle(CastlingSide::KingSide)),
            b"O-O-O" | b"0-0-0" => return Ok(San::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        if let Some(at) = s.iter().position(|&ch| ch == b'@') {
            let role = match &s[..at] {
                [] => Role::Pawn,
                [letter] => Role::from_char(char::from(*letter))
                    .filter(|_| letter.is_ascii_uppercase())
                    .ok_or(ParseSanError)?,
                _ => return Err(ParseSanError),
            };
            let to = Point::from_ascii(&s[at + 1..]).map_err(|_| ParseSanError)?;
            return Ok(San::Drop { role, to });
        }

        let (s, promotion) = match s {
            [rest @ .., b'=', letter] | [rest @ .., b'(', letter, b')'] => (
                rest,
                Some(
                    Role::from_char(char::from(*letter))
                        .filter(|_| letter.is_ascii_uppercase())
                        .ok_or(ParseSanError)?,
                ),
            ),
            _ => (s, None),
        };

        if s.len() < 2 {
            return Err(ParseSanError);
        }
        let (s, dest) = s.split_at(s.len() - 2);
        let to = Point::new(
            file_from_char(char::from(dest[0])).ok_or(ParseSanError)?,
            rank_from_char(char::from(dest[1])).ok_or(ParseSanError)?,
        );

        let (s, capture) = match s {
            [rest @ .., b'x'] => (rest, true),
            [rest @ .., b'-'] => (rest, false),
            _ => (s, false),
        };

        let (role, s) = match s.split_first() {
            Some((&letter, rest)) if letter.is_ascii_uppercase() => (
                Role::from_char(char::from(letter)).ok_or(ParseSanError)?,
                rest,
            ),
            _ => (Role::Pawn, s),
        };

        let (file, rank) = match *s {
            [] => (None, None),
            [ch] => match file_from_char(char::from(ch)) {
                Some(file) => (Some(file), None),
                None => (None, Some(rank_from_char(char::from(ch)).ok_or(ParseSanError)?)),
            },
            [file_ch, rank_ch] => (
                Some(file_from_char(char::from(file_ch)).ok_or(ParseSanError)?),
                Some(rank_from_char(char::from(rank_ch)).ok_or(ParseSanError)?),
            ),
            _ => return Err(ParseSanError),
        };

        if promotion.is_some() && role != Role::Pawn {
            return Err(ParseSanError);
        }

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// Converts a move to SAN with minimal disambiguation.
    ///
    /// `m` must be legal in `pos`; the qualification ladder compares against
    /// the other legal moves of the same role to the same destination.
    pub fn from_move<P: Position>(pos: &P, m: Move) -> San {
        let san = match m {
            Move::Castle(side) => San::Castle(side),
            Move::Drop { role, to } => San::Drop { role, to },
            Move::EnPassant { from, to } => San::Normal {
                role: Role::Pawn,
                file: Some(from.file),
                rank: None,
                capture: true,
                to,
                promotion: None,
            },
            Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion,
            } => San::Normal {
                role: Role::Pawn,
                file: capture.is_some().then_some(from.file),
                rank: None,
                capture: capture.is_some(),
                to,
                promotion,
            },
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                let mut others = pos.san_candidates(role, to);
                others.retain(|other| other.from() != Some(from));
                let (file, rank) = if others.is_empty() {
                    (None, None)
                } else if others
                    .iter()
                    .all(|other| other.from().is_some_and(|p| p.file != from.file))
                {
                    (Some(from.file), None)
                } else if others
                    .iter()
                    .all(|other| other.from().is_some_and(|p| p.rank != from.rank))
                {
                    (None, Some(from.rank))
                } else {
                    (Some(from.file), Some(from.rank))
                };
                San::Normal {
                    role,
                    file,
                    rank,
                    capture: capture.is_some(),
                    to,
                    promotion,
                }
            }
        };
        debug_assert_eq!(san.to_move(pos), Ok(m), "{san} does not read back");
        san
    }

    /// Resolves the pattern against a position.
    ///
    /// # Errors
    ///
    /// Returns [`SanError::Illegal`] when no legal move matches and
    /// [`SanError::Ambiguous`] when more than one does.
    pub fn to_move<P: Position>(&self, pos: &P) -> Result<Move, SanError> {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                let mut candidates = pos.san_candidates(role, to);
                candidates.retain(|m| {
                    m.is_capture() == capture
                        && m.promotion() == promotion
                        && file.map_or(true, |file| m.from().is_some_and(|p| p.file == file))
                        && rank.map_or(true, |rank| m.from().is_some_and(|p| p.rank == rank))
                });
                match candidates.as_slice() {
                    [] => Err(SanError::Illegal),
                    [m] => Ok(*m),
                    _ => Err(SanError::Ambiguous),
                }
            }
            San::Castle(side) => {
                let m = Move::Castle(side);
                if pos.legal(m) {
                    Ok(m)
                } else {
                    Err(SanError::Illegal)
                }
            }
            San::Drop { role, to } => {
                let m = Move::Drop { role, to };
                if pos.legal(m) {
                    Ok(m)
                } else {
                    Err(SanError::Illegal)
                }
            }
            San::Null => Err(SanError::Illegal),
        }
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<San, ParseSanError> {
        San::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", (b'a' + file as u8) as char)?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank + 1)?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
            San::Drop { role, to } => write!(f, "{}@{}", role.upper_char(), to),
            San::Null => f.write_str("--"),
        }
    }
}

/// `+` for check, `#` for checkmate.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    /// The suffix for the position a move just produced.
    pub fn from_position<P: Position>(pos: &P) -> Option<Suffix> {
        if pos.is_checkmate() {
            Some(Suffix::Checkmate)
        } else if pos.is_check(pos.turn()) {
            Some(Suffix::Check)
        } else {
            None
        }
    }
}

/// A [`San`] and an optional check or checkmate suffix.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    pub fn from_ascii(s: &[u8]) -> Result<SanPlus, ParseSanError> {
        match s.split_last() {
            Some((b'+', rest)) => Ok(SanPlus {
                san: San::from_ascii(rest)?,
                suffix: Some(Suffix::Check),
            }),
            Some((b'#', rest)) => Ok(SanPlus {
                san: San::from_ascii(rest)?,
                suffix: Some(Suffix::Checkmate),
            }),
            _ => Ok(SanPlus {
                san: San::from_ascii(s)?,
                suffix: None,
            }),
        }
    }

    /// Converts a legal move to SAN, evaluating the resulting position for
    /// the check or checkmate suffix.
    pub fn from_move<P: Position>(pos: &P, m: Move) -> SanPlus {
        let san = San::from_move(pos, m);
        let mut after = pos.clone();
        after.play_unchecked(m);
        SanPlus {
            san,
            suffix: Suffix::from_position(&after),
        }
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix {
            Some(suffix) => write!(f, "{}{}", self.san, suffix.char()),
            None => write!(f, "{}", self.san),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chess::Chess, crazyhouse::Crazyhouse, fen::Fen, role::Role};

    fn play(pos: Chess, san: &str) -> Chess {
        let m = san
            .parse::<SanPlus>()
            .expect("valid san")
            .san
            .to_move(&pos)
            .expect("unique legal move");
        pos.play(m).expect("legal move")
    }

    #[test]
    fn test_simple_round_trip() {
        let pos = Chess::default();
        for san in ["e4", "d4", "Nf3", "Nc3"] {
            let parsed: San = san.parse().expect("valid san");
            let m = parsed.to_move(&pos).expect("unique legal move");
            assert_eq!(San::from_move(&pos, m).to_string(), *san);
        }
    }

    #[test]
    fn test_file_disambiguation() {
        let pos: Chess = "k7/8/8/8/8/8/8/1R3RK1 w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        assert_eq!(
            "Rd1".parse::<San>().expect("valid san").to_move(&pos),
            Err(SanError::Ambiguous)
        );
        let m = "Rbd1"
            .parse::<San>()
            .expect("valid san")
            .to_move(&pos)
            .expect("unique legal move");
        assert_eq!(m.from(), Some("b1".parse().expect("valid square")));
        assert_eq!(San::from_move(&pos, m).to_string(), "Rbd1");
    }

    #[test]
    fn test_rank_disambiguation() {
        let pos: Chess = "k7/8/8/7R/8/8/8/6KR w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let m = pos
            .normal_move(
                "h1".parse().expect("valid square"),
                "h3".parse().expect("valid square"),
                None,
            )
            .expect("rook move resolves");
        assert_eq!(San::from_move(&pos, m).to_string(), "R1h3");
    }

    #[test]
    fn test_no_disambiguation_when_unique() {
        // the second knight is pinned, so Nd2 needs no qualifier
        let pos: Chess = "4r1k1/8/8/8/8/8/2N1N3/4K3 w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let m = pos
            .normal_move(
                "c2".parse().expect("valid square"),
                "d4".parse().expect("valid square"),
                None,
            )
            .expect("knight move resolves");
        assert_eq!(San::from_move(&pos, m).to_string(), "Nd4");
    }

    #[test]
    fn test_pawn_captures_and_promotion() {
        let pos = play(Chess::default(), "e4");
        let pos = play(pos, "d5");
        let m = "exd5"
            .parse::<San>()
            .expect("valid san")
            .to_move(&pos)
            .expect("unique legal move");
        assert!(m.is_capture());
        assert_eq!(San::from_move(&pos, m).to_string(), "exd5");

        let promo: Chess = "k7/4P3/8/8/8/8/8/4K3 w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let m = "e8=Q"
            .parse::<San>()
            .expect("valid san")
            .to_move(&promo)
            .expect("unique legal move");
        assert_eq!(m.promotion(), Some(Role::Queen));
        assert_eq!(SanPlus::from_move(&promo, m).to_string(), "e8=Q+");
        // parenthesized promotion is accepted on input
        assert_eq!("e8(Q)".parse::<San>().expect("valid san").to_move(&promo), Ok(m));
    }

    #[test]
    fn test_long_algebraic_separator() {
        let pos = Chess::default();
        let m = "Ng1-f3"
            .parse::<San>()
            .expect("valid san")
            .to_move(&pos)
            .expect("unique legal move");
        assert_eq!(San::from_move(&pos, m).to_string(), "Nf3");
    }

    #[test]
    fn test_drop_round_trip() {
        let pos: Crazyhouse = "k7/8/8/8/8/8/8/6K1[Nn] w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let san: San = "N@e5".parse().expect("valid san");
        let m = san.to_move(&pos).expect("unique legal move");
        assert_eq!(
            m,
            Move::Drop {
                role: Role::Knight,
                to: "e5".parse().expect("valid square"),
            }
        );
        assert_eq!(San::from_move(&pos, m).to_string(), "N@e5");
    }

    #[test]
    fn test_pawn_push_distinct_from_pooled_pawn_drop() {
        // a pooled pawn of the same role must not shadow the board move
        let pos: Crazyhouse = "k7/8/8/8/8/8/4P3/6K1[P] w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let push = pos
            .normal_move(
                "e2".parse().expect("valid square"),
                "e4".parse().expect("valid square"),
                None,
            )
            .expect("pawn push resolves");
        assert_eq!(San::from_move(&pos, push).to_string(), "e4");
        assert_eq!(
            "e4".parse::<San>().expect("valid san").to_move(&pos),
            Ok(push)
        );
        assert_eq!(
            "P@e4".parse::<San>().expect("valid san").to_move(&pos),
            Ok(Move::Drop {
                role: Role::Pawn,
                to: "e4".parse().expect("valid square"),
            })
        );
    }

    #[test]
    fn test_checkmate_suffix() {
        let pos = play(Chess::default(), "e4");
        let pos = play(pos, "e5");
        let pos = play(pos, "Bc4");
        let pos = play(pos, "Nc6");
        let pos = play(pos, "Qh5");
        let pos = play(pos, "Nf6");
        let mate = "Qxf7"
            .parse::<San>()
            .expect("valid san")
            .to_move(&pos)
            .expect("unique legal move");
        assert_eq!(SanPlus::from_move(&pos, mate).to_string(), "Qxf7#");
        let pos = pos.play(mate).expect("legal move");
        assert!(pos.is_checkmate());
    }

    #[test]
    fn test_castles_and_null() {
        assert_eq!(
            "O-O".parse::<San>().expect("valid san"),
            San::Castle(CastlingSide::KingSide)
        );
        assert_eq!("--".parse::<San>().expect("valid san"), San::Null);
        assert_eq!(
            San::Null.to_move(&Chess::default()),
            Err(SanError::Illegal)
        );
        assert!("".parse::<San>().is_err());
        assert!("e9x".parse::<San>().is_err());
    }
}
