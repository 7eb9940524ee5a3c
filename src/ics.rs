//! Internet Chess Server verbose notation and server reconciliation.
//!
//! A server feed delivers each half-move twice: as verbose notation (e.g.
//! `P/e2-e4`) and usually also as SAN, together with a snapshot of the
//! position after the move. The server is authoritative: local legality
//! checking and recomputation are diagnostics that detect a desynchronized
//! or buggy feed, they never override it.

use std::{fmt, str::FromStr};

use crate::{
    m::Move,
    point::Point,
    position::Position,
    role::Role,
    san::SanError,
    types::CastlingSide,
    variant::{MoveFormat, VariantPosition},
};

/// Error when parsing invalid verbose notation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("invalid verbose notation")]
pub struct ParseVerboseError;

/// A move in ICS verbose notation: `P/e2-e4`, `P/e7-e8=Q`, `N/@@-e5`,
/// `o-o`, `o-o-o` or `none`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Verbose {
    Normal {
        role: Role,
        from: Point,
        to: Point,
        promotion: Option<Role>,
    },
    Drop {
        role: Role,
        to: Point,
    },
    Castle(CastlingSide),
    /// The `none` literal sent before the first move of a game.
    None,
}

impl Verbose {
    pub fn from_ascii(s: &[u8]) -> Result<Verbose, ParseVerboseError> {
        match s {
            b"none" => return Ok(Verbose::None),
            b"o-o" | b"O-O" => return Ok(Verbose::Castle(CastlingSide::KingSide)),
            b"o-o-o" | b"O-O-O" => return Ok(Verbose::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        let [letter, b'/', rest @ ..] = s else {
            return Err(ParseVerboseError);
        };
        let role = Role::from_char(char::from(*letter))
            .filter(|_| letter.is_ascii_uppercase())
            .ok_or(ParseVerboseError)?;

        let (rest, promotion) = match rest {
            [init @ .., b'=', promo] => (
                init,
                Some(
                    Role::from_char(char::from(*promo))
                        .filter(|_| promo.is_ascii_uppercase())
                        .ok_or(ParseVerboseError)?,
                ),
            ),
            _ => (rest, None),
        };

        let dash = rest
            .iter()
            .position(|&ch| ch == b'-')
            .ok_or(ParseVerboseError)?;
        let (origin, dest) = (&rest[..dash], &rest[dash + 1..]);
        let to = Point::from_ascii(dest).map_err(|_| ParseVerboseError)?;

        if origin == b"@@" {
            if promotion.is_some() {
                return Err(ParseVerboseError);
            }
            return Ok(Verbose::Drop { role, to });
        }
        let from = Point::from_ascii(origin).map_err(|_| ParseVerboseError)?;
        Ok(Verbose::Normal {
            role,
            from,
            to,
            promotion,
        })
    }

    /// Resolves the notation against the position before the move.
    ///
    /// # Errors
    ///
    /// Returns [`SanError::Illegal`] when no matching legal move exists.
    pub fn to_move<P: Position>(&self, pos: &P) -> Result<Move, SanError> {
        let m = match *self {
            Verbose::Normal {
                role,
                from,
                to,
                promotion,
            } => {
                let m = pos
                    .normal_move(from, to, promotion)
                    .ok_or(SanError::Illegal)?;
                if m.role() != role && !m.is_castle() {
                    return Err(SanError::Illegal);
                }
                m
            }
            Verbose::Drop { role, to } => Move::Drop { role, to },
            Verbose::Castle(side) => Move::Castle(side),
            Verbose::None => return Err(SanError::Illegal),
        };
        if pos.legal(m) {
            Ok(m)
        } else {
            Err(SanError::Illegal)
        }
    }

    /// Converts a legal move to verbose notation.
    pub fn from_move(m: Move) -> Verbose {
        match m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => Verbose::Normal {
                role,
                from,
                to,
                promotion,
            },
            Move::EnPassant { from, to } => Verbose::Normal {
                role: Role::Pawn,
                from,
                to,
                promotion: None,
            },
            Move::Castle(side) => Verbose::Castle(side),
            Move::Drop { role, to } => Verbose::Drop { role, to },
        }
    }
}

impl FromStr for Verbose {
    type Err = ParseVerboseError;

    fn from_str(s: &str) -> Result<Verbose, ParseVerboseError> {
        Verbose::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Verbose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Verbose::Normal {
                role,
                from,
                to,
                promotion,
            } => {
                write!(f, "{}/{}-{}", role.upper_char(), from, to)?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            Verbose::Drop { role, to } => write!(f, "{}/@@-{}", role.upper_char(), to),
            Verbose::Castle(CastlingSide::KingSide) => f.write_str("o-o"),
            Verbose::Castle(CastlingSide::QueenSide) => f.write_str("o-o-o"),
            Verbose::None => f.write_str("none"),
        }
    }
}

/// One half-move as delivered by the server.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RemoteMove {
    /// The verbose notation string.
    pub verbose: String,
    /// The SAN rendering of the same move, when the server sent one.
    pub san: Option<String>,
}

/// A disagreement between the feed and local computation.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Inconsistency {
    #[error("remote move does not parse as verbose notation")]
    UnparsableMove,
    #[error("remote move is not legal in the previous position")]
    IllegalMove,
    #[error("locally recomputed position differs from the claimed snapshot")]
    PositionMismatch,
    #[error("remote san does not match the verbose move")]
    SanMismatch,
}

/// The outcome of reconciling one remote half-move.
///
/// `position` is always the server's claimed snapshot, whatever the
/// diagnostics say.
#[derive(Clone, Debug)]
pub struct Reconciled {
    pub position: VariantPosition,
    /// The move as resolved locally, when it parsed and was legal.
    pub move_played: Option<Move>,
    pub inconsistencies: Vec<Inconsistency>,
}

/// Checks one remote half-move against local rules.
///
/// Parses the verbose notation, tests it against `prev`, replays it on a
/// clone and compares the result with `claimed`; when the server also sent
/// SAN, cross-checks that it resolves to the same move. Every disagreement
/// is recorded and logged, and the claimed position is adopted regardless.
pub fn reconcile(
    prev: &VariantPosition,
    remote: &RemoteMove,
    claimed: &VariantPosition,
) -> Reconciled {
    let mut inconsistencies = Vec::new();
    let mut move_played = None;

    match remote.verbose.parse::<Verbose>() {
        Err(_) => {
            tracing::warn!(verbose = %remote.verbose, "unparsable remote move");
            inconsistencies.push(Inconsistency::UnparsableMove);
        }
        Ok(verbose) => match verbose.to_move(prev) {
            Err(_) => {
                tracing::warn!(verbose = %remote.verbose, "illegal remote move");
                inconsistencies.push(Inconsistency::IllegalMove);
            }
            Ok(m) => {
                move_played = Some(m);
                let mut local = prev.clone();
                local.play_unchecked(m);
                if local != *claimed {
                    tracing::warn!(
                        verbose = %remote.verbose,
                        "recomputed position differs from the claimed snapshot"
                    );
                    inconsistencies.push(Inconsistency::PositionMismatch);
                }
                if let Some(san) = &remote.san {
                    let agrees = matches!(
                        prev.deserialize_move(san, MoveFormat::Compact),
                        Ok(san_move) if san_move == m
                    );
                    if !agrees {
                        tracing::warn!(verbose = %remote.verbose, san = %san, "san mismatch");
                        inconsistencies.push(Inconsistency::SanMismatch);
                    }
                }
            }
        },
    }

    Reconciled {
        position: claimed.clone(),
        move_played,
        inconsistencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn remote(verbose: &str, san: Option<&str>) -> RemoteMove {
        RemoteMove {
            verbose: verbose.to_string(),
            san: san.map(str::to_string),
        }
    }

    #[test]
    fn test_verbose_round_trip() {
        for s in ["P/e2-e4", "N/g1-f3", "P/e7-e8=Q", "N/@@-e5", "o-o", "none"] {
            let parsed: Verbose = s.parse().expect("valid verbose notation");
            assert_eq!(parsed.to_string(), *s);
        }
        assert!("Q-e4".parse::<Verbose>().is_err());
        assert!("P/e2".parse::<Verbose>().is_err());
    }

    #[test]
    fn test_consistent_feed() {
        let prev = VariantPosition::new(Variant::Chess);
        let m = prev
            .deserialize_move("e2e4", MoveFormat::Simple)
            .expect("legal move");
        let mut claimed = prev.clone();
        claimed.play_unchecked(m);

        let result = reconcile(&prev, &remote("P/e2-e4", Some("e4")), &claimed);
        assert!(result.inconsistencies.is_empty());
        assert_eq!(result.move_played, Some(m));
        assert_eq!(result.position, claimed);
    }

    #[test]
    fn test_position_mismatch_adopts_claimed_snapshot() {
        let prev = VariantPosition::new(Variant::Chess);
        // the server claims e2-e4 led to the position after d2-d4
        let wrong = prev
            .deserialize_move("d2d4", MoveFormat::Simple)
            .expect("legal move");
        let mut claimed = prev.clone();
        claimed.play_unchecked(wrong);

        let result = reconcile(&prev, &remote("P/e2-e4", None), &claimed);
        assert_eq!(result.inconsistencies, [Inconsistency::PositionMismatch]);
        assert_eq!(result.position, claimed, "the claimed snapshot wins");
    }

    #[test]
    fn test_unparsable_and_illegal_moves() {
        let prev = VariantPosition::new(Variant::Chess);
        let claimed = prev.clone();

        let result = reconcile(&prev, &remote("garbage", None), &claimed);
        assert_eq!(result.inconsistencies, [Inconsistency::UnparsableMove]);
        assert_eq!(result.move_played, None);
        assert_eq!(result.position, claimed);

        let result = reconcile(&prev, &remote("N/g1-g3", None), &claimed);
        assert_eq!(result.inconsistencies, [Inconsistency::IllegalMove]);
        assert_eq!(result.position, claimed);
    }

    #[test]
    fn test_san_cross_check() {
        let prev = VariantPosition::new(Variant::Chess);
        let m = prev
            .deserialize_move("e2e4", MoveFormat::Simple)
            .expect("legal move");
        let mut claimed = prev.clone();
        claimed.play_unchecked(m);

        let result = reconcile(&prev, &remote("P/e2-e4", Some("d4")), &claimed);
        assert_eq!(result.inconsistencies, [Inconsistency::SanMismatch]);
        assert_eq!(result.move_played, Some(m));
    }
}
