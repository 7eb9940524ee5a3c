//! Variant selection and dynamic dispatch.
//!
//! [`VariantPosition`] wraps the concrete position types behind one value
//! type so that callers driven by runtime variant names (the network feed,
//! the UI) do not need generics. It also routes move serialization to the
//! right notation family per variant.

use std::fmt;

use crate::{
    board::Board,
    chess::{Chess, MiniChess},
    color::Color,
    coord::Coord,
    crazyhouse::Crazyhouse,
    decorated,
    dummy::Dummy,
    fen::{FromSetup, Setup},
    m::Move,
    point::Point,
    pool::Pool,
    position::{Position, PositionError, Promotions},
    san::{SanError, SanPlus},
    shogi::{MiniShogi, Shogi, ShogiSan},
    types::{CastlingRights, Piece},
};

/// The supported game variants.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Variant {
    Chess,
    MiniChess,
    Crazyhouse,
    Shogi,
    MiniShogi,
    /// A rule-free variant for board editing.
    Dummy,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Chess,
        Variant::MiniChess,
        Variant::Crazyhouse,
        Variant::Shogi,
        Variant::MiniShogi,
        Variant::Dummy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Chess => "chess",
            Variant::MiniChess => "minichess",
            Variant::Crazyhouse => "crazyhouse",
            Variant::Shogi => "shogi",
            Variant::MiniShogi => "minishogi",
            Variant::Dummy => "dummy",
        }
    }

    /// Whether moves are written in the shogi notation family rather than
    /// SAN.
    pub const fn uses_shogi_notation(self) -> bool {
        matches!(self, Variant::Shogi | Variant::MiniShogi)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a move is rendered as text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveFormat {
    /// Coordinate notation, e.g. `e2e4`. Needs no disambiguation and always
    /// round-trips.
    Simple,
    /// The variant's standard notation: SAN with a check suffix, or shogi
    /// notation for the shogi family.
    Compact,
    /// The compact form with piece letters replaced by figurine tokens.
    Decorated,
}

/// Error when deserializing a move string against a position.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("syntactically invalid move notation")]
    Syntax,
    #[error("move is not legal in the reference position")]
    Illegal,
    #[error("notation matches more than one legal move")]
    Ambiguous,
}

impl From<SanError> for DeserializeError {
    fn from(err: SanError) -> DeserializeError {
        match err {
            SanError::Illegal => DeserializeError::Illegal,
            SanError::Ambiguous => DeserializeError::Ambiguous,
        }
    }
}

/// A [`Position`] of any supported variant.
#[allow(missing_docs)]
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum VariantPosition {
    Chess(Chess),
    MiniChess(MiniChess),
    Crazyhouse(Crazyhouse),
    Shogi(Shogi),
    MiniShogi(MiniShogi),
    Dummy(Dummy),
}

macro_rules! dispatch {
    ($self:expr, $pos:ident => $expr:expr) => {
        match $self {
            VariantPosition::Chess($pos) => $expr,
            VariantPosition::MiniChess($pos) => $expr,
            VariantPosition::Crazyhouse($pos) => $expr,
            VariantPosition::Shogi($pos) => $expr,
            VariantPosition::MiniShogi($pos) => $expr,
            VariantPosition::Dummy($pos) => $expr,
        }
    };
}

impl VariantPosition {
    /// The standard starting position of a variant.
    pub fn new(variant: Variant) -> VariantPosition {
        match variant {
            Variant::Chess => VariantPosition::Chess(Chess::default()),
            Variant::MiniChess => VariantPosition::MiniChess(MiniChess::default()),
            Variant::Crazyhouse => VariantPosition::Crazyhouse(Crazyhouse::default()),
            Variant::Shogi => VariantPosition::Shogi(Shogi::default()),
            Variant::MiniShogi => VariantPosition::MiniShogi(MiniShogi::default()),
            Variant::Dummy => VariantPosition::Dummy(Dummy::default()),
        }
    }

    /// Validates a setup against a variant's rules.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if the setup is not a legal position of
    /// the variant.
    pub fn from_setup(variant: Variant, setup: &Setup) -> Result<VariantPosition, PositionError> {
        Ok(match variant {
            Variant::Chess => VariantPosition::Chess(Chess::from_setup(setup)?),
            Variant::MiniChess => VariantPosition::MiniChess(MiniChess::from_setup(setup)?),
            Variant::Crazyhouse => VariantPosition::Crazyhouse(Crazyhouse::from_setup(setup)?),
            Variant::Shogi => VariantPosition::Shogi(Shogi::from_setup(setup)?),
            Variant::MiniShogi => VariantPosition::MiniShogi(MiniShogi::from_setup(setup)?),
            Variant::Dummy => VariantPosition::Dummy(Dummy::from_setup(setup)?),
        })
    }

    pub fn variant(&self) -> Variant {
        match self {
            VariantPosition::Chess(_) => Variant::Chess,
            VariantPosition::MiniChess(_) => Variant::MiniChess,
            VariantPosition::Crazyhouse(_) => Variant::Crazyhouse,
            VariantPosition::Shogi(_) => Variant::Shogi,
            VariantPosition::MiniShogi(_) => Variant::MiniShogi,
            VariantPosition::Dummy(_) => Variant::Dummy,
        }
    }

    /// Renders a legal move in the requested format.
    pub fn serialize_move(&self, m: Move, format: MoveFormat) -> String {
        match format {
            MoveFormat::Simple => dispatch!(self, pos => Coord::from_move(pos, m)).to_string(),
            MoveFormat::Compact => self.compact(m),
            MoveFormat::Decorated => decorated::decorate(&self.compact(m)),
        }
    }

    fn compact(&self, m: Move) -> String {
        if self.variant().uses_shogi_notation() {
            let board = self.board();
            dispatch!(self, pos => ShogiSan::from_move(pos, m))
                .write(board.width(), board.height())
        } else {
            dispatch!(self, pos => SanPlus::from_move(pos, m)).to_string()
        }
    }

    /// Parses a move string in the requested format and resolves it against
    /// this position.
    ///
    /// # Errors
    ///
    /// Returns a [`DeserializeError`]; malformed and ambiguous notation are
    /// reported, never guessed at.
    pub fn deserialize_move(&self, s: &str, format: MoveFormat) -> Result<Move, DeserializeError> {
        match format {
            MoveFormat::Simple => {
                let coord: Coord = s.parse().map_err(|_| DeserializeError::Syntax)?;
                Ok(dispatch!(self, pos => coord.to_move(pos))?)
            }
            MoveFormat::Compact => self.parse_compact(s),
            MoveFormat::Decorated => {
                let plain = decorated::undecorate(s).ok_or(DeserializeError::Syntax)?;
                self.parse_compact(&plain)
            }
        }
    }

    fn parse_compact(&self, s: &str) -> Result<Move, DeserializeError> {
        if self.variant().uses_shogi_notation() {
            let board = self.board();
            let san = ShogiSan::from_ascii(s.as_bytes(), board.width(), board.height())
                .map_err(|_| DeserializeError::Syntax)?;
            Ok(dispatch!(self, pos => san.to_move(pos))?)
        } else {
            let san: SanPlus = s.parse().map_err(|_| DeserializeError::Syntax)?;
            Ok(dispatch!(self, pos => san.san.to_move(pos))?)
        }
    }
}

impl Position for VariantPosition {
    fn board(&self) -> &Board {
        dispatch!(self, pos => pos.board())
    }

    fn turn(&self) -> Color {
        dispatch!(self, pos => pos.turn())
    }

    fn pool(&self, color: Color) -> &Pool {
        dispatch!(self, pos => pos.pool(color))
    }

    fn castling(&self) -> CastlingRights {
        dispatch!(self, pos => pos.castling())
    }

    fn ep_square(&self) -> Option<Point> {
        dispatch!(self, pos => pos.ep_square())
    }

    fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        dispatch!(self, pos => pos.attacks(piece, from, to))
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        dispatch!(self, pos => pos.pseudo_legal(m))
    }

    fn legal(&self, m: Move) -> bool {
        dispatch!(self, pos => pos.legal(m))
    }

    fn play_unchecked(&mut self, m: Move) {
        dispatch!(self, pos => pos.play_unchecked(m))
    }

    fn promotions(&self, from: Point, to: Point) -> Promotions {
        dispatch!(self, pos => pos.promotions(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn resolve(pos: &VariantPosition, s: &str, format: MoveFormat) -> Move {
        pos.deserialize_move(s, format)
            .expect("unique legal move")
    }

    #[test]
    fn test_san_scenario() {
        // e4, e5, Nc3 from the standard setup
        let mut pos = VariantPosition::new(Variant::Chess);
        for (simple, compact) in [("e2e4", "e4"), ("e7e5", "e5"), ("b1c3", "Nc3")] {
            let m = resolve(&pos, simple, MoveFormat::Simple);
            assert_eq!(pos.serialize_move(m, MoveFormat::Compact), *compact);
            assert_eq!(resolve(&pos, compact, MoveFormat::Compact), m);
            pos.play_unchecked(m);
        }
    }

    #[test]
    fn test_format_routing() {
        let pos = VariantPosition::new(Variant::Chess);
        let m = resolve(&pos, "Nf3", MoveFormat::Compact);
        assert_eq!(pos.serialize_move(m, MoveFormat::Simple), "g1f3");
        assert_eq!(
            pos.serialize_move(m, MoveFormat::Decorated),
            "{knight}f3"
        );
        assert_eq!(resolve(&pos, "{knight}f3", MoveFormat::Decorated), m);

        let shogi = VariantPosition::new(Variant::Shogi);
        let m = resolve(&shogi, "P-5f", MoveFormat::Compact);
        assert_eq!(shogi.serialize_move(m, MoveFormat::Compact), "P-5f");
    }

    #[test]
    fn test_minishogi_compact_uses_board_size() {
        let pos = VariantPosition::new(Variant::MiniShogi);
        // the white pawn sits on 5d and pushes to 5c
        let m = pos
            .normal_move(Point::new(0, 1), Point::new(0, 2), None)
            .expect("pawn move resolves");
        assert!(pos.legal(m));
        assert_eq!(pos.serialize_move(m, MoveFormat::Compact), "P-5c");
        assert_eq!(resolve(&pos, "P-5c", MoveFormat::Compact), m);
    }

    #[test]
    fn test_errors_are_reported_not_guessed() {
        let pos = VariantPosition::new(Variant::Chess);
        assert_eq!(
            pos.deserialize_move("!!", MoveFormat::Compact),
            Err(DeserializeError::Syntax)
        );
        assert_eq!(
            pos.deserialize_move("Ke2", MoveFormat::Compact),
            Err(DeserializeError::Illegal)
        );
        assert_eq!(
            pos.deserialize_move("N@e5", MoveFormat::Compact),
            Err(DeserializeError::Illegal)
        );
    }

    #[test]
    fn test_drop_scenario() {
        let setup = "k7/8/8/8/8/8/8/6K1[Nn] w - -"
            .parse::<crate::fen::Fen>()
            .expect("valid fen")
            .into_setup();
        let pos = VariantPosition::from_setup(Variant::Crazyhouse, &setup)
            .expect("legal setup");
        let m = resolve(&pos, "N@e5", MoveFormat::Compact);
        assert_eq!(
            m,
            Move::Drop {
                role: Role::Knight,
                to: Point::new(4, 4),
            }
        );
        assert_eq!(pos.serialize_move(m, MoveFormat::Simple), "N@e5");
    }
}
