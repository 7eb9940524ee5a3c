//! Crazyhouse: chess where captured pieces switch sides and can be dropped.

use crate::{
    board::Board,
    chess::{castle_legal, ChessCore, ChessRules},
    color::{ByColor, Color},
    fen::{FromSetup, Setup},
    m::Move,
    point::Point,
    pool::Pool,
    position::{Position, PositionError, Promotions},
    role::Role,
    types::{CastlingRights, Piece},
};

const ZH_RULES: ChessRules = ChessRules {
    double_step: true,
    castling: true,
    track_promoted: true,
};

/// Crazyhouse position: a chess position plus a drop pool per side.
///
/// Captures land in the capturer's pool with their color switched; a
/// promoted piece goes back as a pawn (the board tracks the `promoted`
/// flag for exactly this purpose).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Crazyhouse {
    pub(crate) core: ChessCore,
    pub(crate) pools: ByColor<Pool>,
}

impl Default for Crazyhouse {
    fn default() -> Crazyhouse {
        Crazyhouse {
            core: ChessCore::standard(),
            pools: ByColor::default(),
        }
    }
}

impl Crazyhouse {
    fn drop_pseudo_legal(&self, role: Role, to: Point) -> bool {
        if !self.core.board.contains(to)
            || self.core.board.piece_at(to).is_some()
            || self.pools.by_color(self.core.turn).count(role) == 0
        {
            return false;
        }
        match role {
            Role::King => false,
            // a dropped pawn would be stuck (or instantly promoted) on the
            // edge ranks
            Role::Pawn => to.rank != 0 && to.rank != self.core.board.height() - 1,
            _ => true,
        }
    }
}

impl Position for Crazyhouse {
    fn board(&self) -> &Board {
        &self.core.board
    }

    fn turn(&self) -> Color {
        self.core.turn
    }

    fn pool(&self, color: Color) -> &Pool {
        self.pools.by_color(color)
    }

    fn castling(&self) -> CastlingRights {
        self.core.castling
    }

    fn ep_square(&self) -> Option<Point> {
        self.core.ep_square
    }

    fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool {
        self.core.attacks(piece, from, to)
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        match m {
            Move::Drop { role, to } => self.drop_pseudo_legal(role, to),
            _ => self.core.pseudo_legal(m, &ZH_RULES),
        }
    }

    fn legal(&self, m: Move) -> bool {
        self.pseudo_legal(m) && castle_legal(self, &self.core, m)
    }

    fn play_unchecked(&mut self, m: Move) {
        match m {
            Move::Drop { role, to } => {
                let taken = self.pools.by_color_mut(self.core.turn).take(role);
                debug_assert!(taken, "dropped {role:?} missing from the pool");
                self.core.board.set(to, Some(role.of(self.core.turn)));
                self.core.ep_square = None;
                self.core.turn = !self.core.turn;
            }
            _ => {
                let mover = self.core.turn;
                if let Some(captured) = self.core.apply(m, &ZH_RULES) {
                    self.pools.by_color_mut(mover).add(if captured.promoted {
                        Role::Pawn
                    } else {
                        captured.role
                    });
                }
            }
        }
    }

    fn promotions(&self, from: Point, to: Point) -> Promotions {
        self.core.promotions(from, to)
    }
}

impl FromSetup for Crazyhouse {
    fn from_setup(setup: &Setup) -> Result<Crazyhouse, PositionError> {
        let pools = setup.pools.clone().unwrap_or_default();
        for pool in [&pools.white, &pools.black] {
            if pool.count(Role::King) > 0 {
                return Err(PositionError::UnsupportedRole);
            }
        }
        let pos = Crazyhouse {
            core: ChessCore::from_setup(setup, 8, 8, &ZH_RULES)?,
            pools,
        };
        if pos.is_check(!pos.turn()) {
            return Err(PositionError::OppositeCheck);
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(pos: Crazyhouse, from: &str, to: &str) -> Crazyhouse {
        let m = pos
            .normal_move(
                from.parse().expect("valid square"),
                to.parse().expect("valid square"),
                None,
            )
            .expect("movable piece");
        pos.play(m).expect("legal move")
    }

    // 1. e4 d5 2. exd5: white now owns a pawn to drop.
    fn position_with_pooled_pawn() -> Crazyhouse {
        let pos = Crazyhouse::default();
        let pos = play(pos, "e2", "e4");
        let pos = play(pos, "d7", "d5");
        play(pos, "e4", "d5")
    }

    #[test]
    fn test_capture_feeds_pool() {
        let pos = position_with_pooled_pawn();
        assert_eq!(pos.pool(Color::White).count(Role::Pawn), 1);
        assert!(pos.pool(Color::Black).is_empty());
    }

    #[test]
    fn test_drop_and_pool_conservation() {
        let pos = position_with_pooled_pawn();
        let pos = play(pos, "d8", "d5"); // queen takes the pawn back
        assert_eq!(pos.pool(Color::Black).count(Role::Pawn), 1);

        let before_board = pos.board().pieces().count();
        let before_pool = pos.pool(Color::White).len() + pos.pool(Color::Black).len();

        let pos = play(pos, "b1", "c3");
        let drop = pos
            .drop_move(Role::Pawn, "e4".parse().expect("valid square"))
            .expect("pool has a black pawn");
        let pos = pos.play(drop).expect("legal drop");
        assert_eq!(
            pos.board().piece_at("e4".parse().expect("valid square")),
            Some(Color::Black.pawn())
        );
        assert!(pos.pool(Color::Black).is_empty());
        let after_board = pos.board().pieces().count();
        let after_pool = pos.pool(Color::White).len() + pos.pool(Color::Black).len();
        assert_eq!(
            before_board + before_pool,
            after_board + after_pool,
            "no piece vanishes or duplicates across capture/drop sequences"
        );
    }

    #[test]
    fn test_no_pawn_drops_on_edge_ranks() {
        let pos = position_with_pooled_pawn();
        let pos = play(pos, "g8", "f6");
        assert!(pos.droppable(Role::Pawn));
        for to in ["a1", "a8"] {
            assert!(!pos.legal(Move::Drop {
                role: Role::Pawn,
                to: to.parse().expect("valid square"),
            }));
        }
    }

    #[test]
    fn test_drops_only_on_empty_squares() {
        let pos = position_with_pooled_pawn();
        let pos = play(pos, "g8", "f6");
        assert!(!pos.legal(Move::Drop {
            role: Role::Pawn,
            to: "e7".parse().expect("valid square"),
        }));
    }

    #[test]
    fn test_promoted_piece_demotes_on_capture() {
        // Fast-forward to a promotion via FEN, capture the promoted queen
        // and check the pool receives a pawn.
        let pos: Crazyhouse = "k7/8/8/8/8/8/4p3/4KR2 b - -"
            .parse::<crate::fen::Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal setup");
        let promote = pos
            .normal_move(
                "e2".parse().expect("valid square"),
                "f1".parse().expect("valid square"),
                Some(Role::Queen),
            )
            .expect("pawn promotion resolves");
        let pos = pos.play(promote).expect("legal promotion");
        let queen = pos
            .board()
            .piece_at("f1".parse().expect("valid square"))
            .expect("promoted piece on f1");
        assert!(queen.promoted);

        let capture = pos
            .normal_move(
                "e1".parse().expect("valid square"),
                "f1".parse().expect("valid square"),
                None,
            )
            .expect("king capture resolves");
        let pos = pos.play(capture).expect("legal capture");
        assert_eq!(pos.pool(Color::White).count(Role::Pawn), 1);
        assert_eq!(pos.pool(Color::White).count(Role::Queen), 0);
    }
}
