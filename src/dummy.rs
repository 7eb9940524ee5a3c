//! A rule-free variant for board editing and display-only boards.
//!
//! Any piece of the side to move may go to any other square, nothing ever
//! gives check, and pieces from the pool drop on any empty square. Captured
//! pieces are removed from play.

use crate::{
    board::Board,
    chess::Chess,
    color::{ByColor, Color},
    fen::{FromSetup, Setup},
    m::Move,
    point::Point,
    pool::Pool,
    position::{Position, PositionError},
    types::Piece,
};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Dummy {
    board: Board,
    turn: Color,
    pools: ByColor<Pool>,
}

impl Default for Dummy {
    fn default() -> Dummy {
        let chess = Chess::default();
        Dummy {
            board: chess.board().clone(),
            turn: chess.turn(),
            pools: ByColor::default(),
        }
    }
}

impl Position for Dummy {
    fn board(&self) -> &Board {
        &self.board
    }

    fn turn(&self) -> Color {
        self.turn
    }

    fn pool(&self, color: Color) -> &Pool {
        self.pools.by_color(color)
    }

    fn attacks(&self, _piece: Piece, _from: Point, _to: Point) -> bool {
        false
    }

    fn pseudo_legal(&self, m: Move) -> bool {
        match m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                promotion.is_none()
                    && from != to
                    && self.board.contains(from)
                    && self.board.contains(to)
                    && self
                        .board
                        .piece_at(from)
                        .is_some_and(|piece| piece.color == self.turn && piece.role == role)
                    && self.board.piece_at(to).map(|occupant| occupant.role) == capture
            }
            Move::Drop { role, to } => {
                self.board.contains(to)
                    && self.board.piece_at(to).is_none()
                    && self.pools.by_color(self.turn).count(role) > 0
            }
            Move::EnPassant { .. } | Move::Castle(_) => false,
        }
    }

    fn play_unchecked(&mut self, m: Move) {
        match m {
            Move::Normal { from, to, .. } => {
                let piece = self.board.take(from);
                debug_assert!(piece.is_some(), "played {m} with empty origin");
                self.board.set(to, piece);
            }
            Move::Drop { role, to } => {
                let taken = self.pools.by_color_mut(self.turn).take(role);
                debug_assert!(taken, "dropped {role:?} missing from the pool");
                self.board.set(to, Some(role.of(self.turn)));
            }
            Move::EnPassant { .. } | Move::Castle(_) => {
                debug_assert!(false, "{m} does not exist in the dummy variant");
            }
        }
        self.turn = !self.turn;
    }
}

impl FromSetup for Dummy {
    fn from_setup(setup: &Setup) -> Result<Dummy, PositionError> {
        Ok(Dummy {
            board: setup.board.clone(),
            turn: setup.turn,
            pools: setup.pools.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn test_anything_goes() {
        let pos = Dummy::default();
        let m = pos
            .normal_move(
                "a1".parse().expect("valid square"),
                "h6".parse().expect("valid square"),
                None,
            )
            .expect("movable piece");
        let pos = pos.play(m).expect("any move is legal");
        assert_eq!(
            pos.board().piece_at("h6".parse().expect("valid square")),
            Some(Role::Rook.of(Color::White))
        );
        assert!(!pos.is_check(Color::White));
        assert!(!pos.is_check(Color::Black));
    }

    #[test]
    fn test_full_move_scan_from_start() {
        // 16 pieces, each free to go to any of the 63 other squares
        let pos = Dummy::default();
        assert_eq!(pos.legal_moves().len(), 16 * 63);
        assert!(pos.movable("a1".parse().expect("valid square")));
        assert!(pos.has_legal_moves());
        assert!(!pos.is_checkmate());
    }

    #[test]
    fn test_captured_pieces_leave_play() {
        let pos = Dummy::default();
        let before = pos.board().pieces().count();
        let m = pos
            .normal_move(
                "d1".parse().expect("valid square"),
                "d8".parse().expect("valid square"),
                None,
            )
            .expect("movable piece");
        let pos = pos.play(m).expect("any move is legal");
        assert_eq!(pos.board().pieces().count(), before - 1);
        assert!(pos.pool(Color::White).is_empty());
    }
}
