use arrayvec::ArrayVec;

use crate::{
    board::Board,
    color::Color,
    m::{Move, MoveList},
    point::Point,
    pool::{Pool, EMPTY_POOL},
    role::Role,
    types::{CastlingRights, CastlingSide, Piece},
};

/// Promotion choices for one `(from, to)` pair. Chess offers up to four;
/// shogi at most two (promote or not).
pub type Promotions = ArrayVec<Option<Role>, 4>;

/// Error when playing an illegal move. Returns the untouched position.
#[derive(Clone, Debug, thiserror::Error)]
#[error("illegal move {m} in the current position")]
pub struct PlayError<P> {
    pub pos: P,
    pub m: Move,
}

/// Error when a [`Setup`](crate::fen::Setup) cannot be validated into a
/// position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("board size not supported by the variant")]
    WrongBoardSize,
    #[error("missing king")]
    MissingKing,
    #[error("too many kings")]
    TooManyKings,
    #[error("pawn on the backrank")]
    PawnOnBackrank,
    #[error("castling rights do not match piece placement")]
    BadCastlingRights,
    #[error("en passant square does not match piece placement")]
    BadEpSquare,
    #[error("pool not supported by the variant")]
    UnsupportedPool,
    #[error("piece type not used by the variant")]
    UnsupportedRole,
    #[error("side not to move is already giving check")]
    OppositeCheck,
}

/// A game position of some variant: board, pools, side to move and move
/// rights, plus the variant's legality rules.
///
/// A variant implements the required hooks (`attacks`, `pseudo_legal`,
/// `play_unchecked`, and the state accessors); the generic legality check,
/// move enumeration and user-input plumbing are provided on top of them.
///
/// Positions compare structurally (board, pools, turn, rights — never
/// history) and clone deeply: legality checking simulates candidate moves on
/// a scratch clone and must not alias the original.
pub trait Position: Clone + PartialEq + Sized {
    fn board(&self) -> &Board;

    fn turn(&self) -> Color;

    /// The drop pool of the given color. Empty for variants without pools.
    fn pool(&self, _color: Color) -> &Pool {
        &EMPTY_POOL
    }

    fn castling(&self) -> CastlingRights {
        CastlingRights::empty()
    }

    /// The square a pawn may capture onto en passant, if any.
    fn ep_square(&self) -> Option<Point> {
        None
    }

    /// Whether `piece`, standing on `from`, could capture on `to` by its
    /// movement shape and path clearance, regardless of what occupies `to`.
    ///
    /// Quiet-move-only shapes (chess pawn pushes) are not attacks and are
    /// handled by [`Position::pseudo_legal`] alone.
    fn attacks(&self, piece: Piece, from: Point, to: Point) -> bool;

    /// Shape-only legality: the movement rules of the piece (or drop) are
    /// obeyed, ignoring whether the mover's own king is left exposed.
    fn pseudo_legal(&self, m: Move) -> bool;

    /// Applies a move that has already passed [`Position::legal`].
    ///
    /// Playing an unvalidated move is undefined by contract: it may corrupt
    /// the position. Implementations assert what is cheap to assert in debug
    /// builds and do not re-validate in release builds.
    fn play_unchecked(&mut self, m: Move);

    /// Promotion choices to consider for moving from `from` to `to`;
    /// `[None]` where promotion does not apply.
    fn promotions(&self, _from: Point, _to: Point) -> Promotions {
        let mut choices = Promotions::new();
        choices.push(None);
        choices
    }

    /// Locates the king of the given color.
    fn king(&self, color: Color) -> Option<Point> {
        self.board().king_of(color)
    }

    /// Whether any piece of `by` attacks `p` (full board scan).
    fn attacked(&self, p: Point, by: Color) -> bool {
        self.board()
            .pieces()
            .any(|(q, piece)| piece.color == by && self.attacks(piece, q, p))
    }

    fn is_check(&self, color: Color) -> bool {
        self.king(color)
            .is_some_and(|k| self.attacked(k, !color))
    }

    /// Full legality: pseudo-legal, and the mover's king is not capturable
    /// after simulating the move on a scratch clone. Never mutates `self`.
    fn legal(&self, m: Move) -> bool {
        self.pseudo_legal(m) && king_safe_after(self, m)
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns a [`PlayError`] holding the unchanged position if the move is
    /// illegal.
    fn play(mut self, m: Move) -> Result<Self, PlayError<Self>> {
        if self.legal(m) {
            self.play_unchecked(m);
            Ok(self)
        } else {
            Err(PlayError { pos: self, m })
        }
    }

    /// Constructs a typed move from user-level from/to/promotion input,
    /// resolving castling (king sliding two files), en passant and the
    /// capture payload. Returns `None` when no piece of the side to move
    /// stands on `from` or the squares make no sense; legality is checked
    /// separately.
    fn normal_move(&self, from: Point, to: Point, promotion: Option<Role>) -> Option<Move> {
        if !self.board().contains(from) || !self.board().contains(to) {
            return None;
        }
        let piece = self.board().piece_at(from)?;
        if piece.color != self.turn() {
            return None;
        }
        if piece.role == Role::King
            && from.rank == to.rank
            && (to.file - from.file).abs() == 2
            && !self.castling().is_empty()
        {
            return Some(Move::Castle(CastlingSide::from_king_side(
                to.file > from.file,
            )));
        }
        if piece.role == Role::Pawn
            && self.ep_square() == Some(to)
            && to.file != from.file
            && self.board().piece_at(to).is_none()
        {
            return Some(Move::EnPassant { from, to });
        }
        Some(Move::Normal {
            role: piece.role,
            from,
            capture: self.board().piece_at(to).map(|captured| captured.role),
            to,
            promotion,
        })
    }

    /// Constructs a drop move from user-level input. Returns `None` when the
    /// pool has no such piece or `to` is off the board.
    fn drop_move(&self, role: Role, to: Point) -> Option<Move> {
        if self.pool(self.turn()).count(role) == 0 || !self.board().contains(to) {
            return None;
        }
        Some(Move::Drop { role, to })
    }

    /// The piece as it will appear on the destination square, for move
    /// hints and drag previews.
    fn moved_piece(&self, m: Move) -> Option<Piece> {
        match m {
            Move::Normal {
                from, promotion, ..
            } => {
                let piece = self.board().piece_at(from)?;
                Some(match promotion {
                    Some(role) if role == piece.role => piece.promote(),
                    Some(role) => Piece { role, ..piece },
                    None => piece,
                })
            }
            Move::EnPassant { from, .. } => self.board().piece_at(from),
            Move::Castle(_) => Some(self.turn().king()),
            Move::Drop { role, .. } => Some(role.of(self.turn())),
        }
    }

    /// Enumerates all legal moves by scanning the board (and pool). The
    /// order follows the raster scan and is deterministic.
    fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let turn = self.turn();
        for (from, piece) in self.board().pieces() {
            if piece.color != turn {
                continue;
            }
            for to in self.board().points() {
                if to == from {
                    continue;
                }
                for promotion in self.promotions(from, to) {
                    let Some(m) = self.normal_move(from, to, promotion) else {
                        continue;
                    };
                    if m.is_castle() {
                        // enumerated once below
                        continue;
                    }
                    if self.legal(m) {
                        moves.push(m);
                    }
                }
            }
        }
        for side in CastlingSide::ALL {
            let m = Move::Castle(side);
            if self.legal(m) {
                moves.push(m);
            }
        }
        for role in self.pool(turn).roles() {
            for to in self.board().points() {
                if self.board().piece_at(to).is_none() {
                    let m = Move::Drop { role, to };
                    if self.legal(m) {
                        moves.push(m);
                    }
                }
            }
        }
        moves
    }

    fn has_legal_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    fn is_checkmate(&self) -> bool {
        self.is_check(self.turn()) && !self.has_legal_moves()
    }

    /// Legal board moves of a piece of the given role ending on `to`; the
    /// candidate set SAN disambiguation works over. Drops never take part:
    /// they are spelled with `@` and must not shadow a board move.
    fn san_candidates(&self, role: Role, to: Point) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| {
            !m.is_castle() && !m.is_drop() && m.role() == role && m.to() == Some(to)
        });
        moves
    }

    /// UI affordance: whether the piece on `p` belongs to the side to move
    /// and has at least one legal move.
    fn movable(&self, p: Point) -> bool {
        if !self.board().contains(p) {
            return false;
        }
        let Some(piece) = self.board().piece_at(p) else {
            return false;
        };
        if piece.color != self.turn() {
            return false;
        }
        self.legal_moves()
            .iter()
            .any(|m| m.from() == Some(p) || (m.is_castle() && piece.role == Role::King))
    }

    /// UI affordance: whether a piece of the given role can be dropped from
    /// the pool anywhere.
    fn droppable(&self, role: Role) -> bool {
        self.pool(self.turn()).count(role) > 0
            && self.board().points().any(|to| {
                self.board().piece_at(to).is_none() && self.legal(Move::Drop { role, to })
            })
    }
}

/// Simulates `m` on a scratch clone and checks that the mover's king (if
/// present) is not attacked afterwards.
pub(crate) fn king_safe_after<P: Position>(pos: &P, m: Move) -> bool {
    let mover = pos.turn();
    let mut scratch = pos.clone();
    scratch.play_unchecked(m);
    match scratch.king(mover) {
        Some(k) => !scratch.attacked(k, !mover),
        None => true,
    }
}
