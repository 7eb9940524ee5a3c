//! A library for multi-variant board-game rules and move notation.
//!
//! Positions of chess, minichess, crazyhouse, shogi and minishogi share one
//! [`Position`] trait: legality checking simulates candidate moves on a
//! scratch clone and verifies king safety, so variants only describe piece
//! movement and move application.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use scacchi::{Chess, Position};
//!
//! let pos = Chess::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use scacchi::{Chess, Move, Point, Position, Role};
//!
//! let pos = Chess::default();
//!
//! // 1. e4
//! let pos = pos.play(Move::Normal {
//!     role: Role::Pawn,
//!     from: Point::new(4, 1),
//!     capture: None,
//!     to: Point::new(4, 3),
//!     promotion: None,
//! })?;
//! assert!(!pos.is_checkmate());
//! # Ok::<_, scacchi::PlayError<_>>(())
//! ```
//!
//! Convert moves to and from [SAN](san), [coordinate notation](coord) and
//! shogi notation, select variants by name through the [registry], and
//! reconcile a server-authoritative game feed with [ics].

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod board;
mod chess;
mod color;
mod crazyhouse;
mod dummy;
mod m;
mod point;
mod pool;
mod position;
mod role;
mod shogi;
mod types;

pub mod coord;
pub mod decorated;
pub mod fen;
pub mod ics;
pub mod registry;
pub mod san;
pub mod variant;

pub use crate::{
    board::{Board, Direction, Path},
    chess::{Chess, MiniChess},
    color::{ByColor, Color, ParseColorError},
    crazyhouse::Crazyhouse,
    dummy::Dummy,
    m::{Move, MoveList},
    point::{ParsePointError, Point},
    pool::Pool,
    position::{PlayError, Position, PositionError, Promotions},
    role::Role,
    shogi::{MiniShogi, Shogi, ShogiSan},
    types::{CastlingRights, CastlingSide, Piece},
};
