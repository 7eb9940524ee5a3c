//! A rectangular grid of pieces.

use std::fmt;

use crate::{color::Color, point::Point, role::Role, types::Piece};

/// Alignment of the segment between two squares.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Direction {
    None,
    Horizontal,
    Vertical,
    /// Diagonal along which file and rank grow together.
    Diagonal1,
    /// Diagonal along which file grows as rank shrinks.
    Diagonal2,
}

/// Result of a [`Board::path`] query.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Path {
    pub direction: Direction,
    /// Whether every square strictly between the endpoints is empty.
    /// Always `false` for unaligned pairs and for `from == to`.
    pub clear: bool,
}

impl Path {
    pub const fn parallel(self) -> bool {
        matches!(self.direction, Direction::Horizontal | Direction::Vertical)
    }

    pub const fn diagonal(self) -> bool {
        matches!(self.direction, Direction::Diagonal1 | Direction::Diagonal2)
    }

    pub const fn valid(self) -> bool {
        !matches!(self.direction, Direction::None)
    }
}

/// A `width × height` grid of squares, each holding at most one [`Piece`].
///
/// Every variant fixes its board size at setup; out-of-range access fails a
/// `debug_assert!` and degrades to "empty square" / no-op in release builds.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    width: i8,
    height: i8,
    squares: Vec<Option<Piece>>,
}

impl Board {
    pub fn empty(width: i8, height: i8) -> Board {
        assert!(width > 0 && height > 0);
        Board {
            width,
            height,
            squares: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> i8 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> i8 {
        self.height
    }

    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        0 <= p.file && p.file < self.width && 0 <= p.rank && p.rank < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.rank as usize * self.width as usize + p.file as usize
    }

    pub fn piece_at(&self, p: Point) -> Option<Piece> {
        debug_assert!(self.contains(p), "piece_at({p}) out of range");
        if self.contains(p) {
            self.squares[self.index(p)]
        } else {
            None
        }
    }

    pub fn role_at(&self, p: Point) -> Option<Role> {
        self.piece_at(p).map(|piece| piece.role)
    }

    pub fn set(&mut self, p: Point, piece: Option<Piece>) {
        debug_assert!(self.contains(p), "set({p}) out of range");
        if self.contains(p) {
            let idx = self.index(p);
            self.squares[idx] = piece;
        }
    }

    /// Removes and returns the piece at `p`.
    pub fn take(&mut self, p: Point) -> Option<Piece> {
        debug_assert!(self.contains(p), "take({p}) out of range");
        if self.contains(p) {
            let idx = self.index(p);
            self.squares[idx].take()
        } else {
            None
        }
    }

    /// Deterministic row-major raster scan over all squares: rank 0 first,
    /// files left to right. Full-board searches (king location, notation
    /// disambiguation) rely on this order being stable and total.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |rank| (0..width).map(move |file| Point::new(file, rank)))
    }

    /// Occupied squares in raster-scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Piece)> + '_ {
        self.points()
            .filter_map(|p| self.squares[self.index(p)].map(|piece| (p, piece)))
    }

    /// Locates the king of the given color, if any.
    pub fn king_of(&self, color: Color) -> Option<Point> {
        self.pieces()
            .find(|(_, piece)| piece.role == Role::King && piece.color == color)
            .map(|(p, _)| p)
    }

    /// Computes the alignment of the segment from `from` to `to` and whether
    /// the squares strictly between them are all empty.
    ///
    /// `from == to` and unaligned pairs yield `Direction::None` with
    /// `clear: false`; they never describe a movable path.
    pub fn path(&self, from: Point, to: Point) -> Path {
        let df = to.file - from.file;
        let dr = to.rank - from.rank;

        let direction = if df == 0 && dr != 0 {
            Direction::Vertical
        } else if dr == 0 && df != 0 {
            Direction::Horizontal
        } else if df == dr && df != 0 {
            Direction::Diagonal1
        } else if df == -dr && df != 0 {
            Direction::Diagonal2
        } else {
            return Path {
                direction: Direction::None,
                clear: false,
            };
        };

        let step = (df.signum(), dr.signum());
        let mut p = from.offset(step.0, step.1);
        let mut clear = true;
        while p != to {
            if !self.contains(p) {
                clear = false;
                break;
            }
            if self.piece_at(p).is_some() {
                clear = false;
                break;
            }
            p = p.offset(step.0, step.1);
        }

        Path { direction, clear }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.height).rev() {
            for file in 0..self.width {
                match self.piece_at(Point::new(file, rank)) {
                    Some(piece) if piece.promoted => write!(f, "{}~", piece.char())?,
                    Some(piece) => write!(f, "{} ", piece.char())?,
                    None => f.write_str(". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
