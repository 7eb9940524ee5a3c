use std::{fmt, str::FromStr};

/// A board coordinate.
///
/// `file` counts from 0 at file `a`, `rank` from 0 at rank `1` (white's
/// baseline). Coordinates are not tied to a board size; whether a point is
/// on a particular board is decided by [`Board::contains`](crate::Board::contains).
/// "No square" is represented by `Option<Point>`, never by a sentinel value.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Point {
    pub file: i8,
    pub rank: i8,
}

impl Point {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Point {
        Point { file, rank }
    }

    /// The point displaced by the given file and rank deltas. May land
    /// outside any board.
    #[must_use]
    #[inline]
    pub const fn offset(self, file: i8, rank: i8) -> Point {
        Point {
            file: self.file + file,
            rank: self.rank + rank,
        }
    }

    pub const fn file_char(self) -> char {
        (b'a' + self.file as u8) as char
    }

    /// Parses a square name: file letter first, then the 1-based rank
    /// number, e.g. `e4` or `i9`.
    pub fn from_ascii(s: &[u8]) -> Result<Point, ParsePointError> {
        if s.len() < 2 {
            return Err(ParsePointError);
        }
        let file = file_from_char(char::from(s[0])).ok_or(ParsePointError)?;
        let rank: i8 = btoi::btoi(&s[1..]).map_err(|_| ParsePointError)?;
        if rank < 1 {
            return Err(ParsePointError);
        }
        Ok(Point::new(file, rank - 1))
    }
}

/// File index for a file letter, if it is one.
pub fn file_from_char(ch: char) -> Option<i8> {
    match ch {
        'a'..='t' => Some(ch as i8 - 'a' as i8),
        _ => None,
    }
}

/// Rank index for a rank digit, if it is one.
///
/// Covers a single digit only, so SAN rank disambiguation stops at rank 9;
/// taller boards are reachable through multi-digit square names
/// ([`Point::from_ascii`]) and the coordinate form.
pub fn rank_from_char(ch: char) -> Option<i8> {
    match ch {
        '1'..='9' => Some(ch as i8 - '1' as i8),
        _ => None,
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank + 1)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, thiserror::Error)]
#[error("invalid square name")]
pub struct ParsePointError;

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Point, ParsePointError> {
        Point::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for (name, point) in [("a1", Point::new(0, 0)), ("e4", Point::new(4, 3)), ("i9", Point::new(8, 8))] {
            assert_eq!(name.parse::<Point>().expect("valid square"), point);
            assert_eq!(point.to_string(), name);
        }
    }

    #[test]
    fn test_invalid() {
        assert!("e".parse::<Point>().is_err());
        assert!("4e".parse::<Point>().is_err());
        assert!("e0".parse::<Point>().is_err());
    }
}
