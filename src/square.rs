// This file is part of the boardview library.
// Copyright (C) 2026 The boardview developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, str::FromStr};

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square on a board of up to 26 files and 255 ranks.
///
/// Both coordinates are zero-based, so `a1` is file 0, rank 0. Whether a
/// square is actually on the board depends on the
/// [`Geometry`](crate::Geometry).
///
/// Squares order rank by rank, starting with `a1`, `b1`, ...
///
/// # Examples
///
/// ```
/// use boardview::Square;
///
/// let sq: Square = "e4".parse()?;
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.file(), 4);
/// assert_eq!(sq.rank(), 3);
///
/// let wide = Square::new(9, 11);
/// assert_eq!(wide.to_string(), "j12");
/// # Ok::<_, boardview::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// The number of distinct file letters.
    pub const MAX_FILES: u8 = 26;

    /// Creates a square from zero-based coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `file` is not below [`Square::MAX_FILES`] or `rank` is
    /// `u8::MAX` (it would have no one-based name).
    #[track_caller]
    pub const fn new(file: u8, rank: u8) -> Square {
        assert!(file < Square::MAX_FILES && rank < u8::MAX);
        Square { rank, file }
    }

    /// Creates a square from coordinates, or `None` if they can not name a
    /// square.
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < Square::MAX_FILES && rank < u8::MAX {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Parses a square name like `e4` or `b10`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a lowercase file
    /// letter followed by a positive rank number without leading zeros.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        let (&file, rank) = s.split_first().ok_or(ParseSquareError)?;
        if !file.is_ascii_lowercase() || rank.first().is_none_or(|&d| d == b'0') {
            return Err(ParseSquareError);
        }
        let rank: u8 = btoi::btou(rank).map_err(|_| ParseSquareError)?;
        Square::from_coords(file - b'a', rank - 1).ok_or(ParseSquareError)
    }

    /// Zero-based file index.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// The file letter, `a` to `z`.
    pub const fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    /// Number of files between two squares.
    pub const fn file_distance(self, other: Square) -> u8 {
        self.file.abs_diff(other.file)
    }

    /// Number of ranks between two squares.
    pub const fn rank_distance(self, other: Square) -> u8 {
        self.rank.abs_diff(other.rank)
    }
}

macro_rules! standard_squares {
    ($($name:ident = ($file:expr, $rank:expr),)+) => {
        #[allow(missing_docs)]
        impl Square {
            $(pub const $name: Square = Square { rank: $rank, file: $file };)+
        }
    }
}

standard_squares! {
    A1 = (0, 0),
    B1 = (1, 0),
    C1 = (2, 0),
    D1 = (3, 0),
    E1 = (4, 0),
    F1 = (5, 0),
    G1 = (6, 0),
    H1 = (7, 0),
    A2 = (0, 1),
    B2 = (1, 1),
    C2 = (2, 1),
    D2 = (3, 1),
    E2 = (4, 1),
    F2 = (5, 1),
    G2 = (6, 1),
    H2 = (7, 1),
    A3 = (0, 2),
    B3 = (1, 2),
    C3 = (2, 2),
    D3 = (3, 2),
    E3 = (4, 2),
    F3 = (5, 2),
    G3 = (6, 2),
    H3 = (7, 2),
    A4 = (0, 3),
    B4 = (1, 3),
    C4 = (2, 3),
    D4 = (3, 3),
    E4 = (4, 3),
    F4 = (5, 3),
    G4 = (6, 3),
    H4 = (7, 3),
    A5 = (0, 4),
    B5 = (1, 4),
    C5 = (2, 4),
    D5 = (3, 4),
    E5 = (4, 4),
    F5 = (5, 4),
    G5 = (6, 4),
    H5 = (7, 4),
    A6 = (0, 5),
    B6 = (1, 5),
    C6 = (2, 5),
    D6 = (3, 5),
    E6 = (4, 5),
    F6 = (5, 5),
    G6 = (6, 5),
    H6 = (7, 5),
    A7 = (0, 6),
    B7 = (1, 6),
    C7 = (2, 6),
    D7 = (3, 6),
    E7 = (4, 6),
    F7 = (5, 6),
    G7 = (6, 6),
    H7 = (7, 6),
    A8 = (0, 7),
    B8 = (1, 7),
    C8 = (2, 7),
    D8 = (3, 7),
    E8 = (4, 7),
    F8 = (5, 7),
    G8 = (6, 7),
    H8 = (7, 7),
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), u16::from(self.rank) + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char().to_ascii_uppercase(), u16::from(self.rank) + 1)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

/// Arbitrary squares are squares of the standard 8×8 board.
#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Square> {
        Ok(Square {
            rank: u.int_in_range(0..=7)?,
            file: u.int_in_range(0..=7)?,
        })
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (2, Some(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in 0..8 {
            for rank in 0..8 {
                let square = Square::new(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
                assert_eq!(square.to_string().parse(), Ok(square));
            }
        }
    }

    #[test]
    fn test_standard_constants() {
        assert_eq!(Square::A1, Square::new(0, 0));
        assert_eq!(Square::E4, Square::new(4, 3));
        assert_eq!(Square::H8, Square::new(7, 7));
    }

    #[test]
    fn test_parse_wide() {
        assert_eq!("a10".parse(), Ok(Square::new(0, 9)));
        assert_eq!("z255".parse(), Ok(Square::new(25, 254)));
        assert_eq!("l16".parse::<Square>().map(|sq| sq.to_string()), Ok("l16".to_owned()));
    }

    #[test]
    fn test_parse_invalid() {
        for name in ["", "e", "e0", "e01", "E4", "4e", "e-1", "e+1", "a256", "a 1", "ä1"] {
            assert_eq!(name.parse::<Square>(), Err(ParseSquareError), "{name}");
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Square::H1 < Square::A2);
        assert!(Square::A1 < Square::B1);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Square::E4.file_distance(Square::C8), 2);
        assert_eq!(Square::E4.rank_distance(Square::C8), 4);
    }
}
