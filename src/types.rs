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

use crate::{color::Color, role::Role, square::Square};

/// Error when parsing an invalid piece code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePieceError;

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece code")
    }
}

impl Error for ParsePieceError {}

/// A piece with [`Color`] and [`Role`].
///
/// The piece code is the side character followed by the uppercase role
/// letter.
///
/// # Examples
///
/// ```
/// use boardview::{Color, Piece};
///
/// let piece: Piece = "bN".parse()?;
/// assert_eq!(piece, Color::Black.knight());
/// assert_eq!(piece.to_string(), "bN");
/// assert_eq!(piece.char(), 'n');
/// # Ok::<_, boardview::ParsePieceError>(())
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The placement letter: uppercase for white, lowercase for black.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    /// Gets the piece from its placement letter.
    pub const fn from_char(ch: char) -> Option<Piece> {
        match Role::from_char(ch) {
            Some(role) => Some(role.of(Color::from_white(ch.is_ascii_uppercase()))),
            None => None,
        }
    }

    /// Parses a two character piece code like `wK`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePieceError`] if the input is not a side character
    /// followed by an uppercase role letter.
    pub fn from_ascii(s: &[u8]) -> Result<Piece, ParsePieceError> {
        match *s {
            [side, role] if role.is_ascii_uppercase() => {
                let color = Color::from_char(char::from(side)).ok_or(ParsePieceError)?;
                let role = Role::from_char(char::from(role)).ok_or(ParsePieceError)?;
                Ok(role.of(color))
            }
            _ => Err(ParsePieceError),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.char(), self.role.upper_char())
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Piece, ParsePieceError> {
        Piece::from_ascii(s.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PieceVisitor;

        impl serde::de::Visitor<'_> for PieceVisitor {
            type Value = Piece;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("piece code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(PieceVisitor)
    }
}

/// Where a dragged piece comes from.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Origin {
    /// A square of the board.
    Square(Square),
    /// A spare piece from outside the board. Moving it never vacates a
    /// square.
    Spare,
}

impl Origin {
    /// The board square, or `None` for spare pieces.
    pub const fn square(self) -> Option<Square> {
        match self {
            Origin::Square(sq) => Some(sq),
            Origin::Spare => None,
        }
    }

    pub const fn is_spare(self) -> bool {
        matches!(self, Origin::Spare)
    }
}

impl From<Square> for Origin {
    fn from(sq: Square) -> Origin {
        Origin::Square(sq)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Origin::Square(sq) => fmt::Display::fmt(&sq, f),
            Origin::Spare => f.write_str("spare"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes() {
        for color in Color::ALL {
            for role in Role::ALL {
                let piece = role.of(color);
                assert_eq!(piece.to_string().parse(), Ok(piece));
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
    }

    #[test]
    fn test_invalid_piece_codes() {
        for code in ["", "w", "wk", "xK", "wKK", "Kw", "WK"] {
            assert_eq!(code.parse::<Piece>(), Err(ParsePieceError), "{code}");
        }
    }

    #[test]
    fn test_origin() {
        assert_eq!(Origin::from(Square::E2).square(), Some(Square::E2));
        assert_eq!(Origin::Spare.square(), None);
        assert_eq!(Origin::Spare.to_string(), "spare");
    }
}
