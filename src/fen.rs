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

//! Parse and write board placement notation.
//!
//! Placement notation describes the board rank by rank, starting with the
//! rank farthest from white. Ranks are separated by `/`. Uppercase letters
//! are white pieces, lowercase letters black pieces, and numbers count
//! consecutive empty squares. Anything after the first space, such as the
//! side to move or castling rights in a full FEN, is ignored.
//!
//! # Examples
//!
//! ```
//! use boardview::{fen, Color, Geometry, Position, PositionInput, Square};
//!
//! let geometry = Geometry::default();
//!
//! let input = PositionInput::from("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//! let pos = fen::decode(&input, &geometry);
//! assert_eq!(pos.piece_at(Square::E4), Some(Color::White.pawn()));
//!
//! assert_eq!(
//!     fen::encode(&pos, &geometry).as_deref(),
//!     Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR")
//! );
//!
//! // Invalid input decodes to an empty board.
//! let pos = fen::decode(&PositionInput::from("8/8/8"), &geometry);
//! assert_eq!(pos, Position::empty());
//! ```

use std::{convert::Infallible, error::Error, fmt, str::FromStr};

use tracing::debug;

use crate::{geometry::Geometry, position::Position, square::Square, types::Piece};

/// Errors that can occur when parsing placement notation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseNotationError {
    /// The board has more files than there are file letters.
    UnsupportedGeometry,
    /// The number of `/`-separated ranks does not match the board.
    RankCount { expected: u8, found: usize },
    /// A rank does not describe exactly one square per file. Ranks are
    /// counted from the top of the notation, starting at 0.
    RankWidth { rank: usize },
    /// A character that is neither a piece letter nor a digit.
    InvalidChar(char),
    /// An empty-square count that is zero, has a leading zero or
    /// overflows.
    InvalidEmptyRun,
}

impl fmt::Display for ParseNotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseNotationError::UnsupportedGeometry => f.write_str("board has too many files"),
            ParseNotationError::RankCount { expected, found } => {
                write!(f, "expected {expected} ranks, found {found}")
            }
            ParseNotationError::RankWidth { rank } => {
                write!(f, "rank {rank} does not match the number of files")
            }
            ParseNotationError::InvalidChar(ch) => write!(f, "invalid character {ch:?}"),
            ParseNotationError::InvalidEmptyRun => f.write_str("invalid empty square count"),
        }
    }
}

impl Error for ParseNotationError {}

impl Position {
    /// Parses placement notation for a board of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseNotationError`] if the placement does not have
    /// exactly as many ranks as the board has rows, each describing exactly
    /// as many squares as the board has columns.
    pub fn from_notation(notation: &str, geometry: &Geometry) -> Result<Position, ParseNotationError> {
        if geometry.columns > Square::MAX_FILES || geometry.rows == u8::MAX {
            return Err(ParseNotationError::UnsupportedGeometry);
        }

        let placement = notation.trim().split(' ').next().unwrap_or_default();
        let ranks: Vec<&[u8]> = placement.as_bytes().split(|&ch| ch == b'/').collect();
        if ranks.len() != usize::from(geometry.rows) {
            return Err(ParseNotationError::RankCount {
                expected: geometry.rows,
                found: ranks.len(),
            });
        }

        let columns = u32::from(geometry.columns);
        let mut pos = Position::empty();

        for (row, (mut group, rank)) in ranks.into_iter().zip((0..geometry.rows).rev()).enumerate() {
            let mut file = 0u32;

            while let Some((&ch, tail)) = group.split_first() {
                if ch.is_ascii_digit() {
                    let len = group.iter().take_while(|ch| ch.is_ascii_digit()).count();
                    let (digits, tail) = group.split_at(len);
                    if digits[0] == b'0' {
                        return Err(ParseNotationError::InvalidEmptyRun);
                    }
                    let run: u32 = btoi::btou(digits).map_err(|_| ParseNotationError::InvalidEmptyRun)?;
                    file = file.saturating_add(run);
                    group = tail;
                } else {
                    let piece = Piece::from_char(char::from(ch))
                        .ok_or(ParseNotationError::InvalidChar(char::from(ch)))?;
                    let sq = u8::try_from(file)
                        .ok()
                        .and_then(|file| Square::from_coords(file, rank))
                        .filter(|&sq| geometry.contains(sq))
                        .ok_or(ParseNotationError::RankWidth { rank: row })?;
                    pos.set_piece_at(sq, piece);
                    file += 1;
                    group = tail;
                }

                if file > columns {
                    return Err(ParseNotationError::RankWidth { rank: row });
                }
            }

            if file != columns {
                return Err(ParseNotationError::RankWidth { rank: row });
            }
        }

        Ok(pos)
    }

    /// Writes placement notation, or `None` if a piece stands outside the
    /// board.
    ///
    /// # Examples
    ///
    /// ```
    /// use boardview::{Geometry, Position};
    ///
    /// assert_eq!(
    ///     Position::start().to_notation(&Geometry::default()).as_deref(),
    ///     Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    /// );
    /// ```
    pub fn to_notation(&self, geometry: &Geometry) -> Option<String> {
        if geometry.columns > Square::MAX_FILES || geometry.rows == u8::MAX || !self.fits(geometry) {
            return None;
        }

        let mut notation =
            String::with_capacity(usize::from(geometry.rows) * (usize::from(geometry.columns) + 1));

        for rank in (0..geometry.rows).rev() {
            let mut empty = 0u32;

            for file in 0..geometry.columns {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            notation.push_str(&empty.to_string());
                            empty = 0;
                        }
                        notation.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                notation.push_str(&empty.to_string());
            }

            if rank > 0 {
                notation.push('/');
            }
        }

        Some(notation)
    }
}

/// Writes placement notation for the smallest board of at least 8×8 that
/// holds every piece.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.squares().fold((8u8, 8u8), |(rows, columns), sq| {
            (rows.max(sq.rank().saturating_add(1)), columns.max(sq.file() + 1))
        });
        match self.to_notation(&Geometry::new(rows, columns)) {
            Some(notation) => f.write_str(&notation),
            None => fmt::Debug::fmt(self, f),
        }
    }
}

/// A position as supplied by the host.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PositionInput {
    /// The standard starting position, written as `"start"`.
    #[default]
    Start,
    /// Placement notation, possibly followed by other FEN fields.
    Notation(String),
    /// An explicit square to piece map.
    Position(Position),
}

impl From<&str> for PositionInput {
    fn from(s: &str) -> PositionInput {
        if s == "start" {
            PositionInput::Start
        } else {
            PositionInput::Notation(s.to_owned())
        }
    }
}

impl From<String> for PositionInput {
    fn from(s: String) -> PositionInput {
        if s == "start" {
            PositionInput::Start
        } else {
            PositionInput::Notation(s)
        }
    }
}

impl From<Position> for PositionInput {
    fn from(pos: Position) -> PositionInput {
        PositionInput::Position(pos)
    }
}

impl FromStr for PositionInput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<PositionInput, Infallible> {
        Ok(PositionInput::from(s))
    }
}

/// Converts host input to a position on the given board.
///
/// Never fails: malformed notation, and maps with pieces outside the board,
/// decode to an empty position.
pub fn decode(input: &PositionInput, geometry: &Geometry) -> Position {
    match input {
        PositionInput::Start => Position::start(),
        PositionInput::Notation(notation) => Position::from_notation(notation, geometry)
            .unwrap_or_else(|err| {
                debug!(%notation, %err, "discarding invalid placement notation");
                Position::empty()
            }),
        PositionInput::Position(pos) if pos.fits(geometry) => pos.clone(),
        PositionInput::Position(pos) => {
            debug!(pieces = pos.len(), "discarding position with squares outside the board");
            Position::empty()
        }
    }
}

/// Writes placement notation, or `None` if the position does not fit the
/// board.
pub fn encode(pos: &Position, geometry: &Geometry) -> Option<String> {
    pos.to_notation(geometry)
}

/// Tests if the notation is valid for the given board.
pub fn is_valid_notation(notation: &str, geometry: &Geometry) -> bool {
    Position::from_notation(notation, geometry).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_empty_board() {
        let pos = decode(&"8/8/8/8/8/8/8/8".into(), &Geometry::default());
        assert!(pos.is_empty());
    }

    #[test]
    fn test_start_sentinel() {
        let geometry = Geometry::default();
        let pos = decode(&"start".into(), &geometry);
        assert_eq!(pos.len(), 32);
        assert_eq!(pos.piece_at(Square::A1), Some(Color::White.rook()));
        assert_eq!(pos.piece_at(Square::E8), Some(Color::Black.king()));
        assert_eq!(
            decode(&"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".into(), &geometry),
            pos
        );
    }

    #[test]
    fn test_errors() {
        let geometry = Geometry::default();
        assert_eq!(
            Position::from_notation("8/8/8/8/8/8/8", &geometry),
            Err(ParseNotationError::RankCount { expected: 8, found: 7 })
        );
        assert_eq!(
            Position::from_notation("8/8/8/8/8/8/8/7", &geometry),
            Err(ParseNotationError::RankWidth { rank: 7 })
        );
        assert_eq!(
            Position::from_notation("9/8/8/8/8/8/8/8", &geometry),
            Err(ParseNotationError::RankWidth { rank: 0 })
        );
        assert_eq!(
            Position::from_notation("ppppppppp/8/8/8/8/8/8/8", &geometry),
            Err(ParseNotationError::RankWidth { rank: 0 })
        );
        assert_eq!(
            Position::from_notation("8/8/8/3x4/8/8/8/8", &geometry),
            Err(ParseNotationError::InvalidChar('x'))
        );
        assert_eq!(
            Position::from_notation("8/8/8/08/8/8/8/8", &geometry),
            Err(ParseNotationError::InvalidEmptyRun),
        );
        assert_eq!(
            Position::from_notation("8/8/8/0/8/8/8/8", &geometry),
            Err(ParseNotationError::InvalidEmptyRun)
        );
        assert_eq!(
            Position::from_notation("8/8/8/99999999999/8/8/8/8", &geometry),
            Err(ParseNotationError::InvalidEmptyRun)
        );
    }

    #[test]
    fn test_wide_board() {
        let geometry = Geometry::new(3, 12);
        let pos = Position::from_notation("r10k/12/K11", &geometry).expect("valid notation");
        assert_eq!(pos.piece_at(Square::new(0, 2)), Some(Color::Black.rook()));
        assert_eq!(pos.piece_at(Square::new(11, 2)), Some(Color::Black.king()));
        assert_eq!(pos.piece_at(Square::new(0, 0)), Some(Color::White.king()));
        assert_eq!(encode(&pos, &geometry).as_deref(), Some("r10k/12/K11"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Position::start().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );

        let mut pos = Position::empty();
        pos.set_piece_at(Square::new(9, 0), Color::White.king());
        assert_eq!(pos.to_string(), "10/10/10/10/10/10/10/9K");
    }

    #[test]
    fn test_encode_outside_board() {
        let mut pos = Position::start();
        pos.set_piece_at(Square::new(8, 0), Color::White.queen());
        assert_eq!(encode(&pos, &Geometry::default()), None);
        assert_eq!(decode(&pos.into(), &Geometry::default()), Position::empty());
    }

    #[test]
    fn test_round_trip() {
        let geometry = Geometry::default();
        for notation in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/8/8/8/8/8/8/8",
            "7k/8/8/8/8/8/8/K7",
        ] {
            let pos = Position::from_notation(notation, &geometry).expect("valid notation");
            assert_eq!(encode(&pos, &geometry).as_deref(), Some(notation));
            assert_eq!(decode(&PositionInput::Position(pos.clone()), &geometry), pos);
        }
    }
}
