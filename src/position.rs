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

use std::collections::{btree_map, BTreeMap};

use crate::{color::Color, geometry::Geometry, role::Role, square::Square, types::Piece};

/// Placement of pieces: a map from occupied squares to pieces.
///
/// # Examples
///
/// ```
/// use boardview::{Color, Position, Square};
///
/// let pos = Position::start();
/// assert_eq!(pos.len(), 32);
/// assert_eq!(pos.piece_at(Square::A1), Some(Color::White.rook()));
/// assert_eq!(pos.piece_at(Square::E8), Some(Color::Black.king()));
/// assert_eq!(pos.piece_at(Square::E4), None);
/// ```
#[derive(Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Position {
    pieces: BTreeMap<Square, Piece>,
}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Position {
    pub const fn empty() -> Position {
        Position {
            pieces: BTreeMap::new(),
        }
    }

    /// The standard chess starting position.
    pub fn start() -> Position {
        let mut pos = Position::empty();
        for (file, role) in (0..).zip(BACKRANK) {
            pos.set_piece_at(Square::new(file, 0), role.of(Color::White));
            pos.set_piece_at(Square::new(file, 1), Color::White.pawn());
            pos.set_piece_at(Square::new(file, 6), Color::Black.pawn());
            pos.set_piece_at(Square::new(file, 7), role.of(Color::Black));
        }
        pos
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces.get(&sq).copied()
    }

    /// Places a piece, returning the piece it replaced.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.pieces.insert(sq, piece)
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.pieces.remove(&sq)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Occupied squares and their pieces, rank by rank from `a1`.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.pieces.iter(),
        }
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.pieces.keys().copied()
    }

    /// Tests if every occupied square is on the given board.
    pub fn fits(&self, geometry: &Geometry) -> bool {
        self.pieces.keys().all(|&sq| geometry.contains(sq))
    }

    /// Tests if this is the standard starting position.
    pub fn is_start(&self) -> bool {
        *self == Position::start()
    }
}

impl FromIterator<(Square, Piece)> for Position {
    fn from_iter<I>(iter: I) -> Position
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        Position {
            pieces: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Square, Piece)> for Position {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        self.pieces.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Position {
    type Item = (Square, Piece);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the pieces of a [`Position`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Square, Piece>,
}

impl Iterator for Iter<'_> {
    type Item = (Square, Piece);

    fn next(&mut self) -> Option<(Square, Piece)> {
        self.inner.next().map(|(&sq, &piece)| (sq, piece))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.pieces.iter().map(|(sq, piece)| (*sq, *piece)))
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.pieces.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        BTreeMap::<Square, Piece>::deserialize(deserializer).map(|pieces| Position { pieces })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        let pos = Position::start();
        assert_eq!(pos.len(), 32);
        assert!(pos.is_start());
        assert_eq!(pos.piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(pos.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(pos.piece_at(Square::G7), Some(Color::Black.pawn()));
        assert!(pos.fits(&Geometry::default()));
    }

    #[test]
    fn test_set_and_remove() {
        let mut pos = Position::empty();
        assert_eq!(pos.set_piece_at(Square::E4, Color::White.knight()), None);
        assert_eq!(
            pos.set_piece_at(Square::E4, Color::Black.bishop()),
            Some(Color::White.knight())
        );
        assert_eq!(pos.remove_piece_at(Square::E4), Some(Color::Black.bishop()));
        assert!(pos.is_empty());
    }

    #[test]
    fn test_fits() {
        let pos: Position = [(Square::new(9, 0), Color::White.rook())].into_iter().collect();
        assert!(!pos.fits(&Geometry::default()));
        assert!(pos.fits(&Geometry::new(8, 10)));
    }
}
