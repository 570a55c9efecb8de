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

//! Compare two positions square by square.

use crate::{color::Color, position::Position};

/// Per-square difference between an old and a new [`Position`].
///
/// A square whose piece changed (rather than appeared or disappeared) is
/// listed in both maps.
///
/// # Examples
///
/// ```
/// use boardview::{Color, Position, PositionDiff, Square};
///
/// let old = Position::start();
/// let mut new = old.clone();
/// let pawn = new.remove_piece_at(Square::E2).expect("pawn on e2");
/// new.set_piece_at(Square::E4, pawn);
///
/// let diff = PositionDiff::between(&old, &new);
/// assert_eq!(diff.removed.piece_at(Square::E2), Some(Color::White.pawn()));
/// assert_eq!(diff.added.piece_at(Square::E4), Some(Color::White.pawn()));
/// assert_eq!(diff.added.len() + diff.removed.len(), 2);
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct PositionDiff {
    /// Pieces of the old position that are not on the same square in the
    /// new position.
    pub removed: Position,
    /// Pieces of the new position that were not on the same square in the
    /// old position.
    pub added: Position,
}

impl PositionDiff {
    pub fn between(old: &Position, new: &Position) -> PositionDiff {
        let removed = old
            .iter()
            .filter(|&(sq, piece)| new.piece_at(sq) != Some(piece))
            .collect();
        let added = new
            .iter()
            .filter(|&(sq, piece)| old.piece_at(sq) != Some(piece))
            .collect();
        PositionDiff { removed, added }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// Guesses the side that just moved: the color of the first added
    /// piece, if at most two pieces were added. Two covers castling.
    pub fn moved_side(&self) -> Option<Color> {
        if self.added.len() <= 2 {
            self.added.iter().next().map(|(_, piece)| piece.color)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{square::Square, types::Piece};

    fn pos(pieces: &[(Square, Piece)]) -> Position {
        pieces.iter().copied().collect()
    }

    #[test]
    fn test_identical() {
        for p in [Position::empty(), Position::start()] {
            assert!(PositionDiff::between(&p, &p).is_empty());
        }
    }

    #[test]
    fn test_empty_sides() {
        let start = Position::start();
        let diff = PositionDiff::between(&Position::empty(), &start);
        assert!(diff.removed.is_empty());
        assert_eq!(diff.added, start);

        let diff = PositionDiff::between(&start, &Position::empty());
        assert_eq!(diff.removed, start);
        assert!(diff.added.is_empty());
    }

    #[test]
    fn test_replaced_piece_in_both() {
        let old = pos(&[(Square::D5, Color::Black.pawn()), (Square::E4, Color::White.pawn())]);
        let new = pos(&[(Square::D5, Color::White.pawn())]);
        let diff = PositionDiff::between(&old, &new);
        assert_eq!(
            diff.removed,
            pos(&[(Square::D5, Color::Black.pawn()), (Square::E4, Color::White.pawn())])
        );
        assert_eq!(diff.added, pos(&[(Square::D5, Color::White.pawn())]));
        assert_eq!(diff.moved_side(), Some(Color::White));
    }

    #[test]
    fn test_diff_invariants() {
        let a = Position::start();
        let b = Position::from_notation(
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R",
            &Default::default(),
        )
        .expect("valid notation");
        let diff = PositionDiff::between(&a, &b);
        for (sq, piece) in &diff.removed {
            assert_eq!(a.piece_at(sq), Some(piece));
            assert_ne!(a.piece_at(sq), b.piece_at(sq));
        }
        for (sq, piece) in &diff.added {
            assert_eq!(b.piece_at(sq), Some(piece));
            assert_ne!(a.piece_at(sq), b.piece_at(sq));
        }
        assert_eq!(diff.moved_side(), None);
    }

    #[test]
    fn test_castling_side() {
        let old = pos(&[(Square::E8, Color::Black.king()), (Square::H8, Color::Black.rook())]);
        let new = pos(&[(Square::G8, Color::Black.king()), (Square::F8, Color::Black.rook())]);
        assert_eq!(PositionDiff::between(&old, &new).moved_side(), Some(Color::Black));
    }
}
