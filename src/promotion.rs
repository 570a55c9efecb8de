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

//! Holding back pawn moves to the last rank until a piece is chosen.

use arrayvec::ArrayVec;

use crate::{
    color::Color,
    geometry::Geometry,
    role::Role,
    square::Square,
    types::{Origin, Piece},
};

/// Tests if moving `piece` from `source` to `target` promotes a pawn: a
/// pawn steps from the rank before its farthest rank onto the farthest
/// rank, straight or diagonally.
///
/// # Examples
///
/// ```
/// use boardview::{promotion::is_promotion_move, Color, Geometry, Square};
///
/// let geometry = Geometry::default();
/// let pawn = Color::White.pawn();
/// assert!(is_promotion_move(Square::E7.into(), Square::E8, pawn, &geometry));
/// assert!(is_promotion_move(Square::E7.into(), Square::D8, pawn, &geometry));
/// assert!(!is_promotion_move(Square::E6.into(), Square::E7, pawn, &geometry));
/// assert!(!is_promotion_move(Square::E2.into(), Square::E1, pawn, &geometry));
/// ```
pub fn is_promotion_move(source: Origin, target: Square, piece: Piece, geometry: &Geometry) -> bool {
    let Origin::Square(source) = source else {
        return false;
    };
    let farthest = geometry.farthest_rank(piece.color);
    piece.role == Role::Pawn
        && target.rank() == farthest
        && source.rank_distance(target) == 1
        && source.file_distance(target) <= 1
        && geometry.contains(target)
}

/// A promotion waiting for the user to pick a piece.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PendingPromotion {
    pub source: Origin,
    pub target: Square,
    pub color: Color,
}

impl PendingPromotion {
    /// The pieces offered, queen first.
    pub fn choices(&self) -> ArrayVec<Piece, 4> {
        Role::PROMOTION.into_iter().map(|role| role.of(self.color)).collect()
    }
}

/// Promotion dialog state.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct PromotionDialog {
    pending: Option<PendingPromotion>,
}

impl PromotionDialog {
    pub fn open(&mut self, pending: PendingPromotion) {
        self.pending = Some(pending);
    }

    pub fn pending(&self) -> Option<&PendingPromotion> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Closes the dialog, combining the choice with the held move. Returns
    /// `None` if no promotion was pending.
    pub fn select(&mut self, role: Role) -> Option<(Origin, Square, Piece)> {
        self.pending
            .take()
            .map(|pending| (pending.source, pending.target, role.of(pending.color)))
    }

    /// Closes the dialog without moving.
    pub fn dismiss(&mut self) -> Option<PendingPromotion> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_promotion() {
        let geometry = Geometry::default();
        let pawn = Color::Black.pawn();
        assert!(is_promotion_move(Square::B2.into(), Square::A1, pawn, &geometry));
        assert!(!is_promotion_move(Square::B7.into(), Square::B8, pawn, &geometry));
        assert!(!is_promotion_move(Square::B2.into(), Square::D1, pawn, &geometry));
        assert!(!is_promotion_move(Origin::Spare, Square::B1, pawn, &geometry));
        assert!(!is_promotion_move(Square::B2.into(), Square::B1, Color::Black.rook(), &geometry));
    }

    #[test]
    fn test_tall_board() {
        let geometry = Geometry::new(10, 8);
        let pawn = Color::White.pawn();
        assert!(!is_promotion_move(Square::E7.into(), Square::E8, pawn, &geometry));
        assert!(is_promotion_move(Square::new(4, 8).into(), Square::new(4, 9), pawn, &geometry));
    }

    #[test]
    fn test_dialog() {
        let mut dialog = PromotionDialog::default();
        assert_eq!(dialog.select(Role::Queen), None);

        let pending = PendingPromotion {
            source: Square::G7.into(),
            target: Square::G8,
            color: Color::White,
        };
        assert_eq!(pending.choices()[0], Color::White.queen());
        assert_eq!(pending.choices().len(), 4);

        dialog.open(pending);
        assert!(dialog.is_open());
        assert_eq!(
            dialog.select(Role::Knight),
            Some((Square::G7.into(), Square::G8, Color::White.knight()))
        );
        assert!(!dialog.is_open());

        dialog.open(pending);
        assert_eq!(dialog.dismiss(), Some(pending));
        assert!(!dialog.is_open());
    }
}
