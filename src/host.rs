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

//! Callbacks from a board to the application embedding it.

use crate::{
    arrows::Arrow,
    geometry::Geometry,
    position::Position,
    promotion::is_promotion_move,
    square::Square,
    types::{Origin, Piece},
};

/// Answer of the host to a move.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub enum DropResponse {
    /// The host does not validate moves. The board applies the move
    /// itself.
    #[default]
    Unhandled,
    /// The host accepted the move and will supply the resulting position.
    Accept,
    /// The host rejected the move. The board stays as it was.
    Reject,
}

/// Receives events from a [`Controller`](crate::Controller).
///
/// Every method has a default, so hosts implement only what they need.
/// `()` is a host that ignores everything and lets the board apply all
/// moves itself.
///
/// Methods are called synchronously from within controller methods. To
/// change the position in response, the host records what to do and calls
/// [`Controller::set_position()`](crate::Controller::set_position)
/// afterwards.
pub trait BoardHost {
    /// Called to submit a move. This is the authority on which moves
    /// happen.
    fn on_piece_drop(&mut self, source: Origin, target: Square, piece: Piece) -> DropResponse {
        let _source = source;
        let _target = target;
        let _piece = piece;
        DropResponse::Unhandled
    }

    /// Called to submit the removal of a piece dropped outside the board,
    /// when dropping off the board deletes pieces.
    fn on_piece_drop_off_board(&mut self, source: Origin, piece: Piece) -> DropResponse {
        let _source = source;
        let _piece = piece;
        DropResponse::Unhandled
    }

    /// Decides if a piece may be picked up.
    fn is_draggable(&self, piece: Piece, source: Origin) -> bool {
        let _piece = piece;
        let _source = source;
        true
    }

    fn on_drag_begin(&mut self, piece: Piece, source: Origin) {
        let _piece = piece;
        let _source = source;
    }

    fn on_drag_end(&mut self, piece: Piece, source: Origin) {
        let _piece = piece;
        let _source = source;
    }

    fn on_square_click(&mut self, square: Square, piece: Option<Piece>) {
        let _square = square;
        let _piece = piece;
    }

    fn on_square_right_click(&mut self, square: Square, piece: Option<Piece>) {
        let _square = square;
        let _piece = piece;
    }

    fn on_mouse_over_square(&mut self, square: Square, piece: Option<Piece>) {
        let _square = square;
        let _piece = piece;
    }

    fn on_mouse_out_square(&mut self, square: Square, piece: Option<Piece>) {
        let _square = square;
        let _piece = piece;
    }

    fn on_piece_click(&mut self, piece: Piece, square: Square) {
        let _piece = piece;
        let _square = square;
    }

    /// Called with all arrows whenever the user changed them.
    fn on_arrows_change(&mut self, arrows: &[Arrow]) {
        let _arrows = arrows;
    }

    /// Called with the displayed position after it was changed by the host
    /// or by the user.
    fn on_position_change(&mut self, position: &Position) {
        let _position = position;
    }

    /// Decides if a drop is a promotion that needs a piece choice. Defaults
    /// to [`is_promotion_move()`].
    fn on_promotion_check(
        &mut self,
        source: Origin,
        target: Square,
        piece: Piece,
        geometry: &Geometry,
    ) -> bool {
        is_promotion_move(source, target, piece, geometry)
    }
}

impl BoardHost for () {}

impl<H: BoardHost + ?Sized> BoardHost for &mut H {
    fn on_piece_drop(&mut self, source: Origin, target: Square, piece: Piece) -> DropResponse {
        (**self).on_piece_drop(source, target, piece)
    }

    fn on_piece_drop_off_board(&mut self, source: Origin, piece: Piece) -> DropResponse {
        (**self).on_piece_drop_off_board(source, piece)
    }

    fn is_draggable(&self, piece: Piece, source: Origin) -> bool {
        (**self).is_draggable(piece, source)
    }

    fn on_drag_begin(&mut self, piece: Piece, source: Origin) {
        (**self).on_drag_begin(piece, source);
    }

    fn on_drag_end(&mut self, piece: Piece, source: Origin) {
        (**self).on_drag_end(piece, source);
    }

    fn on_square_click(&mut self, square: Square, piece: Option<Piece>) {
        (**self).on_square_click(square, piece);
    }

    fn on_square_right_click(&mut self, square: Square, piece: Option<Piece>) {
        (**self).on_square_right_click(square, piece);
    }

    fn on_mouse_over_square(&mut self, square: Square, piece: Option<Piece>) {
        (**self).on_mouse_over_square(square, piece);
    }

    fn on_mouse_out_square(&mut self, square: Square, piece: Option<Piece>) {
        (**self).on_mouse_out_square(square, piece);
    }

    fn on_piece_click(&mut self, piece: Piece, square: Square) {
        (**self).on_piece_click(piece, square);
    }

    fn on_arrows_change(&mut self, arrows: &[Arrow]) {
        (**self).on_arrows_change(arrows);
    }

    fn on_position_change(&mut self, position: &Position) {
        (**self).on_position_change(position);
    }

    fn on_promotion_check(
        &mut self,
        source: Origin,
        target: Square,
        piece: Piece,
        geometry: &Geometry,
    ) -> bool {
        (**self).on_promotion_check(source, target, piece, geometry)
    }
}
