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

//! The stateful core of a board.
//!
//! A [`Controller`] owns the displayed position and reconciles it with
//! positions supplied by the host, animating moves it did not see being
//! made. It also owns the premove queue, arrows, drag state and promotion
//! dialog, and is the only place any of them change.
//!
//! # Examples
//!
//! An opponent's move animates before it is shown:
//!
//! ```
//! use std::time::Duration;
//!
//! use boardview::{BoardConfig, Controller, ManualScheduler, Position, Square};
//!
//! let mut board = Controller::new(BoardConfig::default(), (), ManualScheduler::new(), "start");
//!
//! board.set_position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//! assert!(board.is_waiting_for_animation());
//! assert_eq!(board.position(), &Position::start());
//!
//! board.advance(Duration::from_millis(300));
//! assert!(!board.is_waiting_for_animation());
//! assert!(board.position().piece_at(Square::E4).is_some());
//! ```

use std::{mem, time::Duration};

use tracing::{debug, trace};

use crate::{
    arrows::{Arrow, ArrowGesture, Arrows},
    color::Color,
    config::{BoardConfig, BoardFlags, DropOffBoard},
    diff::PositionDiff,
    fen::{self, PositionInput},
    geometry::Point,
    host::{BoardHost, DropResponse},
    position::Position,
    premove::{Premove, PremoveAttempt, PremoveQueue},
    promotion::{PendingPromotion, PromotionDialog},
    role::Role,
    square::Square,
    timer::{ManualScheduler, Scheduler, TimeoutHandle},
    types::{Origin, Piece},
};

/// Identifies a dragged piece across boards sharing one drag and drop
/// context.
#[allow(missing_docs)]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct DragPayload {
    pub board_id: String,
    pub piece: Piece,
    pub source: Origin,
}

/// A drag in progress.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DragState {
    pub piece: Piece,
    pub source: Origin,
    /// Offset from the top-left corner of the piece to the point it was
    /// grabbed at.
    pub grab_offset: Point,
    /// Last reported pointer position.
    pub pointer: Option<Point>,
    /// The square the piece is currently over.
    pub over: Option<Square>,
}

#[derive(Clone, Debug)]
struct PendingAnimation {
    handle: TimeoutHandle,
    target: Position,
    moved_side: Option<Color>,
}

/// State and behavior of one board.
///
/// `H` receives callbacks. `S` arms the animation timeouts, which the
/// embedding reports back through [`Controller::fire()`].
#[derive(Debug)]
pub struct Controller<H: BoardHost, S: Scheduler> {
    config: BoardConfig,
    host: H,
    scheduler: S,
    input: PositionInput,
    current: Position,
    diff: PositionDiff,
    premoves: PremoveQueue,
    was_manual_drop: bool,
    pending: Option<PendingAnimation>,
    next_handle: TimeoutHandle,
    arrows: Arrows,
    promotion: PromotionDialog,
    drag: Option<DragState>,
}

impl<H: BoardHost, S: Scheduler> Controller<H, S> {
    /// Creates a board showing `input` right away, without animation.
    pub fn new(config: BoardConfig, host: H, scheduler: S, input: impl Into<PositionInput>) -> Controller<H, S> {
        let input = input.into();
        let current = fen::decode(&input, &config.geometry);
        let arrows = Arrows::new(config.arrow_color.clone());
        Controller {
            config,
            host,
            scheduler,
            input,
            current,
            diff: PositionDiff::default(),
            premoves: PremoveQueue::new(),
            was_manual_drop: false,
            pending: None,
            next_handle: TimeoutHandle::first(),
            arrows,
            promotion: PromotionDialog::default(),
            drag: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Mutable access to the configuration. Changing the board dimensions
    /// does not re-decode the displayed position.
    pub fn config_mut(&mut self) -> &mut BoardConfig {
        &mut self.config
    }

    /// Updates the pixel width, for boards that measure their container.
    pub fn set_board_width(&mut self, width: f32) {
        self.config.geometry.width = width;
    }

    pub fn set_orientation(&mut self, orientation: Color) {
        self.config.geometry.orientation = orientation;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The displayed position.
    pub fn position(&self) -> &Position {
        &self.current
    }

    /// Difference between the displayed position and the position being
    /// animated towards. Empty unless an animation is pending.
    pub fn position_diff(&self) -> &PositionDiff {
        &self.diff
    }

    pub fn is_waiting_for_animation(&self) -> bool {
        self.pending.is_some()
    }

    /// The handle of the pending animation timeout, if any.
    pub fn pending_timeout(&self) -> Option<TimeoutHandle> {
        self.pending.as_ref().map(|pending| pending.handle)
    }

    /// The side that made the last confirmed move.
    pub fn last_moved_side(&self) -> Option<Color> {
        self.premoves.last_moved()
    }

    pub fn premoves(&self) -> &PremoveQueue {
        &self.premoves
    }

    pub fn arrows(&self) -> &Arrows {
        &self.arrows
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.promotion.pending()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    fn premoves_allowed(&self) -> bool {
        self.config.flags.contains(BoardFlags::ARE_PREMOVES_ALLOWED)
    }

    /// Supplies a new position from the host.
    ///
    /// Does nothing if the input equals the previous input. Otherwise the
    /// new position is either shown immediately or animated towards:
    ///
    /// * If an animation is still pending, it is cancelled and the new
    ///   position is shown immediately.
    /// * If the change confirms a move the user just dropped, it is shown
    ///   immediately, since the piece is already where it belongs.
    /// * Otherwise the moved pieces slide for the configured duration.
    ///
    /// Afterwards a premove may be attempted.
    pub fn set_position(&mut self, input: impl Into<PositionInput>) {
        let input = input.into();
        if input == self.input {
            return;
        }
        let target = fen::decode(&input, &self.config.geometry);
        self.input = input;
        self.reconcile(target);
    }

    fn reconcile(&mut self, target: Position) {
        let diff = PositionDiff::between(&self.current, &target);
        let moved_side = diff.moved_side();
        let was_manual_drop = mem::take(&mut self.was_manual_drop);

        self.clear_drawn_arrows();
        self.host.on_position_change(&target);

        if let Some(pending) = self.pending.take() {
            debug!(board = %self.config.id, handle = ?pending.handle, "position changed during animation, snapping");
            self.scheduler.cancel(pending.handle);
            self.snap(target);
            self.attempt_premove(moved_side);
        } else if was_manual_drop {
            debug!(board = %self.config.id, "position confirms dropped move, snapping");
            self.snap(target);
            self.attempt_premove(moved_side);
        } else {
            self.premoves
                .set_last_moved(if target.is_start() { None } else { moved_side });
            let handle = self.next_handle;
            self.next_handle = handle.next();
            debug!(
                board = %self.config.id,
                ?handle,
                removed = diff.removed.len(),
                added = diff.added.len(),
                "animating position change"
            );
            self.diff = diff;
            self.scheduler.schedule(handle, self.config.animation_duration);
            self.pending = Some(PendingAnimation {
                handle,
                target,
                moved_side,
            });
        }
    }

    fn snap(&mut self, target: Position) {
        self.current = target;
        self.diff = PositionDiff::default();
    }

    /// Reports that a scheduled timeout elapsed. Finishes the pending
    /// animation if `handle` belongs to it, and ignores the call
    /// otherwise.
    pub fn fire(&mut self, handle: TimeoutHandle) {
        match self.pending.take() {
            Some(pending) if pending.handle == handle => {
                debug!(board = %self.config.id, ?handle, "animation finished");
                self.snap(pending.target);
                self.attempt_premove(pending.moved_side);
            }
            other => {
                self.pending = other;
                debug!(board = %self.config.id, ?handle, "ignoring stale timeout");
            }
        }
    }

    /// Submits the head of the premove queue, unless it belongs to the
    /// side that just moved.
    fn attempt_premove(&mut self, moved_side: Option<Color>) {
        if !self.premoves_allowed() {
            return;
        }

        let host = &mut self.host;
        let current = &mut self.current;
        let mut confirmed_by_host = false;

        let attempt = self.premoves.attempt(moved_side, |premove| {
            match submit(host, premove) {
                DropResponse::Accept => {
                    confirmed_by_host = true;
                    true
                }
                DropResponse::Unhandled => {
                    apply_move(current, premove);
                    true
                }
                DropResponse::Reject => false,
            }
        });

        match attempt {
            PremoveAttempt::Accepted(premove) => {
                debug!(board = %self.config.id, ?premove, "premove accepted");
                if confirmed_by_host {
                    self.was_manual_drop = true;
                } else {
                    self.host.on_position_change(&self.current);
                }
            }
            PremoveAttempt::Rejected(premove) => {
                debug!(board = %self.config.id, ?premove, "premove rejected, discarding queue");
            }
            PremoveAttempt::Empty | PremoveAttempt::Ineligible => (),
        }
    }

    /// Moves a piece on behalf of the user. A `target` of `None` removes
    /// the piece from the board.
    ///
    /// The move is queued as a premove if premoves are allowed and either
    /// an animation is pending, or the piece belongs to the side that moved
    /// last, or that side already has premoves queued. Without premoves,
    /// moves are refused while an animation is pending.
    ///
    /// Otherwise the move is submitted to [`BoardHost::on_piece_drop()`],
    /// or a removal to [`BoardHost::on_piece_drop_off_board()`]. If the host does not handle it, the
    /// board applies it itself. If the host rejects it, the board is left
    /// unchanged and all premoves are discarded.
    pub fn handle_set_position(&mut self, source: Origin, target: Option<Square>, piece: Piece) {
        match target {
            Some(target) if source == Origin::Square(target) => return,
            None if source.is_spare() => return,
            _ => (),
        }

        self.clear_drawn_arrows();

        let waiting = self.is_waiting_for_animation();

        if self.premoves_allowed()
            && (waiting
                || self.premoves.last_moved() == Some(piece.color)
                || self.premoves.has_side(piece.color))
        {
            let premove = Premove {
                source,
                target,
                piece,
            };
            debug!(board = %self.config.id, ?premove, queued = self.premoves.len() + 1, "premove queued");
            self.premoves.enqueue(premove);
            return;
        }

        if waiting {
            debug!(board = %self.config.id, %piece, ?target, "refusing move during animation");
            return;
        }

        let previous_manual_drop = mem::replace(&mut self.was_manual_drop, true);
        let previous_last_moved = self.premoves.last_moved();
        self.premoves.set_last_moved(Some(piece.color));

        let premove = Premove {
            source,
            target,
            piece,
        };

        match submit(&mut self.host, &premove) {
            DropResponse::Accept => {
                debug!(board = %self.config.id, %source, ?target, %piece, "move accepted");
            }
            DropResponse::Reject => {
                debug!(board = %self.config.id, %source, ?target, %piece, "move rejected");
                self.premoves.clear(false);
                self.premoves.set_last_moved(previous_last_moved);
                self.was_manual_drop = previous_manual_drop;
            }
            DropResponse::Unhandled => apply_move(&mut self.current, &premove),
        }

        self.host.on_position_change(&self.current);
    }

    /// Discards all premoves. Resetting the last moved side makes the next
    /// move of either side a real move.
    pub fn clear_premoves(&mut self, reset_last_moved: bool) {
        debug!(board = %self.config.id, discarded = self.premoves.len(), "premoves cleared");
        self.premoves.clear(reset_last_moved);
    }

    /// Picks up a piece. Returns `None` if dragging is disabled or the host
    /// refuses.
    pub fn begin_drag(&mut self, source: Origin, piece: Piece, grab_offset: Point) -> Option<DragPayload> {
        if !self.config.flags.contains(BoardFlags::ARE_PIECES_DRAGGABLE)
            || !self.host.is_draggable(piece, source)
        {
            return None;
        }

        trace!(board = %self.config.id, %source, %piece, "drag begin");
        self.arrows.cancel();
        self.drag = Some(DragState {
            piece,
            source,
            grab_offset,
            pointer: None,
            over: None,
        });
        self.host.on_drag_begin(piece, source);

        Some(DragPayload {
            board_id: self.config.id.clone(),
            piece,
            source,
        })
    }

    /// Reports the pointer position of the drag in progress.
    pub fn drag_move(&mut self, pointer: Point) {
        if let Some(drag) = &mut self.drag {
            drag.pointer = Some(pointer);
        }
    }

    /// Reports the square the dragged piece is over, for the drop target
    /// highlight.
    pub fn drag_over(&mut self, square: Option<Square>) {
        if let Some(drag) = &mut self.drag {
            if drag.over != square {
                trace!(board = %self.config.id, ?square, "drag over");
                drag.over = square;
            }
        }
    }

    /// Abandons the drag in progress. The piece stays where it was.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            trace!(board = %self.config.id, source = %drag.source, "drag cancelled");
            self.host.on_drag_end(drag.piece, drag.source);
        }
    }

    /// Drops a dragged piece on a square, or outside the board if `target`
    /// is `None` or not a square of this board.
    ///
    /// Payloads from other boards are ignored. Promotions open the
    /// promotion dialog, unless queens are picked automatically.
    pub fn drop_piece(&mut self, payload: &DragPayload, target: Option<Square>) {
        if payload.board_id != self.config.id {
            trace!(board = %self.config.id, from = %payload.board_id, "ignoring drop from other board");
            return;
        }

        let (piece, source) = (payload.piece, payload.source);
        self.drag = None;
        self.host.on_drag_end(piece, source);

        let target = target.filter(|&sq| self.config.geometry.contains(sq));

        match target {
            None => match self.config.drop_off_board {
                DropOffBoard::Snapback => trace!(board = %self.config.id, %source, "snapback"),
                DropOffBoard::Trash => self.handle_set_position(source, None, piece),
            },
            Some(target) if source == Origin::Square(target) => (),
            Some(target) => {
                if self
                    .host
                    .on_promotion_check(source, target, piece, &self.config.geometry)
                {
                    if self.config.flags.contains(BoardFlags::AUTO_PROMOTE_TO_QUEEN) {
                        self.handle_set_position(source, Some(target), Role::Queen.of(piece.color));
                    } else {
                        debug!(board = %self.config.id, %source, %target, "awaiting promotion choice");
                        self.promotion.open(PendingPromotion {
                            source,
                            target,
                            color: piece.color,
                        });
                    }
                } else {
                    self.handle_set_position(source, Some(target), piece);
                }
            }
        }
    }

    /// Completes the pending promotion with the chosen piece type.
    pub fn select_promotion(&mut self, role: Role) {
        if let Some((source, target, piece)) = self.promotion.select(role) {
            self.handle_set_position(source, Some(target), piece);
        }
    }

    /// Closes the promotion dialog without moving. Returns `true` if it was
    /// open.
    pub fn dismiss_promotion(&mut self) -> bool {
        self.promotion.dismiss().is_some()
    }

    pub fn click_square(&mut self, square: Square) {
        if self.dismiss_promotion() {
            trace!(board = %self.config.id, "promotion dismissed by click");
        }
        let piece = self.current.piece_at(square);
        self.host.on_square_click(square, piece);
    }

    pub fn click_piece(&mut self, square: Square) {
        if let Some(piece) = self.current.piece_at(square) {
            self.host.on_piece_click(piece, square);
        }
    }

    pub fn mouse_over_square(&mut self, square: Square) {
        self.arrows.hover(square);
        let piece = self.current.piece_at(square);
        self.host.on_mouse_over_square(square, piece);
    }

    pub fn mouse_out_square(&mut self, square: Square) {
        let piece = self.current.piece_at(square);
        self.host.on_mouse_out_square(square, piece);
    }

    pub fn right_click_down(&mut self, square: Square) {
        if self.dismiss_promotion() {
            trace!(board = %self.config.id, "promotion dismissed by right click");
        }
        self.arrows.right_click_down(square);
    }

    /// Finishes a right button gesture: either an arrow was drawn, or the
    /// square was right clicked.
    pub fn right_click_up(&mut self, square: Square) {
        let arrows_allowed = self.config.flags.contains(BoardFlags::ARE_ARROWS_ALLOWED);
        match self.arrows.right_click_up(square, arrows_allowed) {
            ArrowGesture::RightClick(square) => {
                let piece = self.current.piece_at(square);
                self.host.on_square_right_click(square, piece);
                if self
                    .config
                    .flags
                    .contains(BoardFlags::CLEAR_PREMOVES_ON_RIGHT_CLICK)
                {
                    self.clear_premoves(false);
                }
            }
            ArrowGesture::Added(_) | ArrowGesture::Removed(_) => self.notify_arrows(),
            ArrowGesture::None => (),
        }
    }

    /// Replaces the arrows supplied by the host.
    pub fn set_arrows(&mut self, arrows: Vec<Arrow>) {
        self.arrows.set_custom(arrows);
    }

    fn clear_drawn_arrows(&mut self) {
        if self.arrows.clear_drawn() {
            self.notify_arrows();
        }
    }

    fn notify_arrows(&mut self) {
        let arrows: Vec<_> = self.arrows.all().cloned().collect();
        self.host.on_arrows_change(&arrows);
    }
}

impl<H: BoardHost> Controller<H, ManualScheduler> {
    /// Advances the clock of the manual scheduler and fires every timeout
    /// that became due.
    pub fn advance(&mut self, by: Duration) {
        for handle in self.scheduler.advance(by) {
            self.fire(handle);
        }
    }
}

impl<H: BoardHost, S: Scheduler> Drop for Controller<H, S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
        }
    }
}

fn submit<H: BoardHost>(host: &mut H, premove: &Premove) -> DropResponse {
    match premove.target {
        Some(target) => host.on_piece_drop(premove.source, target, premove.piece),
        None => host.on_piece_drop_off_board(premove.source, premove.piece),
    }
}

fn apply_move(position: &mut Position, premove: &Premove) {
    if let Origin::Square(sq) = premove.source {
        position.remove_piece_at(sq);
    }
    if let Some(target) = premove.target {
        position.set_piece_at(target, premove.piece);
    }
}
