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

//! Annotation arrows drawn by the host and by right-click dragging.

use tracing::trace;

use crate::square::Square;

/// The default arrow color.
pub const DEFAULT_ARROW_COLOR: &str = "rgb(255,170,0)";

/// An arrow from one square to another, in a CSS color.
#[allow(missing_docs)]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrow {
    pub start: Square,
    pub end: Square,
    pub color: String,
}

impl Arrow {
    pub fn new(start: Square, end: Square) -> Arrow {
        Arrow {
            start,
            end,
            color: DEFAULT_ARROW_COLOR.to_owned(),
        }
    }

    #[must_use]
    pub fn with_color(self, color: impl Into<String>) -> Arrow {
        Arrow {
            color: color.into(),
            ..self
        }
    }

    /// Tests if the arrow connects the same squares, ignoring color.
    pub fn same_squares(&self, other: &Arrow) -> bool {
        self.start == other.start && self.end == other.end
    }

    fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Outcome of releasing the right mouse button.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ArrowGesture {
    /// No gesture was in progress, or arrows are disabled.
    None,
    /// Released on the square it was pressed on. This is a plain right
    /// click.
    RightClick(Square),
    /// A new arrow was drawn.
    Added(Arrow),
    /// An existing arrow was drawn again and thereby removed.
    Removed(Arrow),
}

/// Arrow state of one board.
///
/// Host-supplied arrows and user-drawn arrows are kept apart: the former
/// are replaced wholesale by the host, the latter toggle on and off as the
/// user draws them.
///
/// # Examples
///
/// ```
/// use boardview::{ArrowGesture, Arrows, Square};
///
/// let mut arrows = Arrows::new("red");
///
/// arrows.right_click_down(Square::E2);
/// arrows.hover(Square::E4);
/// assert!(arrows.drawing().is_some());
/// assert!(matches!(arrows.right_click_up(Square::E4, true), ArrowGesture::Added(_)));
/// assert_eq!(arrows.drawn().len(), 1);
///
/// // Drawing the same arrow again removes it.
/// arrows.right_click_down(Square::E2);
/// assert!(matches!(arrows.right_click_up(Square::E4, true), ArrowGesture::Removed(_)));
/// assert!(arrows.drawn().is_empty());
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Arrows {
    custom: Vec<Arrow>,
    drawn: Vec<Arrow>,
    drawing: Option<Arrow>,
    right_click_down: Option<Square>,
    color: String,
}

impl Arrows {
    /// Creates empty arrow state. User-drawn arrows get the given color.
    pub fn new(color: impl Into<String>) -> Arrows {
        Arrows {
            color: color.into(),
            ..Arrows::default()
        }
    }

    /// Replaces all host-supplied arrows. Arrows starting and ending on the
    /// same square are dropped.
    pub fn set_custom(&mut self, arrows: Vec<Arrow>) {
        self.custom = arrows.into_iter().filter(|arrow| !arrow.is_degenerate()).collect();
    }

    pub fn custom(&self) -> &[Arrow] {
        &self.custom
    }

    /// Arrows the user drew and did not remove.
    pub fn drawn(&self) -> &[Arrow] {
        &self.drawn
    }

    /// The arrow following the pointer while the right button is held.
    pub fn drawing(&self) -> Option<&Arrow> {
        self.drawing.as_ref()
    }

    pub fn right_click_down_square(&self) -> Option<Square> {
        self.right_click_down
    }

    /// Host-supplied and user-drawn arrows, in this order.
    pub fn all(&self) -> impl Iterator<Item = &Arrow> + '_ {
        self.custom.iter().chain(self.drawn.iter())
    }

    pub fn right_click_down(&mut self, sq: Square) {
        trace!(%sq, "right click down");
        self.right_click_down = Some(sq);
        self.drawing = None;
    }

    /// Updates the arrow in progress when the pointer enters a square.
    pub fn hover(&mut self, sq: Square) {
        self.drawing = match self.right_click_down {
            Some(start) if start != sq => Some(Arrow {
                start,
                end: sq,
                color: self.color.clone(),
            }),
            _ => None,
        };
    }

    /// Finishes the gesture started by [`Arrows::right_click_down()`].
    pub fn right_click_up(&mut self, sq: Square, arrows_allowed: bool) -> ArrowGesture {
        self.drawing = None;

        let Some(start) = self.right_click_down.take() else {
            return ArrowGesture::None;
        };

        if start == sq {
            trace!(%sq, "right click");
            return ArrowGesture::RightClick(sq);
        }

        if !arrows_allowed {
            return ArrowGesture::None;
        }

        let arrow = Arrow {
            start,
            end: sq,
            color: self.color.clone(),
        };

        if let Some(index) = self.drawn.iter().position(|drawn| drawn.same_squares(&arrow)) {
            let removed = self.drawn.remove(index);
            trace!(start = %removed.start, end = %removed.end, "arrow removed");
            ArrowGesture::Removed(removed)
        } else {
            trace!(start = %arrow.start, end = %arrow.end, "arrow added");
            self.drawn.push(arrow.clone());
            ArrowGesture::Added(arrow)
        }
    }

    /// Abandons a gesture in progress.
    pub fn cancel(&mut self) {
        self.right_click_down = None;
        self.drawing = None;
    }

    /// Removes all user-drawn arrows. Returns `true` if there were any.
    pub fn clear_drawn(&mut self) -> bool {
        self.drawing = None;
        let changed = !self.drawn.is_empty();
        self.drawn.clear();
        changed
    }
}
