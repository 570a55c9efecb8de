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

//! Board configuration.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use boardview::{BoardConfig, BoardFlags, Geometry};
//!
//! let config = BoardConfig {
//!     id: "analysis".to_owned(),
//!     geometry: Geometry::new(10, 10),
//!     animation_duration: Duration::from_millis(150),
//!     flags: BoardFlags::default() | BoardFlags::ARE_PREMOVES_ALLOWED,
//!     ..BoardConfig::default()
//! };
//! assert!(config.flags.contains(BoardFlags::ARE_PIECES_DRAGGABLE));
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    error::Error,
    fmt,
    rc::Rc,
    time::Duration,
};

use bitflags::bitflags;

use crate::{arrows::DEFAULT_ARROW_COLOR, geometry::Geometry, square::Square, types::Piece};

bitflags! {
    /// Behavioral switches of a board.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct BoardFlags: u8 {
        /// Pieces can be dragged at all. The host can still veto single
        /// pieces.
        const ARE_PIECES_DRAGGABLE = 1;
        /// Moves of the side that moved last are queued as premoves.
        const ARE_PREMOVES_ALLOWED = 2;
        /// Right-click dragging draws arrows.
        const ARE_ARROWS_ALLOWED = 4;
        /// A plain right click discards all premoves.
        const CLEAR_PREMOVES_ON_RIGHT_CLICK = 8;
        /// Promotions always pick a queen instead of opening a dialog.
        const AUTO_PROMOTE_TO_QUEEN = 16;
        /// A dragged piece is centered on the pointer rather than keeping
        /// the offset it was grabbed at.
        const SNAP_TO_CURSOR = 32;
        /// File and rank labels are drawn on the edge squares.
        const SHOW_NOTATION = 64;
    }
}

impl Default for BoardFlags {
    fn default() -> BoardFlags {
        BoardFlags::ARE_PIECES_DRAGGABLE
            | BoardFlags::ARE_ARROWS_ALLOWED
            | BoardFlags::CLEAR_PREMOVES_ON_RIGHT_CLICK
            | BoardFlags::SNAP_TO_CURSOR
            | BoardFlags::SHOW_NOTATION
    }
}

/// What happens to a piece released outside the board.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub enum DropOffBoard {
    /// The piece returns to where it came from.
    #[default]
    Snapback,
    /// The piece is removed from the board.
    Trash,
}

/// An ordered set of CSS properties.
///
/// # Examples
///
/// ```
/// use boardview::Style;
///
/// let base = Style::new().with("background-color", "#b58863").with("cursor", "grab");
/// let hover = Style::new().with("background-color", "#a42323");
///
/// let style = base.merged(&hover);
/// assert_eq!(style.get("background-color"), Some("#a42323"));
/// assert_eq!(style.to_string(), "background-color: #a42323; cursor: grab");
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Style {
        Style::default()
    }

    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Style {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    /// Overlays `other`, whose properties win.
    pub fn merge(&mut self, other: &Style) {
        self.properties
            .extend(other.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    #[must_use]
    pub fn merged(mut self, other: &Style) -> Style {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{property}: {value}")?;
        }
        Ok(())
    }
}

/// Styles of the board and its squares.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoardStyles {
    pub board: Style,
    pub light_square: Style,
    pub dark_square: Style,
    /// Overlaid on light squares touched by a premove.
    pub premove_light_square: Style,
    /// Overlaid on dark squares touched by a premove.
    pub premove_dark_square: Style,
    /// Overlaid on the square a piece is dragged over.
    pub drop_square: Style,
    /// Overlaid last, per square.
    pub squares: HashMap<Square, Style>,
    /// Applied to the notation labels.
    pub notation: Style,
}

impl Default for BoardStyles {
    fn default() -> BoardStyles {
        BoardStyles {
            board: Style::new(),
            light_square: Style::new().with("background-color", "#f0d9b5"),
            dark_square: Style::new().with("background-color", "#b58863"),
            premove_light_square: Style::new().with("background-color", "#bd2828"),
            premove_dark_square: Style::new().with("background-color", "#a42323"),
            drop_square: Style::new().with("box-shadow", "inset 0 0 1px 6px rgba(255,255,255,0.75)"),
            squares: HashMap::new(),
            notation: Style::new().with("font-size", "13px"),
        }
    }
}

/// Error raised by a custom piece renderer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> RenderError {
        RenderError {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render error: {}", self.message)
    }
}

impl Error for RenderError {}

/// What a parametric piece renderer gets to see.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PieceRenderContext {
    pub piece: Piece,
    pub is_dragging: bool,
    pub square_width: f32,
    /// The square the piece stands on, or `None` for the drag preview.
    pub square: Option<Square>,
}

/// Signature of a parametric piece renderer. It returns markup.
pub type RenderFn = dyn Fn(&PieceRenderContext) -> Result<String, RenderError>;

/// How to draw one kind of piece.
#[derive(Clone)]
pub enum PieceRenderer {
    /// Fixed markup, for example an SVG document or an image URL.
    Static(String),
    /// Markup computed per piece from its context.
    Render(Rc<RenderFn>),
}

impl PieceRenderer {
    pub fn render<F>(f: F) -> PieceRenderer
    where
        F: Fn(&PieceRenderContext) -> Result<String, RenderError> + 'static,
    {
        PieceRenderer::Render(Rc::new(f))
    }
}

impl fmt::Debug for PieceRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceRenderer::Static(markup) => f.debug_tuple("Static").field(markup).finish(),
            PieceRenderer::Render(_) => f.debug_tuple("Render").finish_non_exhaustive(),
        }
    }
}

/// Custom piece renderers by piece.
pub type PieceRenderers = HashMap<Piece, PieceRenderer>;

/// Configuration of one board.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Tells drag payloads of different boards apart.
    pub id: String,
    pub geometry: Geometry,
    /// Duration of slide animations. Defaults to 300 ms.
    pub animation_duration: Duration,
    pub flags: BoardFlags,
    pub drop_off_board: DropOffBoard,
    /// Color of arrows drawn by the user.
    pub arrow_color: String,
    pub styles: BoardStyles,
    /// Custom renderers. Pieces without an entry use the default artwork
    /// of the host.
    pub pieces: PieceRenderers,
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            id: "board".to_owned(),
            geometry: Geometry::default(),
            animation_duration: Duration::from_millis(300),
            flags: BoardFlags::default(),
            drop_off_board: DropOffBoard::default(),
            arrow_color: DEFAULT_ARROW_COLOR.to_owned(),
            styles: BoardStyles::default(),
            pieces: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let flags = BoardFlags::default();
        assert!(flags.contains(BoardFlags::ARE_PIECES_DRAGGABLE));
        assert!(!flags.contains(BoardFlags::ARE_PREMOVES_ALLOWED));
        assert!(!flags.contains(BoardFlags::AUTO_PROMOTE_TO_QUEEN));
    }

    #[test]
    fn test_style_display() {
        assert_eq!(Style::new().to_string(), "");
        assert_eq!(Style::new().with("color", "red").to_string(), "color: red");
    }

    #[test]
    fn test_renderer_debug() {
        let renderer = PieceRenderer::render(|ctx| Ok(ctx.piece.to_string()));
        assert_eq!(format!("{renderer:?}"), "Render(..)");
    }
}
