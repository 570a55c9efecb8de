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

//! Render model of a board.
//!
//! [`Controller::render()`] computes everything a host needs to draw the
//! board from the controller state: square styles, piece glyphs, slide
//! transforms, arrows, the drag preview and the promotion dialog. The host
//! turns it into pixels.

use std::time::Duration;

use tracing::error;

use crate::{
    arrows::Arrow,
    color::Color,
    config::{BoardConfig, BoardFlags, PieceRenderContext, PieceRenderer, RenderError, Style},
    controller::Controller,
    diff::PositionDiff,
    geometry::{Geometry, Point},
    host::BoardHost,
    role::Role,
    square::Square,
    timer::Scheduler,
    types::{Origin, Piece},
};

/// Opacity of the fallback piece.
pub const FALLBACK_OPACITY: f32 = 0.5;

/// What to draw for a piece.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Glyph {
    /// The default artwork of the host for the piece.
    Default,
    /// Markup produced by a custom renderer.
    Markup(String),
}

/// Translation of a piece towards the square it is sliding to.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub dx: f32,
    pub dy: f32,
    pub duration: Duration,
}

#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct PieceView {
    pub piece: Piece,
    pub glyph: Glyph,
    pub draggable: bool,
    /// The piece has been picked up. Hosts usually hide it while the drag
    /// preview follows the pointer.
    pub is_dragging: bool,
    /// `None` unless the piece is sliding.
    pub transform: Option<Transform>,
}

/// Coordinate labels drawn inside a square.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct NotationLabel {
    pub file: Option<char>,
    pub rank: Option<u16>,
}

#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct SquareView {
    pub square: Square,
    /// Top-left corner in pixels.
    pub origin: Point,
    pub style: Style,
    pub notation: Option<NotationLabel>,
    pub piece: Option<PieceView>,
}

/// An arrow with its endpoints measured between square centers.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct ArrowView {
    pub arrow: Arrow,
    pub from: Point,
    pub to: Point,
}

/// The piece following the pointer during a drag. It is centered on the
/// pointer with [`BoardFlags::SNAP_TO_CURSOR`], and keeps the offset it was
/// grabbed at otherwise.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct DragPreview {
    pub piece: Piece,
    pub glyph: Glyph,
    /// Top-left corner in pixels.
    pub origin: Point,
}

/// The promotion dialog, anchored at the promotion square.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct PromotionView {
    pub target: Square,
    pub origin: Point,
    pub choices: Vec<(Role, Glyph)>,
}

#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct BoardView {
    pub style: Style,
    pub width: f32,
    pub square_width: f32,
    /// In visual order, row by row from the top-left corner.
    pub squares: Vec<SquareView>,
    /// Custom arrows followed by arrows drawn by the user.
    pub arrows: Vec<ArrowView>,
    /// The arrow being drawn.
    pub drawing: Option<ArrowView>,
    pub drag_preview: Option<DragPreview>,
    pub promotion: Option<PromotionView>,
    /// Shared by all notation labels.
    pub notation_style: Style,
}

impl BoardView {
    pub fn square(&self, sq: Square) -> Option<&SquareView> {
        self.squares.iter().find(|view| view.square == sq)
    }

    pub fn piece(&self, sq: Square) -> Option<&PieceView> {
        self.square(sq).and_then(|view| view.piece.as_ref())
    }
}

/// Shown instead of the board when drawing it failed: a de-emphasized
/// white king.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct FallbackView {
    pub piece: Piece,
    pub width: f32,
    pub opacity: f32,
    pub error: RenderError,
}

/// Result of [`Controller::render()`].
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Rendered {
    Board(BoardView),
    Fallback(FallbackView),
}

impl Rendered {
    pub fn board(&self) -> Option<&BoardView> {
        match self {
            Rendered::Board(view) => Some(view),
            Rendered::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }
}

impl<H: BoardHost, S: Scheduler> Controller<H, S> {
    /// Computes the render model. If a custom piece renderer fails, the
    /// whole board is replaced by a [`FallbackView`].
    pub fn render(&self) -> Rendered {
        match self.render_board() {
            Ok(view) => Rendered::Board(view),
            Err(err) => {
                error!(board = %self.config().id, %err, "piece renderer failed");
                Rendered::Fallback(FallbackView {
                    piece: Color::White.king(),
                    width: self.config().geometry.width,
                    opacity: FALLBACK_OPACITY,
                    error: err,
                })
            }
        }
    }

    fn render_board(&self) -> Result<BoardView, RenderError> {
        let config = self.config();
        let geometry = &config.geometry;
        let square_width = geometry.square_width();
        let drag = self.drag();
        let diff = self.is_waiting_for_animation().then(|| self.position_diff());

        let mut squares = Vec::new();
        for sq in geometry.squares() {
            let piece = match self.position().piece_at(sq) {
                Some(piece) => {
                    let source = Origin::Square(sq);
                    let is_dragging = drag.is_some_and(|drag| drag.source == source);
                    Some(PieceView {
                        piece,
                        glyph: glyph(
                            config,
                            &PieceRenderContext {
                                piece,
                                is_dragging,
                                square_width,
                                square: Some(sq),
                            },
                        )?,
                        draggable: config.flags.contains(BoardFlags::ARE_PIECES_DRAGGABLE)
                            && self.host().is_draggable(piece, source),
                        is_dragging,
                        transform: diff
                            .and_then(|diff| slide_target(diff, sq, geometry))
                            .map(|to| {
                                let from = geometry.square_center(sq);
                                let to = geometry.square_center(to);
                                Transform {
                                    dx: to.x - from.x,
                                    dy: to.y - from.y,
                                    duration: config.animation_duration,
                                }
                            }),
                    })
                }
                None => None,
            };

            squares.push(SquareView {
                square: sq,
                origin: geometry.square_origin(sq),
                style: self.square_style(sq),
                notation: config
                    .flags
                    .contains(BoardFlags::SHOW_NOTATION)
                    .then(|| notation_label(geometry, sq))
                    .flatten(),
                piece,
            });
        }

        let arrow_view = |arrow: &Arrow| ArrowView {
            arrow: arrow.clone(),
            from: geometry.square_center(arrow.start),
            to: geometry.square_center(arrow.end),
        };

        let drag_preview = match drag {
            Some(drag) => match drag.pointer {
                Some(pointer) => Some(DragPreview {
                    piece: drag.piece,
                    glyph: glyph(
                        config,
                        &PieceRenderContext {
                            piece: drag.piece,
                            is_dragging: true,
                            square_width,
                            square: None,
                        },
                    )?,
                    origin: if config.flags.contains(BoardFlags::SNAP_TO_CURSOR) {
                        let half = square_width / 2.0;
                        Point::new(pointer.x - half, pointer.y - half)
                    } else {
                        Point::new(pointer.x - drag.grab_offset.x, pointer.y - drag.grab_offset.y)
                    },
                }),
                None => None,
            },
            None => None,
        };

        let promotion = match self.pending_promotion() {
            Some(pending) => {
                let mut choices = Vec::new();
                for piece in pending.choices() {
                    let glyph = glyph(
                        config,
                        &PieceRenderContext {
                            piece,
                            is_dragging: false,
                            square_width,
                            square: Some(pending.target),
                        },
                    )?;
                    choices.push((piece.role, glyph));
                }
                Some(PromotionView {
                    target: pending.target,
                    origin: geometry.square_origin(pending.target),
                    choices,
                })
            }
            None => None,
        };

        Ok(BoardView {
            style: config.styles.board.clone(),
            width: geometry.width,
            square_width,
            squares,
            arrows: self.arrows().all().map(arrow_view).collect(),
            drawing: self.arrows().drawing().map(arrow_view),
            drag_preview,
            promotion,
            notation_style: config.styles.notation.clone(),
        })
    }

    /// Layers the light or dark style, then the premove style, then the
    /// drop target highlight, then the custom style of the square.
    fn square_style(&self, sq: Square) -> Style {
        let config = self.config();
        let styles = &config.styles;
        let light = config.geometry.is_light(sq);

        let mut style = if light {
            styles.light_square.clone()
        } else {
            styles.dark_square.clone()
        };
        if self.premoves().touches(sq) {
            style.merge(if light {
                &styles.premove_light_square
            } else {
                &styles.premove_dark_square
            });
        }
        if self.drag().is_some_and(|drag| drag.over == Some(sq)) {
            style.merge(&styles.drop_square);
        }
        if let Some(custom) = styles.squares.get(&sq) {
            style.merge(custom);
        }
        style
    }
}

fn glyph(config: &BoardConfig, ctx: &PieceRenderContext) -> Result<Glyph, RenderError> {
    Ok(match config.pieces.get(&ctx.piece) {
        None => Glyph::Default,
        Some(PieceRenderer::Static(markup)) => Glyph::Markup(markup.clone()),
        Some(PieceRenderer::Render(render)) => Glyph::Markup(render(ctx)?),
    })
}

/// Finds where the piece removed from `sq` went: a square where the same
/// piece was added, or for a pawn, a square on a back rank within one file
/// where any piece was added.
fn slide_target(diff: &PositionDiff, sq: Square, geometry: &Geometry) -> Option<Square> {
    let removed = diff.removed.piece_at(sq)?;
    diff.added
        .iter()
        .find(|&(to, piece)| {
            piece == removed
                || (removed.role == Role::Pawn
                    && piece.color == removed.color
                    && (to.rank() == 0 || to.rank() + 1 == geometry.rows)
                    && to.file_distance(sq) <= 1)
        })
        .map(|(to, _)| to)
}

/// Files are labeled along the bottom edge, ranks along the left edge.
fn notation_label(geometry: &Geometry, sq: Square) -> Option<NotationLabel> {
    let (bottom_rank, left_file) = match geometry.orientation {
        Color::White => (0, 0),
        Color::Black => (
            geometry.rows.saturating_sub(1),
            geometry.columns.saturating_sub(1),
        ),
    };
    let label = NotationLabel {
        file: (sq.rank() == bottom_rank).then(|| sq.file_char()),
        rank: (sq.file() == left_file).then(|| u16::from(sq.rank()) + 1),
    };
    (label.file.is_some() || label.rank.is_some()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position::Position, timer::ManualScheduler};

    fn board(input: &str) -> Controller<(), ManualScheduler> {
        Controller::new(BoardConfig::default(), (), ManualScheduler::new(), input)
    }

    #[test]
    fn test_start_position_view() {
        let controller = board("start");
        let view = controller.render().board().cloned().expect("board");
        assert_eq!(view.squares.len(), 64);
        assert_eq!(view.squares[0].square, Square::A8);
        assert_eq!(view.squares[63].square, Square::H1);
        assert_eq!(view.square_width, 70.0);

        let king = view.piece(Square::E1).expect("white king");
        assert_eq!(king.piece, Color::White.king());
        assert_eq!(king.glyph, Glyph::Default);
        assert!(king.draggable);
        assert_eq!(king.transform, None);
        assert!(view.piece(Square::E4).is_none());
    }

    #[test]
    fn test_notation_labels() {
        let controller = board("start");
        let view = controller.render().board().cloned().expect("board");
        assert_eq!(
            view.square(Square::A1).and_then(|sq| sq.notation),
            Some(NotationLabel {
                file: Some('a'),
                rank: Some(1)
            })
        );
        assert_eq!(
            view.square(Square::A8).and_then(|sq| sq.notation),
            Some(NotationLabel {
                file: None,
                rank: Some(8)
            })
        );
        assert_eq!(view.square(Square::E4).and_then(|sq| sq.notation), None);
        assert_eq!(view.notation_style.get("font-size"), Some("13px"));

        let mut controller = board("start");
        controller.set_orientation(Color::Black);
        let view = controller.render().board().cloned().expect("board");
        assert_eq!(view.squares[0].square, Square::H1);
        assert_eq!(
            view.square(Square::H8).and_then(|sq| sq.notation),
            Some(NotationLabel {
                file: Some('h'),
                rank: Some(8)
            })
        );
    }

    #[test]
    fn test_premove_squares_overlaid() {
        let mut config = BoardConfig::default();
        config.flags |= BoardFlags::ARE_PREMOVES_ALLOWED;
        config.styles.light_square.set("color", "#000");
        let mut controller = Controller::new(config, (), ManualScheduler::new(), "start");

        controller.set_position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        controller.handle_set_position(Origin::Square(Square::D7), Some(Square::D6), Color::Black.pawn());
        assert_eq!(controller.premoves().len(), 1);

        let view = controller.render().board().cloned().expect("board");
        let light = &view.square(Square::D7).expect("d7").style;
        assert_eq!(light.get("background-color"), Some("#bd2828"));
        assert_eq!(light.get("color"), Some("#000"));
        let dark = &view.square(Square::D6).expect("d6").style;
        assert_eq!(dark.get("background-color"), Some("#a42323"));
        let untouched = &view.square(Square::D5).expect("d5").style;
        assert_eq!(untouched.get("background-color"), Some("#f0d9b5"));
    }

    #[test]
    fn test_slide_transform() {
        let mut controller = board("start");
        controller.set_position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        let view = controller.render().board().cloned().expect("board");
        let pawn = view.piece(Square::E2).expect("pawn still on e2");
        assert_eq!(
            pawn.transform,
            Some(Transform {
                dx: 0.0,
                dy: -140.0,
                duration: Duration::from_millis(300),
            })
        );
        assert_eq!(view.piece(Square::D2).and_then(|p| p.transform), None);
    }

    #[test]
    fn test_promotion_slide_target() {
        let geometry = Geometry::default();
        let old: Position = [(Square::B7, Color::White.pawn())].into_iter().collect();
        let new: Position = [(Square::A8, Color::White.queen())].into_iter().collect();
        let diff = PositionDiff::between(&old, &new);
        assert_eq!(slide_target(&diff, Square::B7, &geometry), Some(Square::A8));
        assert_eq!(slide_target(&diff, Square::A8, &geometry), None);
    }

    #[test]
    fn test_render_fallback() {
        let mut config = BoardConfig::default();
        config.pieces.insert(
            Color::Black.queen(),
            PieceRenderer::render(|_| Err(RenderError::new("broken"))),
        );
        let controller = Controller::new(config, (), ManualScheduler::new(), "start");
        match controller.render() {
            Rendered::Fallback(fallback) => {
                assert_eq!(fallback.piece, Color::White.king());
                assert_eq!(fallback.opacity, FALLBACK_OPACITY);
                assert_eq!(fallback.error, RenderError::new("broken"));
            }
            Rendered::Board(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_custom_renderer_context() {
        let mut config = BoardConfig::default();
        config.pieces.insert(
            Color::White.king(),
            PieceRenderer::render(|ctx| Ok(format!("king {} {}", ctx.square_width, ctx.is_dragging))),
        );
        config
            .pieces
            .insert(Color::Black.king(), PieceRenderer::Static("<svg/>".to_owned()));
        let controller = Controller::new(config, (), ManualScheduler::new(), "start");
        let view = controller.render().board().cloned().expect("board");
        assert_eq!(
            view.piece(Square::E1).map(|p| p.glyph.clone()),
            Some(Glyph::Markup("king 70 false".to_owned()))
        );
        assert_eq!(
            view.piece(Square::E8).map(|p| p.glyph.clone()),
            Some(Glyph::Markup("<svg/>".to_owned()))
        );
    }
}
