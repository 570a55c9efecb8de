//! A headless chessboard widget: position notation, position diffing,
//! premoves and animated reconciliation of host-supplied positions.
//!
//! The crate does not draw anything. A [`Controller`] holds the state of one
//! board, receives interaction events from the embedding UI and reports
//! moves to a [`BoardHost`]. [`Controller::render()`] computes a
//! [`BoardView`] for the embedding UI to draw.
//!
//! # Examples
//!
//! Decode and encode piece placements:
//!
//! ```
//! use boardview::{Color, Geometry, Position, Square};
//!
//! let geometry = Geometry::default();
//! let pos = Position::from_notation("8/8/8/8/8/8/8/4K3", &geometry)?;
//! assert_eq!(pos.piece_at(Square::E1), Some(Color::White.king()));
//! assert_eq!(pos.to_notation(&geometry).as_deref(), Some("8/8/8/8/8/8/8/4K3"));
//! # Ok::<_, boardview::fen::ParseNotationError>(())
//! ```
//!
//! Accept moves the user drops, and queue premoves while it is the other
//! side's turn:
//!
//! ```
//! use boardview::{
//!     BoardConfig, BoardFlags, BoardHost, Controller, DropResponse, ManualScheduler, Origin,
//!     Piece, Square,
//! };
//!
//! struct Game;
//!
//! impl BoardHost for Game {
//!     fn on_piece_drop(&mut self, _source: Origin, _target: Square, _piece: Piece) -> DropResponse {
//!         DropResponse::Unhandled
//!     }
//! }
//!
//! let mut config = BoardConfig::default();
//! config.flags |= BoardFlags::ARE_PREMOVES_ALLOWED;
//!
//! let mut board = Controller::new(config, Game, ManualScheduler::new(), "start");
//!
//! // 1. e4, applied by the board itself.
//! let pawn = board.position().piece_at(Square::E2).expect("pawn");
//! board.handle_set_position(Origin::Square(Square::E2), Some(Square::E4), pawn);
//! assert!(board.position().piece_at(Square::E4).is_some());
//!
//! // White moves again before Black did: queued as a premove.
//! let knight = board.position().piece_at(Square::G1).expect("knight");
//! board.handle_set_position(Origin::Square(Square::G1), Some(Square::F3), knight);
//! assert_eq!(board.premoves().len(), 1);
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   vocabulary types, positions and arrows.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types and positions, for fuzzing.

#![doc(html_root_url = "https://docs.rs/boardview/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod color;
mod config;
mod controller;
mod diff;
mod geometry;
mod host;
mod position;
mod premove;
mod role;
mod square;
mod timer;
mod types;

pub mod arrows;
pub mod fen;
pub mod promotion;
pub mod view;

pub use arrows::{Arrow, ArrowGesture, Arrows};
pub use color::{Color, ParseColorError};
pub use config::{
    BoardConfig, BoardFlags, BoardStyles, DropOffBoard, PieceRenderContext, PieceRenderer,
    PieceRenderers, RenderError, RenderFn, Style,
};
pub use controller::{Controller, DragPayload, DragState};
pub use diff::PositionDiff;
pub use fen::PositionInput;
pub use geometry::{Geometry, Point};
pub use host::{BoardHost, DropResponse};
pub use position::{Iter, Position};
pub use premove::{Premove, PremoveAttempt, PremoveQueue};
pub use role::Role;
pub use square::{ParseSquareError, Square};
pub use timer::{ManualScheduler, Scheduler, TimeoutHandle};
pub use types::{Origin, ParsePieceError, Piece};
pub use view::{BoardView, Rendered};
