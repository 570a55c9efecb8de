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

//! Board dimensions and pixel coordinates.
//!
//! All pixel values are relative to the top-left corner of the board.
//!
//! # Examples
//!
//! ```
//! use boardview::{Color, Geometry, Square};
//!
//! let mut geometry = Geometry::default();
//! geometry.width = 400.0;
//! assert_eq!(geometry.square_width(), 50.0);
//!
//! let center = geometry.square_center(Square::A1);
//! assert_eq!((center.x, center.y), (25.0, 375.0));
//!
//! geometry.orientation = Color::Black;
//! let center = geometry.square_center(Square::A1);
//! assert_eq!((center.x, center.y), (375.0, 25.0));
//! ```

use crate::{color::Color, square::Square};

/// A point in board pixel space.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

/// Board dimensions, pixel width and orientation.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Geometry {
    /// Number of ranks. Defaults to 8.
    pub rows: u8,
    /// Number of files, at most 26. Defaults to 8.
    pub columns: u8,
    /// Board width in pixels. Defaults to 560.
    pub width: f32,
    /// The side shown at the bottom of the board. Defaults to white.
    pub orientation: Color,
}

impl Default for Geometry {
    fn default() -> Geometry {
        Geometry {
            rows: 8,
            columns: 8,
            width: 560.0,
            orientation: Color::White,
        }
    }
}

impl Geometry {
    /// A board with the given number of ranks and files and default width
    /// and orientation.
    pub fn new(rows: u8, columns: u8) -> Geometry {
        Geometry {
            rows,
            columns,
            ..Geometry::default()
        }
    }

    /// Tests if the square is on the board.
    #[inline]
    pub const fn contains(&self, sq: Square) -> bool {
        sq.file() < self.columns && sq.rank() < self.rows
    }

    /// The rank a pawn of the given color promotes on.
    pub fn farthest_rank(&self, color: Color) -> u8 {
        color.fold(self.rows.saturating_sub(1), 0)
    }

    pub fn square_width(&self) -> f32 {
        if self.columns == 0 {
            0.0
        } else {
            self.width / f32::from(self.columns)
        }
    }

    pub fn height(&self) -> f32 {
        self.square_width() * f32::from(self.rows)
    }

    /// Column and row of the square as seen by the viewer, counted from
    /// the top-left corner.
    fn visual(&self, sq: Square) -> (u8, u8) {
        match self.orientation {
            Color::White => (sq.file(), self.rows.saturating_sub(1).saturating_sub(sq.rank())),
            Color::Black => (self.columns.saturating_sub(1).saturating_sub(sq.file()), sq.rank()),
        }
    }

    /// Top-left corner of the square.
    pub fn square_origin(&self, sq: Square) -> Point {
        let (column, row) = self.visual(sq);
        let width = self.square_width();
        Point::new(f32::from(column) * width, f32::from(row) * width)
    }

    /// Center of the square. Slide animations and arrows are measured
    /// between square centers.
    pub fn square_center(&self, sq: Square) -> Point {
        let origin = self.square_origin(sq);
        let half = self.square_width() / 2.0;
        Point::new(origin.x + half, origin.y + half)
    }

    /// Gets the square under a pixel point, or `None` outside the board.
    pub fn square_at(&self, point: Point) -> Option<Square> {
        let width = self.square_width();
        if width <= 0.0 || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / width) as u32;
        let row = (point.y / width) as u32;
        if column >= u32::from(self.columns) || row >= u32::from(self.rows) {
            return None;
        }
        let (column, row) = (column as u8, row as u8);
        let (file, rank) = match self.orientation {
            Color::White => (column, self.rows - 1 - row),
            Color::Black => (self.columns - 1 - column, row),
        };
        Square::from_coords(file, rank)
    }

    /// All squares of the board in visual order, row by row from the
    /// top-left corner.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).filter_map(move |column| {
                let (file, rank) = match self.orientation {
                    Color::White => (column, self.rows - 1 - row),
                    Color::Black => (self.columns - 1 - column, row),
                };
                Square::from_coords(file, rank)
            })
        })
    }

    /// Tests if the square is drawn in the light color. `a1` is dark.
    pub const fn is_light(&self, sq: Square) -> bool {
        (sq.file() + sq.rank()) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_order() {
        let geometry = Geometry::default();
        let squares: Vec<Square> = geometry.squares().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[7], Square::H8);
        assert_eq!(squares[63], Square::H1);

        let flipped = Geometry {
            orientation: Color::Black,
            ..geometry
        };
        let squares: Vec<Square> = flipped.squares().collect();
        assert_eq!(squares[0], Square::H1);
        assert_eq!(squares[63], Square::A8);
    }

    #[test]
    fn test_square_at_inverts_center() {
        for orientation in Color::ALL {
            let geometry = Geometry {
                orientation,
                ..Geometry::new(10, 12)
            };
            for sq in geometry.squares() {
                assert_eq!(geometry.square_at(geometry.square_center(sq)), Some(sq));
            }
            assert_eq!(geometry.square_at(Point::new(-1.0, 5.0)), None);
            assert_eq!(geometry.square_at(Point::new(5.0, geometry.height() + 1.0)), None);
        }
    }

    #[test]
    fn test_light_squares() {
        let geometry = Geometry::default();
        assert!(!geometry.is_light(Square::A1));
        assert!(geometry.is_light(Square::H1));
        assert!(geometry.is_light(Square::A8));
    }

    #[test]
    fn test_farthest_rank() {
        let geometry = Geometry::new(10, 8);
        assert_eq!(geometry.farthest_rank(Color::White), 9);
        assert_eq!(geometry.farthest_rank(Color::Black), 0);
    }
}
