//! Tile references and tile-space rectangles

use serde::{Deserialize, Serialize};
use std::fmt;

/// A drawable tile: sheet index plus tile number within that sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileRef {
    /// Index into the sheet list supplied with the definitions
    pub sheet: u32,
    /// Tile number within the sheet
    pub number: u32,
}

impl TileRef {
    pub const fn new(sheet: u32, number: u32) -> Self {
        Self { sheet, number }
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sheet, self.number)
    }
}

/// Axis-aligned rectangle in tile coordinates.
///
/// The rectangle is half-open: it covers columns `x0..x1` and rows `y0..y1`,
/// so `TileArea::new(0, 0, 8, 64)` covers columns 0 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileArea {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TileArea {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Whether the corners are ordered (`x0 <= x1` and `y0 <= y1`)
    pub fn is_well_formed(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Intersect with the grid `[0, width) x [0, height)`.
    /// Returns `None` when nothing of the area lies inside the grid.
    pub fn clip(&self, width: u32, height: u32) -> Option<TileArea> {
        let clipped = TileArea {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(width as i32),
            y1: self.y1.min(height as i32),
        };
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}
