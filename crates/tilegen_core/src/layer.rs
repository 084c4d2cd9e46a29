//! Destination tile storage and grid appending

use crate::{Grid, TileRef};
use serde::{Deserialize, Serialize};

/// Tile storage of a live map that generated grids are appended into
pub trait TileStorage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_tile(&mut self, x: u32, y: u32, tile: TileRef);
}

/// Copy `grid` into `storage` with its top-left cell at `(offset_x, offset_y)`.
///
/// Cells that land outside the storage are clipped. Appending the same grid
/// at the same offset twice leaves the storage as appending once.
/// Returns the number of cells written.
pub fn append_grid<S: TileStorage + ?Sized>(
    storage: &mut S,
    grid: &Grid,
    offset_x: i32,
    offset_y: i32,
) -> usize {
    let dest_w = storage.width() as i64;
    let dest_h = storage.height() as i64;
    let mut written = 0;

    for (x, y, tile) in grid.iter() {
        let dx = offset_x as i64 + x as i64;
        let dy = offset_y as i64 + y as i64;
        if dx < 0 || dy < 0 || dx >= dest_w || dy >= dest_h {
            continue;
        }
        storage.set_tile(dx as u32, dy as u32, tile);
        written += 1;
    }

    tracing::debug!(
        offset_x,
        offset_y,
        written,
        clipped = grid.cells().len() - written,
        "grid appended"
    );
    written
}

/// A named tile layer: `None` means empty, `Some(tile)` a placed tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Option<TileRef>>,
}

impl TileLayer {
    /// Create an empty tile layer
    pub fn new(name: String, width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            name,
            width,
            height,
            tiles: vec![None; size],
        }
    }

    pub fn get_tile(&self, x: u32, y: u32) -> Option<TileRef> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }

    /// Append a generated grid at an offset (see [`append_grid`])
    pub fn append(&mut self, grid: &Grid, offset_x: i32, offset_y: i32) -> usize {
        append_grid(self, grid, offset_x, offset_y)
    }
}

impl TileStorage for TileLayer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_tile(&mut self, x: u32, y: u32, tile: TileRef) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(cell) = self
            .tiles
            .get_mut(y as usize * self.width as usize + x as usize)
        {
            *cell = Some(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Grid {
        let mut grid = Grid::filled(width, height, TileRef::new(0, 0));
        for y in 0..height {
            for x in 0..width {
                if (x + y) % 2 == 1 {
                    grid.set(x, y, TileRef::new(0, 1));
                }
            }
        }
        grid
    }

    #[test]
    fn test_new_tile_layer() {
        let layer = TileLayer::new("Ground".to_string(), 10, 10);

        assert_eq!(layer.name, "Ground");
        assert_eq!(layer.tiles.len(), 100);
        assert!(layer.tiles.iter().all(|t| t.is_none()));
    }

    #[test]
    fn test_append_at_offset() {
        let mut layer = TileLayer::new("Ground".to_string(), 8, 8);
        let written = layer.append(&checker(2, 2), 3, 4);

        assert_eq!(written, 4);
        assert_eq!(layer.get_tile(3, 4), Some(TileRef::new(0, 0)));
        assert_eq!(layer.get_tile(4, 4), Some(TileRef::new(0, 1)));
        assert_eq!(layer.get_tile(3, 5), Some(TileRef::new(0, 1)));
        assert_eq!(layer.get_tile(2, 4), None);
    }

    #[test]
    fn test_append_clips_out_of_bounds() {
        let mut layer = TileLayer::new("Ground".to_string(), 4, 4);
        let written = layer.append(&checker(4, 4), 2, -1);

        // Columns 2..4 of rows 0..3 land inside.
        assert_eq!(written, 6);
        assert_eq!(layer.get_tile(2, 0), Some(TileRef::new(0, 1)));
        assert_eq!(layer.get_tile(1, 0), None);
        assert_eq!(layer.get_tile(3, 3), None);
    }

    #[test]
    fn test_append_fully_outside_writes_nothing() {
        let mut layer = TileLayer::new("Ground".to_string(), 4, 4);
        assert_eq!(layer.append(&checker(2, 2), 10, 10), 0);
        assert_eq!(layer.append(&checker(2, 2), -2, 0), 0);
        assert!(layer.tiles.iter().all(|t| t.is_none()));
    }

    #[test]
    fn test_append_is_idempotent() {
        let grid = checker(3, 3);
        let mut once = TileLayer::new("Ground".to_string(), 6, 6);
        once.append(&grid, 1, 2);

        let mut twice = once.clone();
        twice.append(&grid, 1, 2);

        assert_eq!(once, twice);
    }
}
