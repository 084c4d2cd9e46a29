//! Generated tile grid and its group classification

use crate::{GroupId, TileCatalog, TileRef};
use serde::{Deserialize, Serialize};

/// Fixed-size, row-major grid of tiles. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<TileRef>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    pub fn filled(width: u32, height: u32, fill: TileRef) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<TileRef> {
        self.index(x, y).and_then(|idx| self.cells.get(idx).copied())
    }

    /// Set a cell. Out-of-bounds writes are ignored and return `false`.
    pub fn set(&mut self, x: u32, y: u32, tile: TileRef) -> bool {
        match self.index(x, y).and_then(|idx| self.cells.get_mut(idx)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[TileRef] {
        &self.cells
    }

    /// Iterate `(x, y, tile)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, TileRef)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &tile)| ((idx % width) as u32, (idx / width) as u32, tile))
    }
}

/// Group classification of a grid, computed once before resolution.
///
/// Resolvers read this snapshot instead of the live grid, so replacing a
/// cell with a transition or circuit tile never changes what its neighbors
/// see during the same pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayer {
    width: u32,
    height: u32,
    groups: Vec<Option<GroupId>>,
}

impl GroupLayer {
    /// Classify every cell of `grid`. Tiles absent from the catalog map to `None`.
    pub fn classify(grid: &Grid, catalog: &TileCatalog) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            groups: grid.cells().iter().map(|&t| catalog.group_of(t)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Group at a signed position. `None` when out of bounds or unclassified.
    pub fn group_at(&self, x: i32, y: i32) -> Option<GroupId> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.groups.get(idx).copied().flatten()
    }
}
