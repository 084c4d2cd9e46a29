//! Tile sheet references

use crate::TileRef;
use serde::{Deserialize, Serialize};

/// A single sheet image referenced by `TileRef::sheet`.
///
/// Sheet content is never read here. The grid size is only used to
/// range-check tile numbers; `columns * rows == 0` means "unknown size".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSheet {
    /// Path to the image file (relative to the host's resource directory)
    pub path: String,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub rows: u32,
}

impl TileSheet {
    /// Create a sheet reference with a known tile grid
    pub fn new(path: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self {
            path: path.into(),
            columns,
            rows,
        }
    }

    /// Create a sheet reference whose tile count is unknown
    pub fn unknown_size(path: impl Into<String>) -> Self {
        Self::new(path, 0, 0)
    }

    /// Total number of tiles in this sheet, if known
    pub fn tile_count(&self) -> Option<u64> {
        let count = self.columns as u64 * self.rows as u64;
        (count > 0).then_some(count)
    }

    /// Check that a tile number exists on this sheet
    pub fn contains_number(&self, number: u32) -> bool {
        self.tile_count().map_or(true, |count| (number as u64) < count)
    }
}

/// Check a tile against a sheet list. Returns a description of the problem, if any.
pub(crate) fn check_tile(sheets: &[TileSheet], tile: TileRef) -> Option<String> {
    let Some(sheet) = sheets.get(tile.sheet as usize) else {
        return Some(format!(
            "tile {} references sheet {} but only {} sheet(s) are defined",
            tile,
            tile.sheet,
            sheets.len()
        ));
    };
    if !sheet.contains_number(tile.number) {
        return Some(format!(
            "tile {} is out of range for sheet '{}' ({} tiles)",
            tile,
            sheet.path,
            sheet.tile_count().unwrap_or(0)
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count() {
        assert_eq!(TileSheet::new("forest.png", 4, 8).tile_count(), Some(32));
        assert_eq!(TileSheet::unknown_size("forest.png").tile_count(), None);
    }

    #[test]
    fn test_large_sheet_does_not_overflow() {
        let sheets = vec![TileSheet::new("huge.png", 70_000, 70_000)];
        assert_eq!(sheets[0].tile_count(), Some(4_900_000_000));
        assert!(check_tile(&sheets, TileRef::new(0, u32::MAX)).is_none());

        let sheets = vec![TileSheet::new("wide.png", 70_000, 1)];
        let message = check_tile(&sheets, TileRef::new(0, 70_000)).unwrap();
        assert!(message.contains("70000 tiles"), "{}", message);
    }

    #[test]
    fn test_unknown_size_sheet_accepts_any_number() {
        let sheets = vec![TileSheet::unknown_size("forest.png")];
        assert!(check_tile(&sheets, TileRef::new(0, 9999)).is_none());
    }

    #[test]
    fn test_check_tile_rejects_bad_sheet_and_number() {
        let sheets = vec![TileSheet::new("forest.png", 2, 2)];
        assert!(check_tile(&sheets, TileRef::new(0, 3)).is_none());
        assert!(check_tile(&sheets, TileRef::new(0, 4)).is_some());
        assert!(check_tile(&sheets, TileRef::new(1, 0)).is_some());
    }
}
