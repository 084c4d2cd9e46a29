//! Core data structures for tilegen
//!
//! This crate provides the fundamental types shared by the generator and the
//! autotile resolvers:
//! - `TileRef` - A drawable tile (sheet index + tile number)
//! - `TileArea` - Half-open rectangle in tile coordinates
//! - `TileSheet` - Sheet reference used to range-check tile numbers
//! - `TileCatalog` - Immutable tile -> group mapping
//! - `Grid` / `GroupLayer` - Generated tiles and their group classification
//! - `TileLayer` / `TileStorage` - Destination storage for appended grids
//! - `load_definition` - JSON/TOML definition loading

mod catalog;
mod definition;
mod grid;
mod layer;
mod sheet;
mod tile;

pub use catalog::{GroupDefinition, GroupId, GroupsDefinition, TileCatalog, TileGroup};
pub use definition::{load_definition, parse_definition, DefinitionError, DefinitionFormat};
pub use grid::{Grid, GroupLayer};
pub use layer::{append_grid, TileLayer, TileStorage};
pub use sheet::TileSheet;
pub use tile::{TileArea, TileRef};
