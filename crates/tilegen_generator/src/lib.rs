//! Directive-driven map generation for tilegen.
//!
//! The primary entry point is [`generate_map`], which builds a base grid from a
//! [`GeneratorParameter`] and resolves its transitions and circuits. For
//! repeated generations against the same definitions, build [`Definitions`]
//! once and use a [`MapGenerator`] with a caller-supplied random number
//! generator.
//!
//! Nothing here touches a live map. Place the result with
//! [`append_grid`](tilegen_core::append_grid).

mod generator;
mod region;
mod types;

use thiserror::Error;
use tilegen_core::{DefinitionError, TileArea, TileRef};

pub use generator::{
    generate_map, generate_with, DefinitionPaths, Definitions, GeneratedMap, MapGenerator,
    SheetsDefinition,
};
pub use region::{RegionGenerator, SizeBounds};
pub use types::{BrushShape, Directive, GeneratorParameter, GeneratorSettings, MapSize};

/// Largest grid width or height; cells are addressed with `i32` coordinates.
pub const MAX_GRID_AXIS: u32 = i32::MAX as u32;

/// Largest number of cells in one grid.
pub const MAX_GRID_CELLS: u64 = u32::MAX as u64;

/// Inconsistent directive lists. Raised before any grid work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("No SizeBound directive")]
    MissingSizeBound,
    #[error("More than one SizeBound directive")]
    DuplicateSizeBound,
    #[error("No Fill directive")]
    MissingFill,
    #[error("More than one Fill directive")]
    DuplicateFill,
    #[error("SizeBound {axis}: minimum {min} exceeds maximum {max}")]
    InvertedBounds {
        axis: &'static str,
        min: u32,
        max: u32,
    },
    #[error("SizeBound {axis}: maximum is zero")]
    EmptyBounds { axis: &'static str },
    #[error("Grid of {width}x{height} exceeds the supported size")]
    OversizedGrid { width: u32, height: u32 },
    #[error("Directive {index}: area {area:?} has inverted corners")]
    InvertedArea { index: usize, area: TileArea },
    #[error("Directive {index} ({kind}): tile {tile} is not in any group")]
    UnknownTile {
        index: usize,
        kind: &'static str,
        tile: TileRef,
    },
}

/// Errors that can occur during map generation
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("Invalid definitions: {0}")]
    Definition(#[from] DefinitionError),
}
