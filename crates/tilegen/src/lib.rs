//! Procedural tile map generation
//!
//! This crate bundles the tilegen crates behind one dependency:
//! - `tilegen_core` - Tiles, areas, sheets, the tile catalog, grids and tile layers
//! - `tilegen_autotile` - Transition and circuit resolution
//! - `tilegen_generator` - Directive-driven region generation and the full pipeline
//!   (enabled by the default `generator` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use tilegen::prelude::*;
//!
//! let parameters = GeneratorParameter::new()
//!     .with(Directive::size_bound(16, 16, 64, 64))
//!     .with(Directive::fill(TileRef::new(0, 0)))
//!     .with(Directive::region(TileRef::new(0, 12), TileArea::new(0, 0, 8, 64), 4, 16));
//!
//! let map = generate_map(&parameters, sheets, &groups, &transitions, Some(&circuits), None)?;
//! let mut layer = TileLayer::new("Ground".to_string(), 64, 64);
//! layer.append(&map.grid, 0, 0);
//! ```

// Re-export the member crates
pub use tilegen_autotile;
pub use tilegen_core;
#[cfg(feature = "generator")]
pub use tilegen_generator;

pub use tilegen_autotile::{
    CircuitDefinition, CircuitRuleSet, CircuitsDefinition, Direction, ResolveReport,
    ResolveWarning, TransitionDefinition, TransitionRuleSet, TransitionsDefinition,
};
pub use tilegen_core::{
    append_grid, DefinitionError, Grid, GroupLayer, GroupsDefinition, TileArea, TileCatalog,
    TileLayer, TileRef, TileSheet, TileStorage,
};
#[cfg(feature = "generator")]
pub use tilegen_generator::{
    generate_map, generate_with, BrushShape, DefinitionPaths, Definitions, Directive,
    GenerateError, GeneratedMap, GeneratorParameter, GeneratorSettings, MapGenerator,
    ParameterError,
};

/// Commonly used types
pub mod prelude {
    pub use tilegen_autotile::{
        CircuitDefinition, CircuitsDefinition, Direction, ResolveReport, ResolveWarning,
        TransitionDefinition, TransitionsDefinition,
    };
    pub use tilegen_core::{
        append_grid, Grid, GroupsDefinition, TileArea, TileLayer, TileRef, TileSheet,
        TileStorage,
    };
    #[cfg(feature = "generator")]
    pub use tilegen_generator::{
        generate_map, BrushShape, DefinitionPaths, Definitions, Directive, GeneratedMap,
        GeneratorParameter, GeneratorSettings, MapGenerator,
    };
}
