//! Transition and circuit autotiling for generated grids
//!
//! This crate turns the hard group boundaries of a freshly generated grid
//! into blended edges, and linear features into connected pieces.
//!
//! # Features
//! - 8-neighbor transition matching with 47 normalized patterns
//! - Multi-group boundaries through composite transition patterns
//! - Dominant-direction default tiles
//! - 4-neighbor circuit pieces with lower-connectivity fallback
//!
//! # Example
//!
//! ```rust,ignore
//! use tilegen_autotile::{
//!     resolve_transitions, Direction, TransitionDefinition, TransitionRuleSet,
//!     TransitionsDefinition,
//! };
//!
//! let def = TransitionsDefinition::new().with(
//!     TransitionDefinition::new("grass", "water")
//!         .tile(&[Direction::N], TileRef::new(0, 20))
//!         .default_tile(Direction::S, TileRef::new(0, 21)),
//! );
//! let rules = TransitionRuleSet::from_definition(&def, &catalog)?;
//! let report = resolve_transitions(&mut grid, &catalog, &rules);
//! report.log_summary();
//! ```

pub mod circuit;
pub mod config;
pub mod neighbors;
pub mod report;
pub mod transition;

pub use circuit::{
    connectivity, resolve_circuits, CircuitResolver, CircuitRuleSet, CircuitTable,
    FALLBACK_DROP_ORDER,
};
pub use config::{
    CircuitDefinition, CircuitsDefinition, DirectionTile, PatternTile, TransitionDefinition,
    TransitionsDefinition,
};
pub use neighbors::{
    calculate_mask, dominant_direction, format_mask, mask_of, normalize_mask, Direction,
};
pub use report::{ResolveReport, ResolveWarning};
pub use transition::{resolve_transitions, TransitionResolver, TransitionRuleSet, TransitionTable};

// Re-export tilegen_core
pub use tilegen_core;
