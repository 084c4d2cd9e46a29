//! Transition and circuit definitions as stored on disk
//!
//! These are unvalidated serde types. They become lookup tables through
//! [`TransitionRuleSet::from_definition`](crate::TransitionRuleSet::from_definition)
//! and [`CircuitRuleSet::from_definition`](crate::CircuitRuleSet::from_definition).

use crate::neighbors::Direction;
use serde::{Deserialize, Serialize};
use tilegen_core::TileRef;

/// A tile placed for one neighbor pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTile {
    /// Neighbors that make up the pattern
    #[serde(default)]
    pub pattern: Vec<Direction>,
    pub tile: TileRef,
}

/// Fallback tile for a dominant direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionTile {
    pub direction: Direction,
    pub tile: TileRef,
}

/// All transitions of a project, in priority order (first = highest)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionsDefinition {
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
}

impl TransitionsDefinition {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition (lowest priority so far)
    pub fn with(mut self, transition: TransitionDefinition) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// Tiles blending cells of `group` into neighboring cells of `neighbor`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionDefinition {
    /// Group of the cell being replaced
    pub group: String,
    /// Group of the differing neighbors
    pub neighbor: String,
    /// Tiles keyed by the directions where `neighbor` is found
    #[serde(default)]
    pub tiles: Vec<PatternTile>,
    /// Used when no pattern matches, keyed by the pattern's dominant direction
    #[serde(default)]
    pub defaults: Vec<DirectionTile>,
}

impl TransitionDefinition {
    pub fn new(group: impl Into<String>, neighbor: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            neighbor: neighbor.into(),
            tiles: Vec::new(),
            defaults: Vec::new(),
        }
    }

    pub fn tile(mut self, pattern: &[Direction], tile: TileRef) -> Self {
        self.tiles.push(PatternTile {
            pattern: pattern.to_vec(),
            tile,
        });
        self
    }

    pub fn default_tile(mut self, direction: Direction, tile: TileRef) -> Self {
        self.defaults.push(DirectionTile { direction, tile });
        self
    }
}

/// All circuits of a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitsDefinition {
    #[serde(default)]
    pub circuits: Vec<CircuitDefinition>,
}

impl CircuitsDefinition {
    pub fn new() -> Self {
        Self {
            circuits: Vec::new(),
        }
    }

    pub fn with(mut self, circuit: CircuitDefinition) -> Self {
        self.circuits.push(circuit);
        self
    }
}

/// Directional pieces of one circuit-eligible group.
/// Patterns use edge directions only; an empty pattern is the isolated piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitDefinition {
    pub group: String,
    #[serde(default)]
    pub tiles: Vec<PatternTile>,
}

impl CircuitDefinition {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            tiles: Vec::new(),
        }
    }

    pub fn tile(mut self, pattern: &[Direction], tile: TileRef) -> Self {
        self.tiles.push(PatternTile {
            pattern: pattern.to_vec(),
            tile,
        });
        self
    }
}
