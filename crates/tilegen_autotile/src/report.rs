//! Non-fatal resolution warnings

use crate::neighbors::format_mask;
use std::fmt;
use tilegen_core::{GroupId, TileCatalog};

/// A cell the resolvers could not give an exact tile.
/// The cell keeps its previous tile unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// Boundary cell without a matching transition rule or default
    UnresolvedTransition {
        x: u32,
        y: u32,
        group: GroupId,
        /// Differing neighbor groups, in discovery order
        neighbors: Vec<GroupId>,
        /// Raw difference mask
        pattern: u8,
    },
    /// Circuit cell without any piece, even after fallback
    UnresolvedCircuit {
        x: u32,
        y: u32,
        group: GroupId,
        pattern: u8,
    },
    /// Circuit cell given a lower-connectivity piece (`used`) than its
    /// actual connections (`pattern`)
    CircuitFallback {
        x: u32,
        y: u32,
        group: GroupId,
        pattern: u8,
        used: u8,
    },
}

impl ResolveWarning {
    pub fn position(&self) -> (u32, u32) {
        match *self {
            ResolveWarning::UnresolvedTransition { x, y, .. }
            | ResolveWarning::UnresolvedCircuit { x, y, .. }
            | ResolveWarning::CircuitFallback { x, y, .. } => (x, y),
        }
    }

    /// Describe the warning with group names from `catalog`
    pub fn describe(&self, catalog: &TileCatalog) -> String {
        match self {
            ResolveWarning::UnresolvedTransition {
                x,
                y,
                group,
                neighbors,
                pattern,
            } => {
                let names: Vec<&str> = neighbors.iter().map(|g| catalog.group_name(*g)).collect();
                format!(
                    "unresolved transition at ({}, {}): '{}' next to [{}] ({})",
                    x,
                    y,
                    catalog.group_name(*group),
                    names.join(", "),
                    format_mask(*pattern)
                )
            }
            ResolveWarning::UnresolvedCircuit {
                x,
                y,
                group,
                pattern,
            } => format!(
                "unresolved circuit at ({}, {}): '{}' ({})",
                x,
                y,
                catalog.group_name(*group),
                format_mask(*pattern)
            ),
            ResolveWarning::CircuitFallback {
                x,
                y,
                group,
                pattern,
                used,
            } => format!(
                "circuit fallback at ({}, {}): '{}' ({}) used ({})",
                x,
                y,
                catalog.group_name(*group),
                format_mask(*pattern),
                format_mask(*used)
            ),
        }
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::UnresolvedTransition {
                x, y, group, pattern, ..
            } => write!(
                f,
                "unresolved transition at ({}, {}) for group {} ({})",
                x,
                y,
                group,
                format_mask(*pattern)
            ),
            ResolveWarning::UnresolvedCircuit {
                x,
                y,
                group,
                pattern,
            } => write!(
                f,
                "unresolved circuit at ({}, {}) for group {} ({})",
                x,
                y,
                group,
                format_mask(*pattern)
            ),
            ResolveWarning::CircuitFallback {
                x,
                y,
                group,
                pattern,
                used,
            } => write!(
                f,
                "circuit fallback at ({}, {}) for group {}: {} -> {}",
                x,
                y,
                group,
                format_mask(*pattern),
                format_mask(*used)
            ),
        }
    }
}

/// Aggregated outcome of the resolution passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub warnings: Vec<ResolveWarning>,
    /// Cells replaced with a transition tile
    pub transitions_applied: usize,
    /// Cells replaced with a circuit piece (fallback pieces included)
    pub circuits_applied: usize,
}

impl ResolveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: ResolveWarning) {
        self.warnings.push(warning);
    }

    /// Positions recorded as `UnresolvedTransition`
    pub fn unresolved_transitions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.warnings.iter().filter_map(|w| match w {
            ResolveWarning::UnresolvedTransition { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Positions recorded as `UnresolvedCircuit`
    pub fn unresolved_circuits(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.warnings.iter().filter_map(|w| match w {
            ResolveWarning::UnresolvedCircuit { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Positions that received a fallback circuit piece
    pub fn circuit_fallbacks(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.warnings.iter().filter_map(|w| match w {
            ResolveWarning::CircuitFallback { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Whether every boundary and circuit cell got an exact tile
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Log one aggregated line; individual cells are only traced
    pub fn log_summary(&self) {
        if self.is_clean() {
            tracing::debug!(
                transitions = self.transitions_applied,
                circuits = self.circuits_applied,
                "resolution complete"
            );
            return;
        }
        tracing::warn!(
            transitions = self.transitions_applied,
            circuits = self.circuits_applied,
            unresolved_transitions = self.unresolved_transitions().count(),
            unresolved_circuits = self.unresolved_circuits().count(),
            circuit_fallbacks = self.circuit_fallbacks().count(),
            "resolution completed with warnings"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{E, N, S};
    use tilegen_core::{GroupsDefinition, TileRef, TileSheet};

    #[test]
    fn test_report_filters() {
        let mut report = ResolveReport::new();
        assert!(report.is_clean());

        report.push(ResolveWarning::UnresolvedTransition {
            x: 1,
            y: 2,
            group: GroupId(0),
            neighbors: vec![GroupId(1)],
            pattern: N,
        });
        report.push(ResolveWarning::CircuitFallback {
            x: 3,
            y: 4,
            group: GroupId(2),
            pattern: N | E | S,
            used: N | S,
        });

        assert!(!report.is_clean());
        assert_eq!(report.unresolved_transitions().collect::<Vec<_>>(), vec![(1, 2)]);
        assert_eq!(report.circuit_fallbacks().collect::<Vec<_>>(), vec![(3, 4)]);
        assert_eq!(report.unresolved_circuits().count(), 0);
    }

    #[test]
    fn test_describe_uses_group_names() {
        let def = GroupsDefinition::new()
            .with_group("grass", vec![TileRef::new(0, 0)])
            .with_group("water", vec![TileRef::new(0, 12)]);
        let catalog = TileCatalog::from_definition(&def, &[TileSheet::unknown_size("a.png")]).unwrap();

        let warning = ResolveWarning::UnresolvedTransition {
            x: 0,
            y: 5,
            group: GroupId(0),
            neighbors: vec![GroupId(1)],
            pattern: E,
        };
        assert_eq!(
            warning.describe(&catalog),
            "unresolved transition at (0, 5): 'grass' next to [water] (E)"
        );
        assert_eq!(warning.position(), (0, 5));
    }
}
