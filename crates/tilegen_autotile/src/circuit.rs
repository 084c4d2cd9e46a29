//! Circuit rule set and resolver
//!
//! Circuits are linear features (roads, walls, cliffs). Each circuit cell is
//! replaced by the directional piece matching which of its four edge
//! neighbors belong to the same group.

use crate::config::CircuitsDefinition;
use crate::neighbors::{format_mask, mask_of, Direction, CARDINALS};
use crate::report::{ResolveReport, ResolveWarning};
use std::collections::HashMap;
use std::path::Path;
use tilegen_core::{
    load_definition, DefinitionError, Grid, GroupId, GroupLayer, TileCatalog, TileRef,
};

/// Order in which connections are dropped when a piece is missing
pub const FALLBACK_DROP_ORDER: [Direction; 4] =
    [Direction::W, Direction::S, Direction::E, Direction::N];

/// Directional pieces of one circuit-eligible group
#[derive(Debug, Clone)]
pub struct CircuitTable {
    pub group: GroupId,
    /// Connectivity mask (edge bits only) -> tile
    tiles: HashMap<u8, TileRef>,
}

impl CircuitTable {
    /// Piece for an exact connectivity mask
    pub fn get(&self, mask: u8) -> Option<TileRef> {
        self.tiles.get(&(mask & CARDINALS)).copied()
    }

    /// Piece for `mask`, or the nearest lower-connectivity piece.
    ///
    /// Searches level by level: every mask with one connection fewer, in
    /// [`FALLBACK_DROP_ORDER`], before any mask with two fewer. Returns the
    /// mask actually used together with its tile.
    pub fn find(&self, mask: u8) -> Option<(u8, TileRef)> {
        let mut frontier = vec![mask & CARDINALS];

        while !frontier.is_empty() {
            for &candidate in &frontier {
                if let Some(&tile) = self.tiles.get(&candidate) {
                    return Some((candidate, tile));
                }
            }

            let mut next: Vec<u8> = Vec::new();
            for &candidate in &frontier {
                for dir in FALLBACK_DROP_ORDER {
                    if candidate & dir.bit() == 0 {
                        continue;
                    }
                    let lower = candidate & !dir.bit();
                    if !next.contains(&lower) {
                        next.push(lower);
                    }
                }
            }
            frontier = next;
        }

        None
    }

    /// Every tile this table can produce
    pub fn tiles(&self) -> impl Iterator<Item = TileRef> + '_ {
        self.tiles.values().copied()
    }

    /// Connectivity mask a piece stands for, if it is part of this table
    pub fn pattern_of(&self, tile: TileRef) -> Option<u8> {
        self.tiles
            .iter()
            .find(|(_, &t)| t == tile)
            .map(|(&mask, _)| mask)
    }
}

/// Validated circuit tables, keyed by group
#[derive(Debug, Clone, Default)]
pub struct CircuitRuleSet {
    tables: HashMap<GroupId, CircuitTable>,
}

impl CircuitRuleSet {
    /// A rule set without circuits; no group is circuit-eligible
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate against the catalog.
    ///
    /// Rejects unknown or repeated groups, corner directions in patterns,
    /// repeated patterns, and tiles that are not part of the catalog.
    pub fn from_definition(
        definition: &CircuitsDefinition,
        catalog: &TileCatalog,
    ) -> Result<Self, DefinitionError> {
        let mut rules = CircuitRuleSet::default();

        for def in &definition.circuits {
            let context = format!("Circuit '{}'", def.group);
            let group = catalog.require_group(&def.group, &context)?;

            if rules.tables.contains_key(&group) {
                return Err(DefinitionError::Invalid(format!(
                    "{}: defined more than once",
                    context
                )));
            }
            if def.tiles.is_empty() {
                return Err(DefinitionError::Invalid(format!(
                    "{}: defines no tiles",
                    context
                )));
            }

            let mut tiles = HashMap::new();
            for entry in &def.tiles {
                if let Some(corner) = entry.pattern.iter().find(|d| d.is_corner()) {
                    return Err(DefinitionError::Invalid(format!(
                        "{}: circuit patterns only use N, E, S, W (found {})",
                        context,
                        corner.name()
                    )));
                }
                catalog.require_tile(entry.tile, &context)?;
                let mask = mask_of(&entry.pattern);
                if tiles.insert(mask, entry.tile).is_some() {
                    return Err(DefinitionError::Invalid(format!(
                        "{}: pattern {} is defined more than once",
                        context,
                        format_mask(mask)
                    )));
                }
            }

            rules.tables.insert(group, CircuitTable { group, tiles });
        }

        tracing::debug!(circuits = rules.tables.len(), "circuit rules loaded");
        Ok(rules)
    }

    /// Load a circuits definition file and validate it
    pub fn load(path: &Path, catalog: &TileCatalog) -> Result<Self, DefinitionError> {
        let definition: CircuitsDefinition = load_definition(path)?;
        Self::from_definition(&definition, catalog)
    }

    pub fn is_eligible(&self, group: GroupId) -> bool {
        self.tables.contains_key(&group)
    }

    pub fn table(&self, group: GroupId) -> Option<&CircuitTable> {
        self.tables.get(&group)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Connectivity of `(x, y)`: edge neighbors sharing `group`.
/// Out-of-grid neighbors are not connected.
pub fn connectivity(groups: &GroupLayer, x: i32, y: i32, group: GroupId) -> u8 {
    let mut mask = 0u8;
    for dir in Direction::CARDINALS {
        let (dx, dy) = dir.offset();
        if groups.group_at(x + dx, y + dy) == Some(group) {
            mask |= dir.bit();
        }
    }
    mask
}

/// Replaces circuit cells with directional pieces
pub struct CircuitResolver<'a> {
    rules: &'a CircuitRuleSet,
}

impl<'a> CircuitResolver<'a> {
    pub fn new(rules: &'a CircuitRuleSet) -> Self {
        Self { rules }
    }

    /// Resolve every circuit-eligible cell of `grid`.
    ///
    /// `groups` is the classification from before transition resolution, so
    /// connectivity follows the original groups rather than transition tiles.
    pub fn resolve(&self, grid: &mut Grid, groups: &GroupLayer, report: &mut ResolveReport) {
        if self.rules.is_empty() {
            return;
        }

        let mut updates: Vec<(u32, u32, TileRef)> = Vec::new();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let Some(group) = groups.group_at(x as i32, y as i32) else {
                    continue;
                };
                let Some(table) = self.rules.table(group) else {
                    continue;
                };

                let pattern = connectivity(groups, x as i32, y as i32, group);
                match table.find(pattern) {
                    Some((used, tile)) => {
                        if used != pattern {
                            tracing::trace!(
                                x,
                                y,
                                pattern = %format_mask(pattern),
                                used = %format_mask(used),
                                "circuit fallback"
                            );
                            report.push(ResolveWarning::CircuitFallback {
                                x,
                                y,
                                group,
                                pattern,
                                used,
                            });
                        }
                        updates.push((x, y, tile));
                    }
                    None => {
                        tracing::trace!(x, y, pattern = %format_mask(pattern), "no circuit piece");
                        report.push(ResolveWarning::UnresolvedCircuit {
                            x,
                            y,
                            group,
                            pattern,
                        });
                    }
                }
            }
        }

        report.circuits_applied += updates.len();
        for (x, y, tile) in updates {
            grid.set(x, y, tile);
        }
    }
}

/// Classify `grid` against `catalog` and resolve its circuits
pub fn resolve_circuits(
    grid: &mut Grid,
    catalog: &TileCatalog,
    rules: &CircuitRuleSet,
) -> ResolveReport {
    let groups = GroupLayer::classify(grid, catalog);
    let mut report = ResolveReport::new();
    CircuitResolver::new(rules).resolve(grid, &groups, &mut report);
    report
}
