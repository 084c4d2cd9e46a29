//! Transition rule set and resolver
//!
//! A transition replaces a boundary cell with a tile that blends its group
//! into the differing neighbors. Rules are keyed by the ordered group pair
//! `(group, neighbor)` and by the normalized difference mask.

use crate::config::TransitionsDefinition;
use crate::neighbors::{dominant_direction, format_mask, normalize_mask, Direction};
use crate::report::{ResolveReport, ResolveWarning};
use std::collections::HashMap;
use std::path::Path;
use tilegen_core::{
    load_definition, DefinitionError, Grid, GroupId, GroupLayer, TileCatalog, TileRef,
};

/// Lookup table of one `(group, neighbor)` pair
#[derive(Debug, Clone)]
pub struct TransitionTable {
    pub group: GroupId,
    pub neighbor: GroupId,
    /// Normalized difference mask -> tile
    tiles: HashMap<u8, TileRef>,
    /// Dominant direction -> tile
    defaults: HashMap<Direction, TileRef>,
}

impl TransitionTable {
    /// Exact tile for a difference mask (normalized before lookup)
    pub fn get(&self, mask: u8) -> Option<TileRef> {
        self.tiles.get(&normalize_mask(mask)).copied()
    }

    /// Default tile for the mask's dominant direction
    pub fn default_for(&self, mask: u8) -> Option<TileRef> {
        let direction = dominant_direction(normalize_mask(mask))?;
        self.defaults.get(&direction).copied()
    }

    /// Exact tile, falling back to the dominant-direction default
    pub fn find(&self, mask: u8) -> Option<TileRef> {
        self.get(mask).or_else(|| self.default_for(mask))
    }

    /// Every tile this table can produce
    pub fn tiles(&self) -> impl Iterator<Item = TileRef> + '_ {
        self.tiles.values().chain(self.defaults.values()).copied()
    }
}

/// Validated transitions in priority order (index 0 = highest)
#[derive(Debug, Clone, Default)]
pub struct TransitionRuleSet {
    tables: Vec<TransitionTable>,
    by_pair: HashMap<(GroupId, GroupId), usize>,
}

impl TransitionRuleSet {
    /// A rule set without transitions; every boundary stays unresolved
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate against the catalog.
    ///
    /// Rejects unknown groups, self-transitions, duplicate pairs, empty
    /// patterns, patterns that collide after normalization, and tiles that
    /// are not part of the catalog.
    pub fn from_definition(
        definition: &TransitionsDefinition,
        catalog: &TileCatalog,
    ) -> Result<Self, DefinitionError> {
        let mut rules = TransitionRuleSet::default();

        for def in &definition.transitions {
            let context = format!("Transition '{}' -> '{}'", def.group, def.neighbor);
            let group = catalog.require_group(&def.group, &context)?;
            let neighbor = catalog.require_group(&def.neighbor, &context)?;

            if group == neighbor {
                return Err(DefinitionError::Invalid(format!(
                    "{}: a group cannot transition into itself",
                    context
                )));
            }
            if rules.by_pair.contains_key(&(group, neighbor)) {
                return Err(DefinitionError::Invalid(format!(
                    "{}: defined more than once",
                    context
                )));
            }
            if def.tiles.is_empty() && def.defaults.is_empty() {
                return Err(DefinitionError::Invalid(format!(
                    "{}: defines no tiles",
                    context
                )));
            }

            let mut tiles = HashMap::new();
            for entry in &def.tiles {
                let raw = crate::neighbors::mask_of(&entry.pattern);
                let mask = normalize_mask(raw);
                if mask == 0 {
                    return Err(DefinitionError::Invalid(format!(
                        "{}: pattern must name at least one direction",
                        context
                    )));
                }
                catalog.require_tile(entry.tile, &context)?;
                if tiles.insert(mask, entry.tile).is_some() {
                    return Err(DefinitionError::Invalid(format!(
                        "{}: pattern {} is defined more than once",
                        context,
                        format_mask(mask)
                    )));
                }
            }

            let mut defaults = HashMap::new();
            for entry in &def.defaults {
                catalog.require_tile(entry.tile, &context)?;
                if defaults.insert(entry.direction, entry.tile).is_some() {
                    return Err(DefinitionError::Invalid(format!(
                        "{}: default for {} is defined more than once",
                        context,
                        entry.direction.name()
                    )));
                }
            }

            rules.by_pair.insert((group, neighbor), rules.tables.len());
            rules.tables.push(TransitionTable {
                group,
                neighbor,
                tiles,
                defaults,
            });
        }

        tracing::debug!(pairs = rules.tables.len(), "transition rules loaded");
        Ok(rules)
    }

    /// Load a transitions definition file and validate it
    pub fn load(path: &Path, catalog: &TileCatalog) -> Result<Self, DefinitionError> {
        let definition: TransitionsDefinition = load_definition(path)?;
        Self::from_definition(&definition, catalog)
    }

    /// Table for a pair together with its priority (lower = higher priority)
    pub fn table(&self, group: GroupId, neighbor: GroupId) -> Option<(usize, &TransitionTable)> {
        let priority = *self.by_pair.get(&(group, neighbor))?;
        self.tables.get(priority).map(|table| (priority, table))
    }

    pub fn tables(&self) -> &[TransitionTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Differing neighbors of one cell
#[derive(Debug, Clone, Default)]
struct Boundary {
    /// Every differing neighbor
    combined: u8,
    /// Differing neighbors split by group, in discovery order
    per_group: Vec<(GroupId, u8)>,
}

impl Boundary {
    /// Scan the 8-neighborhood. Out-of-grid and unclassified neighbors
    /// count as same-group.
    fn scan(groups: &GroupLayer, x: i32, y: i32, own: GroupId) -> Self {
        let mut boundary = Boundary::default();
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let Some(other) = groups.group_at(x + dx, y + dy) else {
                continue;
            };
            if other == own {
                continue;
            }
            boundary.combined |= dir.bit();
            match boundary.per_group.iter_mut().find(|(g, _)| *g == other) {
                Some((_, mask)) => *mask |= dir.bit(),
                None => boundary.per_group.push((other, dir.bit())),
            }
        }
        boundary
    }

    fn is_empty(&self) -> bool {
        self.combined == 0
    }
}

/// Replaces boundary cells with transition tiles in one consistent pass
pub struct TransitionResolver<'a> {
    rules: &'a TransitionRuleSet,
}

impl<'a> TransitionResolver<'a> {
    pub fn new(rules: &'a TransitionRuleSet) -> Self {
        Self { rules }
    }

    /// Resolve every boundary cell of `grid`.
    ///
    /// `groups` must be the classification of `grid` before this pass; it
    /// is the only source of group information, so resolved cells never
    /// influence their neighbors.
    pub fn resolve(&self, grid: &mut Grid, groups: &GroupLayer, report: &mut ResolveReport) {
        let mut updates: Vec<(u32, u32, TileRef)> = Vec::new();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let Some(own) = groups.group_at(x as i32, y as i32) else {
                    continue;
                };
                let boundary = Boundary::scan(groups, x as i32, y as i32, own);
                if boundary.is_empty() {
                    continue;
                }

                match self.lookup(own, &boundary) {
                    Some(tile) => updates.push((x, y, tile)),
                    None => {
                        tracing::trace!(
                            x,
                            y,
                            group = %own,
                            pattern = %format_mask(boundary.combined),
                            "no transition rule"
                        );
                        report.push(ResolveWarning::UnresolvedTransition {
                            x,
                            y,
                            group: own,
                            neighbors: boundary.per_group.iter().map(|(g, _)| *g).collect(),
                            pattern: boundary.combined,
                        });
                    }
                }
            }
        }

        report.transitions_applied += updates.len();
        for (x, y, tile) in updates {
            grid.set(x, y, tile);
        }
    }

    /// Pick a tile for a boundary: pairs are tried in rule-set priority
    /// order, and the first pair yielding a tile wins.
    fn lookup(&self, own: GroupId, boundary: &Boundary) -> Option<TileRef> {
        let mut candidates: Vec<(usize, &TransitionTable, u8)> = boundary
            .per_group
            .iter()
            .filter_map(|&(other, mask)| {
                self.rules
                    .table(own, other)
                    .map(|(priority, table)| (priority, table, mask))
            })
            .collect();
        candidates.sort_by_key(|(priority, _, _)| *priority);

        let composite = boundary.per_group.len() > 1;
        for (_, table, mask) in candidates {
            // Composite pattern: every differing neighbor seen as this pair's group.
            if composite {
                if let Some(tile) = table.get(boundary.combined) {
                    return Some(tile);
                }
            }
            if let Some(tile) = table.find(mask) {
                return Some(tile);
            }
        }
        None
    }
}

/// Classify `grid` against `catalog` and resolve its transitions
pub fn resolve_transitions(
    grid: &mut Grid,
    catalog: &TileCatalog,
    rules: &TransitionRuleSet,
) -> ResolveReport {
    let groups = GroupLayer::classify(grid, catalog);
    let mut report = ResolveReport::new();
    TransitionResolver::new(rules).resolve(grid, &groups, &mut report);
    report
}
