//! Tile catalog: the immutable mapping from tiles to semantic groups

use crate::sheet::check_tile;
use crate::{load_definition, DefinitionError, TileRef, TileSheet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Dense index of a group within a [`TileCatalog`] (declaration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Groups definition as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupsDefinition {
    pub groups: Vec<GroupDefinition>,
}

impl GroupsDefinition {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Append a group (builder style)
    pub fn with_group(mut self, name: impl Into<String>, tiles: Vec<TileRef>) -> Self {
        self.groups.push(GroupDefinition {
            name: name.into(),
            tiles,
        });
        self
    }
}

/// A single named group and its member tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub tiles: Vec<TileRef>,
}

/// A validated group inside a catalog
#[derive(Debug, Clone)]
pub struct TileGroup {
    pub id: GroupId,
    pub name: String,
    /// Member tiles; the first one is the group's representative
    pub tiles: Vec<TileRef>,
}

/// Immutable tile -> group lookup.
///
/// Every tile belongs to at most one group and every group has at least one
/// tile. Built once per generation from a [`GroupsDefinition`].
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    groups: Vec<TileGroup>,
    by_tile: HashMap<TileRef, GroupId>,
    by_name: HashMap<String, GroupId>,
}

impl TileCatalog {
    /// Build and validate a catalog against the supplied sheets
    pub fn from_definition(
        definition: &GroupsDefinition,
        sheets: &[TileSheet],
    ) -> Result<Self, DefinitionError> {
        let mut catalog = TileCatalog::default();

        for group_def in &definition.groups {
            if group_def.name.trim().is_empty() {
                return Err(DefinitionError::Invalid(
                    "Group names must not be empty".to_string(),
                ));
            }
            if catalog.by_name.contains_key(&group_def.name) {
                return Err(DefinitionError::Invalid(format!(
                    "Group '{}' is defined more than once",
                    group_def.name
                )));
            }
            if group_def.tiles.is_empty() {
                return Err(DefinitionError::Invalid(format!(
                    "Group '{}' has no tiles",
                    group_def.name
                )));
            }

            let id = GroupId(catalog.groups.len());
            for &tile in &group_def.tiles {
                if let Some(problem) = check_tile(sheets, tile) {
                    return Err(DefinitionError::Invalid(format!(
                        "Group '{}': {}",
                        group_def.name, problem
                    )));
                }
                if let Some(&other) = catalog.by_tile.get(&tile) {
                    return Err(DefinitionError::Invalid(format!(
                        "Tile {} belongs to both '{}' and '{}'",
                        tile, catalog.groups[other.0].name, group_def.name
                    )));
                }
                catalog.by_tile.insert(tile, id);
            }

            catalog.by_name.insert(group_def.name.clone(), id);
            catalog.groups.push(TileGroup {
                id,
                name: group_def.name.clone(),
                tiles: group_def.tiles.clone(),
            });
        }

        tracing::debug!(
            groups = catalog.groups.len(),
            tiles = catalog.by_tile.len(),
            "tile catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a groups definition file and build the catalog
    pub fn load(path: &Path, sheets: &[TileSheet]) -> Result<Self, DefinitionError> {
        let definition: GroupsDefinition = load_definition(path)?;
        Self::from_definition(&definition, sheets)
    }

    /// Get the group a tile belongs to
    pub fn group_of(&self, tile: TileRef) -> Option<GroupId> {
        self.by_tile.get(&tile).copied()
    }

    /// Check whether a tile is part of any group
    pub fn contains(&self, tile: TileRef) -> bool {
        self.by_tile.contains_key(&tile)
    }

    /// Get group ID by name
    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.by_name.get(name).copied()
    }

    /// Get group ID by name, failing with a definition error naming `context`
    pub fn require_group(&self, name: &str, context: &str) -> Result<GroupId, DefinitionError> {
        self.group_id(name).ok_or_else(|| {
            DefinitionError::Invalid(format!("{}: unknown group '{}'", context, name))
        })
    }

    /// Ensure a tile referenced by a rule exists in the catalog
    pub fn require_tile(&self, tile: TileRef, context: &str) -> Result<GroupId, DefinitionError> {
        self.group_of(tile).ok_or_else(|| {
            DefinitionError::Invalid(format!(
                "{}: tile {} is not part of any group",
                context, tile
            ))
        })
    }

    pub fn group(&self, id: GroupId) -> Option<&TileGroup> {
        self.groups.get(id.0)
    }

    /// Group name for display purposes
    pub fn group_name(&self, id: GroupId) -> &str {
        self.group(id).map(|g| g.name.as_str()).unwrap_or("?")
    }

    /// First declared tile of the group
    pub fn representative(&self, id: GroupId) -> Option<TileRef> {
        self.group(id).and_then(|g| g.tiles.first().copied())
    }

    pub fn groups(&self) -> &[TileGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
