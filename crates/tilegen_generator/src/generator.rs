//! Map generation pipeline: region generation, transitions, then circuits.

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tilegen_autotile::{
    CircuitResolver, CircuitRuleSet, CircuitsDefinition, ResolveReport, TransitionResolver,
    TransitionRuleSet, TransitionsDefinition,
};
use tilegen_core::{
    load_definition, DefinitionError, Grid, GroupLayer, GroupsDefinition, TileCatalog, TileSheet,
};

use crate::{GenerateError, GeneratorParameter, GeneratorSettings, RegionGenerator};

/// Validated definitions shared by any number of generations
#[derive(Debug, Clone)]
pub struct Definitions {
    pub sheets: Vec<TileSheet>,
    pub catalog: TileCatalog,
    pub transitions: TransitionRuleSet,
    pub circuits: CircuitRuleSet,
}

impl Definitions {
    /// Validate raw definitions. Circuits are optional.
    pub fn from_definitions(
        sheets: Vec<TileSheet>,
        groups: &GroupsDefinition,
        transitions: &TransitionsDefinition,
        circuits: Option<&CircuitsDefinition>,
    ) -> Result<Self, DefinitionError> {
        let catalog = TileCatalog::from_definition(groups, &sheets)?;
        let transitions = TransitionRuleSet::from_definition(transitions, &catalog)?;
        let circuits = match circuits {
            Some(def) => CircuitRuleSet::from_definition(def, &catalog)?,
            None => CircuitRuleSet::empty(),
        };

        tracing::debug!(
            sheets = sheets.len(),
            groups = catalog.len(),
            transitions = transitions.len(),
            circuits = circuits.len(),
            "definitions loaded"
        );

        Ok(Self {
            sheets,
            catalog,
            transitions,
            circuits,
        })
    }

    /// Load every definition file named in `paths`
    pub fn load(paths: &DefinitionPaths) -> Result<Self, DefinitionError> {
        let sheets: SheetsDefinition = load_definition(&paths.sheets)?;
        let groups: GroupsDefinition = load_definition(&paths.groups)?;
        let transitions: TransitionsDefinition = load_definition(&paths.transitions)?;
        let circuits: Option<CircuitsDefinition> = match &paths.circuits {
            Some(path) => Some(load_definition(path)?),
            None => None,
        };

        Self::from_definitions(sheets.sheets, &groups, &transitions, circuits.as_ref())
    }
}

/// Sheet list as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsDefinition {
    #[serde(default)]
    pub sheets: Vec<TileSheet>,
}

/// Locations of the definition files of one tile set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionPaths {
    pub sheets: PathBuf,
    pub groups: PathBuf,
    pub transitions: PathBuf,
    #[serde(default)]
    pub circuits: Option<PathBuf>,
}

/// Result of one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMap {
    pub grid: Grid,
    pub report: ResolveReport,
    /// Seed the generation ran with; pass it back to replay the same map
    pub seed: u64,
}

/// Runs the full pipeline against one set of definitions.
///
/// Reusable: it keeps no state between [`generate`](Self::generate) calls.
pub struct MapGenerator<'a> {
    definitions: &'a Definitions,
    settings: GeneratorSettings,
}

impl<'a> MapGenerator<'a> {
    pub fn new(definitions: &'a Definitions) -> Self {
        Self {
            definitions,
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Generate a grid and resolve its transitions and circuits.
    ///
    /// Parameter errors are returned before any grid is built. Unresolved
    /// cells do not fail the call; they are listed in the report.
    pub fn generate(
        &self,
        parameters: &GeneratorParameter,
        rng: &mut impl Rng,
    ) -> Result<(Grid, ResolveReport), GenerateError> {
        let definitions = self.definitions;

        let mut grid = RegionGenerator::new(&definitions.catalog)
            .with_settings(self.settings)
            .generate(parameters, rng)?;

        // Both resolvers read the classification of the region output.
        let groups = GroupLayer::classify(&grid, &definitions.catalog);
        let mut report = ResolveReport::new();

        TransitionResolver::new(&definitions.transitions).resolve(&mut grid, &groups, &mut report);
        tracing::debug!(applied = report.transitions_applied, "transitions resolved");

        CircuitResolver::new(&definitions.circuits).resolve(&mut grid, &groups, &mut report);
        tracing::debug!(applied = report.circuits_applied, "circuits resolved");

        report.log_summary();
        Ok((grid, report))
    }
}

/// Generate a map from raw definitions.
///
/// Definitions are validated first. Without a `seed`, one is drawn from the
/// thread RNG and returned in [`GeneratedMap::seed`].
pub fn generate_map(
    parameters: &GeneratorParameter,
    sheets: Vec<TileSheet>,
    groups: &GroupsDefinition,
    transitions: &TransitionsDefinition,
    circuits: Option<&CircuitsDefinition>,
    seed: Option<u64>,
) -> Result<GeneratedMap, GenerateError> {
    let definitions = Definitions::from_definitions(sheets, groups, transitions, circuits)?;
    generate_with(&definitions, GeneratorSettings::default(), parameters, seed)
}

/// Generate a map from validated definitions and explicit settings
pub fn generate_with(
    definitions: &Definitions,
    settings: GeneratorSettings,
    parameters: &GeneratorParameter,
    seed: Option<u64>,
) -> Result<GeneratedMap, GenerateError> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let span = tracing::info_span!("generate_map", seed, directives = parameters.directives().len());
    let _enter = span.enter();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (grid, report) = MapGenerator::new(definitions)
        .with_settings(settings)
        .generate(parameters, &mut rng)?;

    tracing::info!(width = grid.width(), height = grid.height(), "map generated");
    Ok(GeneratedMap { grid, report, seed })
}
