//! Data types for directive-driven generation.
//!
//! The primary input is [`GeneratorParameter`], an ordered list of
//! [`Directive`]s. [`GeneratorSettings`] holds the knobs that are not part of
//! a parameter list (brush metric, requested size).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tilegen_core::{load_definition, DefinitionError, TileArea, TileRef};

// ─── Directives ──────────────────────────────────────────────────────────────

/// One generation instruction.
///
/// Serialized with a `type` tag:
///
/// ```toml
/// [[directives]]
/// type = "Region"
/// tile = { sheet = 0, number = 12 }
/// area = { x0 = 0, y0 = 0, x1 = 8, y1 = 64 }
/// brush_radius = 4
/// iterations = 16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    /// Allowed grid dimensions. Exactly one per parameter list.
    SizeBound {
        min_width: u32,
        min_height: u32,
        max_width: u32,
        max_height: u32,
    },
    /// Base tile written to every cell. Exactly one per parameter list.
    Fill { tile: TileRef },
    /// Stamps `iterations` brush strokes of `tile` at random points of `area`.
    Region {
        tile: TileRef,
        area: TileArea,
        brush_radius: u32,
        iterations: u32,
    },
}

impl Directive {
    pub const fn size_bound(min_width: u32, min_height: u32, max_width: u32, max_height: u32) -> Self {
        Directive::SizeBound {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    pub const fn fill(tile: TileRef) -> Self {
        Directive::Fill { tile }
    }

    pub const fn region(tile: TileRef, area: TileArea, brush_radius: u32, iterations: u32) -> Self {
        Directive::Region {
            tile,
            area,
            brush_radius,
            iterations,
        }
    }

    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::SizeBound { .. } => "SizeBound",
            Directive::Fill { .. } => "Fill",
            Directive::Region { .. } => "Region",
        }
    }
}

// ─── GeneratorParameter ──────────────────────────────────────────────────────

/// Ordered directive list for one generation.
///
/// The `Fill` directive is applied first wherever it appears. `Region`
/// directives apply in list order, so later regions paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorParameter {
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl GeneratorParameter {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// Append a directive
    pub fn with(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Load a directive list from a JSON or TOML file
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        load_definition(path)
    }
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Distance metric deciding which cells a brush stroke covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BrushShape {
    /// Round brush: `dx² + dy² <= r²`. Default.
    #[default]
    Euclidean,
    /// Square brush: `max(|dx|, |dy|) <= r`.
    Chebyshev,
}

impl BrushShape {
    /// Whether a cell at offset `(dx, dy)` from the stroke center is painted
    pub fn covers(self, dx: i64, dy: i64, radius: u32) -> bool {
        let (dx, dy, r) = (dx as i128, dy as i128, radius as i128);
        match self {
            BrushShape::Euclidean => dx * dx + dy * dy <= r * r,
            BrushShape::Chebyshev => dx.abs().max(dy.abs()) <= r,
        }
    }
}

/// Requested grid dimensions, clamped into the `SizeBound` of a parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Generation settings that are not part of a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default)]
    pub brush: BrushShape,
    /// Requested size. Without one, the maximum bound is used.
    #[serde(default)]
    pub size: Option<MapSize>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            brush: BrushShape::default(),
            size: None,
        }
    }
}

impl GeneratorSettings {
    pub fn with_brush(mut self, brush: BrushShape) -> Self {
        self.brush = brush;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(MapSize::new(width, height));
        self
    }

    /// Load settings from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        load_definition(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_core::{parse_definition, DefinitionFormat};

    #[test]
    fn brush_shapes_differ_on_diagonals() {
        assert!(BrushShape::Euclidean.covers(2, 0, 2));
        assert!(!BrushShape::Euclidean.covers(2, 2, 2));
        assert!(BrushShape::Chebyshev.covers(2, 2, 2));
        assert!(!BrushShape::Chebyshev.covers(3, 0, 2));
        assert!(BrushShape::Euclidean.covers(0, 0, 0));
        assert!(!BrushShape::Euclidean.covers(1, 0, 0));
    }

    #[test]
    fn brush_handles_extreme_radius() {
        let far = i32::MAX as i64;
        assert!(BrushShape::Euclidean.covers(far, far, u32::MAX));
        assert!(BrushShape::Chebyshev.covers(-far, far, u32::MAX));
        assert!(!BrushShape::Euclidean.covers(u32::MAX as i64 + 1, 0, u32::MAX));
    }

    #[test]
    fn parameter_parses_tagged_directives_from_json() {
        let json = r#"{
            "directives": [
                { "type": "SizeBound", "min_width": 16, "min_height": 16, "max_width": 64, "max_height": 64 },
                { "type": "Fill", "tile": { "sheet": 0, "number": 0 } },
                {
                    "type": "Region",
                    "tile": { "sheet": 0, "number": 12 },
                    "area": { "x0": 0, "y0": 0, "x1": 8, "y1": 64 },
                    "brush_radius": 4,
                    "iterations": 16
                }
            ]
        }"#;

        let parameter: GeneratorParameter = parse_definition(json, DefinitionFormat::Json).unwrap();
        let expected = GeneratorParameter::new()
            .with(Directive::size_bound(16, 16, 64, 64))
            .with(Directive::fill(TileRef::new(0, 0)))
            .with(Directive::region(
                TileRef::new(0, 12),
                TileArea::new(0, 0, 8, 64),
                4,
                16,
            ));
        assert_eq!(parameter, expected);
    }

    #[test]
    fn settings_parse_from_toml_with_defaults() {
        let settings: GeneratorSettings = parse_definition(
            r#"
brush = "Chebyshev"

[size]
width = 32
height = 24
"#,
            DefinitionFormat::Toml,
        )
        .unwrap();
        assert_eq!(settings.brush, BrushShape::Chebyshev);
        assert_eq!(settings.size, Some(MapSize::new(32, 24)));

        let empty: GeneratorSettings = parse_definition("", DefinitionFormat::Toml).unwrap();
        assert_eq!(empty, GeneratorSettings::default());
    }

    #[test]
    fn settings_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "brush": "Euclidean", "size": { "width": 20, "height": 10 } }"#)
            .unwrap();

        let settings = GeneratorSettings::load(&path).unwrap();
        assert_eq!(settings, GeneratorSettings::default().with_size(20, 10));
    }
}
