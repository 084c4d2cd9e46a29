//! The region generator: turns a [`GeneratorParameter`] into a base [`Grid`].
//!
//! The entry point is [`RegionGenerator::generate`]. Parameters are validated
//! completely before the grid is allocated.

use rand::Rng;
use tilegen_core::{Grid, TileArea, TileCatalog, TileRef};

use crate::{
    BrushShape, Directive, GeneratorParameter, GeneratorSettings, ParameterError, MAX_GRID_AXIS,
    MAX_GRID_CELLS,
};

// ─── Validation ──────────────────────────────────────────────────────────────

/// Inclusive size bounds of a parameter list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl SizeBounds {
    /// Grid size for these bounds: the request clamped per axis, or the maximum.
    pub fn resolve(&self, settings: &GeneratorSettings) -> (u32, u32) {
        match settings.size {
            Some(size) => (
                size.width.clamp(self.min_width, self.max_width),
                size.height.clamp(self.min_height, self.max_height),
            ),
            None => (self.max_width, self.max_height),
        }
    }
}

/// A region directive after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionStroke {
    tile: TileRef,
    area: TileArea,
    brush_radius: u32,
    iterations: u32,
}

/// A validated parameter list
#[derive(Debug, Clone)]
struct Plan {
    bounds: SizeBounds,
    fill: TileRef,
    regions: Vec<RegionStroke>,
}

fn check_tile(
    catalog: &TileCatalog,
    index: usize,
    directive: &Directive,
    tile: TileRef,
) -> Result<(), ParameterError> {
    if catalog.contains(tile) {
        Ok(())
    } else {
        Err(ParameterError::UnknownTile {
            index,
            kind: directive.kind(),
            tile,
        })
    }
}

fn check_axis(axis: &'static str, min: u32, max: u32) -> Result<(), ParameterError> {
    if min > max {
        return Err(ParameterError::InvertedBounds { axis, min, max });
    }
    if max == 0 {
        return Err(ParameterError::EmptyBounds { axis });
    }
    Ok(())
}

/// Reject grids that cannot be addressed with `i32` coordinates
fn check_grid_size(width: u32, height: u32) -> Result<(), ParameterError> {
    let cells = width as u64 * height as u64;
    if width > MAX_GRID_AXIS || height > MAX_GRID_AXIS || cells > MAX_GRID_CELLS {
        return Err(ParameterError::OversizedGrid { width, height });
    }
    Ok(())
}

fn validate(parameters: &GeneratorParameter, catalog: &TileCatalog) -> Result<Plan, ParameterError> {
    let mut bounds: Option<SizeBounds> = None;
    let mut fill: Option<TileRef> = None;
    let mut regions = Vec::new();

    for (index, directive) in parameters.directives().iter().enumerate() {
        match *directive {
            Directive::SizeBound {
                min_width,
                min_height,
                max_width,
                max_height,
            } => {
                if bounds.is_some() {
                    return Err(ParameterError::DuplicateSizeBound);
                }
                bounds = Some(SizeBounds {
                    min_width,
                    min_height,
                    max_width,
                    max_height,
                });
            }
            Directive::Fill { tile } => {
                if fill.is_some() {
                    return Err(ParameterError::DuplicateFill);
                }
                check_tile(catalog, index, directive, tile)?;
                fill = Some(tile);
            }
            Directive::Region {
                tile,
                area,
                brush_radius,
                iterations,
            } => {
                check_tile(catalog, index, directive, tile)?;
                if !area.is_well_formed() {
                    return Err(ParameterError::InvertedArea { index, area });
                }
                regions.push(RegionStroke {
                    tile,
                    area,
                    brush_radius,
                    iterations,
                });
            }
        }
    }

    let bounds = bounds.ok_or(ParameterError::MissingSizeBound)?;
    let fill = fill.ok_or(ParameterError::MissingFill)?;
    check_axis("width", bounds.min_width, bounds.max_width)?;
    check_axis("height", bounds.min_height, bounds.max_height)?;

    Ok(Plan {
        bounds,
        fill,
        regions,
    })
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Builds the base grid from fill and region directives.
///
/// Holds no state between calls; all randomness comes from the `rng` passed
/// to [`generate`](Self::generate).
pub struct RegionGenerator<'a> {
    catalog: &'a TileCatalog,
    settings: GeneratorSettings,
}

impl<'a> RegionGenerator<'a> {
    pub fn new(catalog: &'a TileCatalog) -> Self {
        Self {
            catalog,
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Check `parameters` without generating anything
    pub fn validate(&self, parameters: &GeneratorParameter) -> Result<SizeBounds, ParameterError> {
        validate(parameters, self.catalog).map(|plan| plan.bounds)
    }

    /// Generate the base grid.
    ///
    /// Same `rng` state and parameters give the same grid.
    pub fn generate(
        &self,
        parameters: &GeneratorParameter,
        rng: &mut impl Rng,
    ) -> Result<Grid, ParameterError> {
        let plan = validate(parameters, self.catalog)?;
        let (width, height) = plan.bounds.resolve(&self.settings);
        check_grid_size(width, height)?;

        let mut grid = Grid::filled(width, height, plan.fill);
        tracing::debug!(width, height, fill = %plan.fill, "grid filled");

        for (index, stroke) in plan.regions.iter().enumerate() {
            apply_region(&mut grid, stroke, self.settings.brush, rng, index);
        }

        tracing::debug!(regions = plan.regions.len(), "regions applied");
        Ok(grid)
    }
}

/// Stamp `stroke.iterations` brush strokes inside the clipped area.
fn apply_region(
    grid: &mut Grid,
    stroke: &RegionStroke,
    brush: BrushShape,
    rng: &mut impl Rng,
    index: usize,
) {
    // Empty intersections draw no randomness.
    let Some(area) = stroke.area.clip(grid.width(), grid.height()) else {
        tracing::trace!(index, "region outside grid, skipped");
        return;
    };

    // Any radius past the area's extent paints the whole area.
    let reach = stroke.brush_radius.min(area.width().saturating_add(area.height()));
    let radius = reach as i64;
    for _ in 0..stroke.iterations {
        let px = rng.gen_range(area.x0..area.x1) as i64;
        let py = rng.gen_range(area.y0..area.y1) as i64;

        let y_start = (py - radius).max(area.y0 as i64);
        let y_end = (py + radius + 1).min(area.y1 as i64);
        let x_start = (px - radius).max(area.x0 as i64);
        let x_end = (px + radius + 1).min(area.x1 as i64);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if brush.covers(x - px, y - py, reach) {
                    grid.set(x as u32, y as u32, stroke.tile);
                }
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tilegen_core::{GroupsDefinition, TileSheet};

    const GRASS: TileRef = TileRef::new(0, 0);
    const WATER: TileRef = TileRef::new(0, 12);
    const TREE: TileRef = TileRef::new(0, 29);

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    fn catalog() -> TileCatalog {
        let def = GroupsDefinition::new()
            .with_group("grass", vec![GRASS])
            .with_group("water", vec![WATER])
            .with_group("tree", vec![TREE]);
        TileCatalog::from_definition(&def, &[TileSheet::unknown_size("forest.png")]).unwrap()
    }

    fn base() -> GeneratorParameter {
        GeneratorParameter::new()
            .with(Directive::size_bound(16, 16, 64, 64))
            .with(Directive::fill(GRASS))
    }

    #[test]
    fn fill_only_uses_max_bound() {
        let catalog = catalog();
        let grid = RegionGenerator::new(&catalog)
            .generate(&base(), &mut seeded_rng())
            .unwrap();

        assert_eq!((grid.width(), grid.height()), (64, 64));
        assert!(grid.cells().iter().all(|&t| t == GRASS));
    }

    #[test]
    fn requested_size_is_clamped() {
        let catalog = catalog();
        let generate = |w, h| {
            RegionGenerator::new(&catalog)
                .with_settings(GeneratorSettings::default().with_size(w, h))
                .generate(&base(), &mut seeded_rng())
                .unwrap()
        };

        let grid = generate(8, 100);
        assert_eq!((grid.width(), grid.height()), (16, 64));
        let grid = generate(20, 30);
        assert_eq!((grid.width(), grid.height()), (20, 30));
    }

    #[test]
    fn fill_applies_first_wherever_listed() {
        let catalog = catalog();
        let parameters = GeneratorParameter::new()
            .with(Directive::region(WATER, TileArea::new(0, 0, 4, 4), 8, 4))
            .with(Directive::size_bound(8, 8, 8, 8))
            .with(Directive::fill(GRASS));

        let grid = RegionGenerator::new(&catalog)
            .generate(&parameters, &mut seeded_rng())
            .unwrap();

        // Radius 8 covers the whole 4x4 area from any point inside it.
        for (x, y, tile) in grid.iter() {
            let expected = if x < 4 && y < 4 { WATER } else { GRASS };
            assert_eq!(tile, expected, "cell ({}, {})", x, y);
        }
    }

    #[test]
    fn regions_stay_inside_their_area() {
        let catalog = catalog();
        let parameters = base()
            .with(Directive::region(WATER, TileArea::new(0, 0, 8, 64), 4, 40))
            .with(Directive::region(TREE, TileArea::new(40, 10, 50, 20), 3, 10));

        let grid = RegionGenerator::new(&catalog)
            .generate(&parameters, &mut seeded_rng())
            .unwrap();

        let mut water = 0;
        for (x, y, tile) in grid.iter() {
            if tile == WATER {
                water += 1;
                assert!(x < 8, "water at ({}, {})", x, y);
            }
            if tile == TREE {
                assert!((40..50).contains(&x) && (10..20).contains(&y));
            }
        }
        assert!(water > 0);
    }

    #[test]
    fn later_regions_override_earlier() {
        let catalog = catalog();
        let parameters = GeneratorParameter::new()
            .with(Directive::size_bound(4, 4, 4, 4))
            .with(Directive::fill(GRASS))
            .with(Directive::region(WATER, TileArea::new(0, 0, 4, 4), 10, 1))
            .with(Directive::region(TREE, TileArea::new(0, 0, 4, 4), 10, 1));

        let grid = RegionGenerator::new(&catalog)
            .generate(&parameters, &mut seeded_rng())
            .unwrap();

        assert!(grid.cells().iter().all(|&t| t == TREE));
    }

    #[test]
    fn same_seed_same_grid() {
        let catalog = catalog();
        let parameters = base()
            .with(Directive::region(WATER, TileArea::new(0, 0, 64, 64), 3, 30))
            .with(Directive::region(TREE, TileArea::new(10, 10, 40, 40), 2, 20));
        let generator = RegionGenerator::new(&catalog);

        let first = generator.generate(&parameters, &mut seeded_rng()).unwrap();
        let second = generator.generate(&parameters, &mut seeded_rng()).unwrap();
        assert_eq!(first, second);

        let other = generator
            .generate(&parameters, &mut SmallRng::seed_from_u64(7))
            .unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn outside_region_draws_no_randomness() {
        let catalog = catalog();
        let inside = Directive::region(WATER, TileArea::new(0, 0, 64, 64), 2, 10);
        let with_outside = base()
            .with(Directive::region(TREE, TileArea::new(100, 100, 120, 120), 2, 10))
            .with(inside.clone());
        let without = base().with(inside);
        let generator = RegionGenerator::new(&catalog);

        assert_eq!(
            generator.generate(&with_outside, &mut seeded_rng()).unwrap(),
            generator.generate(&without, &mut seeded_rng()).unwrap()
        );
    }

    #[test]
    fn brush_metric_changes_coverage() {
        let catalog = catalog();
        let parameters = GeneratorParameter::new()
            .with(Directive::size_bound(32, 32, 32, 32))
            .with(Directive::fill(GRASS))
            .with(Directive::region(WATER, TileArea::new(0, 0, 32, 32), 3, 1));

        let count = |brush| {
            RegionGenerator::new(&catalog)
                .with_settings(GeneratorSettings::default().with_brush(brush))
                .generate(&parameters, &mut seeded_rng())
                .unwrap()
                .cells()
                .iter()
                .filter(|&&t| t == WATER)
                .count()
        };

        // Same center for both; the square covers at least the disc.
        assert!(count(BrushShape::Chebyshev) > count(BrushShape::Euclidean));
    }

    #[test]
    fn huge_brush_radius_covers_whole_area() {
        let catalog = catalog();
        let parameters = GeneratorParameter::new()
            .with(Directive::size_bound(8, 8, 8, 8))
            .with(Directive::fill(GRASS))
            .with(Directive::region(WATER, TileArea::new(0, 0, 8, 8), u32::MAX, 1));

        for brush in [BrushShape::Euclidean, BrushShape::Chebyshev] {
            let grid = RegionGenerator::new(&catalog)
                .with_settings(GeneratorSettings::default().with_brush(brush))
                .generate(&parameters, &mut seeded_rng())
                .unwrap();
            assert!(grid.cells().iter().all(|&t| t == WATER), "{:?}", brush);
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let catalog = catalog();
        let parameters = GeneratorParameter::new()
            .with(Directive::size_bound(1, 1, 70_000, 70_000))
            .with(Directive::fill(GRASS));

        let err = RegionGenerator::new(&catalog)
            .generate(&parameters, &mut seeded_rng())
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::OversizedGrid {
                width: 70_000,
                height: 70_000
            }
        );

        // A requested size inside the limit is fine with the same bounds.
        let grid = RegionGenerator::new(&catalog)
            .with_settings(GeneratorSettings::default().with_size(12, 10))
            .generate(&parameters, &mut seeded_rng())
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (12, 10));
    }

    #[test]
    fn validation_errors() {
        let catalog = catalog();
        let generator = RegionGenerator::new(&catalog);
        let fill = Directive::fill(GRASS);
        let bound = Directive::size_bound(16, 16, 64, 64);
        let check = |parameters: GeneratorParameter| {
            generator.generate(&parameters, &mut seeded_rng()).unwrap_err()
        };

        assert_eq!(
            check(GeneratorParameter::new().with(fill.clone())),
            ParameterError::MissingSizeBound
        );
        assert_eq!(
            check(GeneratorParameter::new().with(bound.clone())),
            ParameterError::MissingFill
        );
        assert_eq!(
            check(base().with(bound.clone())),
            ParameterError::DuplicateSizeBound
        );
        assert_eq!(check(base().with(fill.clone())), ParameterError::DuplicateFill);
        assert_eq!(
            check(
                GeneratorParameter::new()
                    .with(Directive::size_bound(65, 16, 64, 64))
                    .with(fill.clone())
            ),
            ParameterError::InvertedBounds {
                axis: "width",
                min: 65,
                max: 64
            }
        );
        assert_eq!(
            check(
                GeneratorParameter::new()
                    .with(Directive::size_bound(0, 0, 8, 0))
                    .with(fill.clone())
            ),
            ParameterError::EmptyBounds { axis: "height" }
        );
        assert_eq!(
            check(base().with(Directive::region(WATER, TileArea::new(8, 0, 0, 8), 1, 1))),
            ParameterError::InvertedArea {
                index: 2,
                area: TileArea::new(8, 0, 0, 8)
            }
        );
        assert_eq!(
            check(base().with(Directive::region(
                TileRef::new(3, 1),
                TileArea::new(0, 0, 8, 8),
                1,
                1
            ))),
            ParameterError::UnknownTile {
                index: 2,
                kind: "Region",
                tile: TileRef::new(3, 1)
            }
        );
    }
}
