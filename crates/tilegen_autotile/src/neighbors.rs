//! Neighbor directions and bitmasks
//!
//! One bit per neighbor, clockwise from north. Rows grow downward, so north
//! is `y - 1`.

use serde::{Deserialize, Serialize};

pub const N: u8 = 0b0000_0001; // North
pub const NE: u8 = 0b0000_0010; // Northeast (corner)
pub const E: u8 = 0b0000_0100; // East
pub const SE: u8 = 0b0000_1000; // Southeast (corner)
pub const S: u8 = 0b0001_0000; // South
pub const SW: u8 = 0b0010_0000; // Southwest (corner)
pub const W: u8 = 0b0100_0000; // West
pub const NW: u8 = 0b1000_0000; // Northwest (corner)

/// Bits of the four edge neighbors
pub const CARDINALS: u8 = N | E | S | W;

/// A neighbor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All directions, clockwise from north
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub const CARDINALS: [Direction; 4] =
        [Direction::N, Direction::E, Direction::S, Direction::W];

    pub const fn bit(self) -> u8 {
        match self {
            Direction::N => N,
            Direction::NE => NE,
            Direction::E => E,
            Direction::SE => SE,
            Direction::S => S,
            Direction::SW => SW,
            Direction::W => W,
            Direction::NW => NW,
        }
    }

    /// Grid offset of the neighbor in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::SE | Direction::SW | Direction::NW
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

/// Combine directions into a bitmask
pub fn mask_of(directions: &[Direction]) -> u8 {
    directions.iter().fold(0, |mask, d| mask | d.bit())
}

/// Calculate the neighbor bitmask of `(x, y)`: a bit is set when `matches`
/// holds for the neighbor in that direction.
pub fn calculate_mask<F>(x: i32, y: i32, matches: F) -> u8
where
    F: Fn(i32, i32) -> bool,
{
    let mut mask = 0u8;
    for dir in Direction::ALL {
        let (dx, dy) = dir.offset();
        if matches(x + dx, y + dy) {
            mask |= dir.bit();
        }
    }
    mask
}

/// Drop corner bits already covered by an adjacent edge.
///
/// A differing diagonal only matters when both edges next to it are
/// unchanged; otherwise the edge transition already reaches the corner.
/// This folds the 256 raw masks into 47 classes.
pub fn normalize_mask(mask: u8) -> u8 {
    let mut result = mask;

    // NE corner requires neither N nor E
    if mask & (N | E) != 0 {
        result &= !NE;
    }
    // SE corner requires neither S nor E
    if mask & (S | E) != 0 {
        result &= !SE;
    }
    // SW corner requires neither S nor W
    if mask & (S | W) != 0 {
        result &= !SW;
    }
    // NW corner requires neither N nor W
    if mask & (N | W) != 0 {
        result &= !NW;
    }

    result
}

/// Direction a default tile is chosen by: the first set edge in
/// N, E, S, W order, otherwise the first set corner in NE, SE, SW, NW order.
pub fn dominant_direction(mask: u8) -> Option<Direction> {
    Direction::CARDINALS
        .into_iter()
        .chain([Direction::NE, Direction::SE, Direction::SW, Direction::NW])
        .find(|d| mask & d.bit() != 0)
}

/// Human-readable mask, e.g. `N|E|SW`, or `-` when empty
pub fn format_mask(mask: u8) -> String {
    let names: Vec<&str> = Direction::ALL
        .into_iter()
        .filter(|d| mask & d.bit() != 0)
        .map(Direction::name)
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_match_bits() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let mask = calculate_mask(0, 0, |x, y| x == dx && y == dy);
            assert_eq!(mask, dir.bit(), "{:?}", dir);
        }
    }

    #[test]
    fn test_normalize_drops_covered_corners() {
        assert_eq!(normalize_mask(N | NE | NW), N);
        assert_eq!(normalize_mask(NE), NE);
        assert_eq!(normalize_mask(E | NE | SE | SW), E | SW);
        assert_eq!(normalize_mask(0xFF), CARDINALS);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for mask in 0..=255u8 {
            let once = normalize_mask(mask);
            assert_eq!(normalize_mask(once), once);
        }
    }

    #[test]
    fn test_normalized_classes() {
        let classes: HashSet<u8> = (0..=255u8).map(normalize_mask).collect();
        assert_eq!(classes.len(), 47);
    }

    #[test]
    fn test_dominant_direction() {
        assert_eq!(dominant_direction(0), None);
        assert_eq!(dominant_direction(S | W), Some(Direction::S));
        assert_eq!(dominant_direction(N | S), Some(Direction::N));
        assert_eq!(dominant_direction(SW | NE), Some(Direction::NE));
    }

    #[test]
    fn test_format_mask() {
        assert_eq!(format_mask(0), "-");
        assert_eq!(format_mask(N | E | SW), "N|E|SW");
        assert_eq!(mask_of(&[Direction::W, Direction::N]), N | W);
    }
}
