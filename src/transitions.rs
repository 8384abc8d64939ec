//! Neighbor bitmasks for picking tile variants at render time.
//!
//! Bit `i` of a mask is set when the neighbor in [`Direction::ALL`]`[i]`
//! exists and has the same category as the cell. The order is N, NE, E, SE,
//! S, SW, W, NW with north at `y - 1`; the variant table below depends on it.

use serde::{Deserialize, Serialize};

use crate::terrain::{TerrainCategory, TerrainGrid};
use crate::tilemap::Tilemap;

/// Compass neighbors in bit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(dx, dy)` toward this neighbor.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }
}

/// Mask for the cell at `(x, y)` given a category lookup over a
/// `width x height` map. Cells the lookup reports as missing never match.
pub(crate) fn neighbor_mask(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    lookup: impl Fn(usize, usize) -> Option<TerrainCategory>,
) -> u8 {
    let Some(category) = lookup(x, y) else {
        return 0;
    };

    let mut mask = 0u8;
    for direction in Direction::ALL {
        let (dx, dy) = direction.offset();
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
            continue;
        }
        if lookup(nx as usize, ny as usize) == Some(category) {
            mask |= direction.bit();
        }
    }
    mask
}

/// Transition bitmask for one cell of a terrain grid.
pub fn bitmask(grid: &TerrainGrid, x: usize, y: usize) -> u8 {
    neighbor_mask(grid.width, grid.height, x, y, |cx, cy| Some(*grid.get(cx, cy)))
}

/// Bitmasks for the whole grid. Not cached anywhere; call again after edits.
pub fn compute_bitmasks(grid: &TerrainGrid) -> Tilemap<u8> {
    Tilemap::from_fn(grid.width, grid.height, |x, y| bitmask(grid, x, y))
}

/// Named tile variants for the common masks.
///
/// Edge variants name the open side: `EdgeNorth` is a tile whose three
/// northern neighbors differ while the other five match. Inner corners have
/// everything matching except a single diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileVariant {
    Isolated,
    Surrounded,
    EdgeNorth,
    EdgeEast,
    EdgeSouth,
    EdgeWest,
    InnerCornerNorthEast,
    InnerCornerSouthEast,
    InnerCornerSouthWest,
    InnerCornerNorthWest,
    Default,
}

const VARIANT_TABLE: [(u8, TileVariant); 10] = [
    (0b0000_0000, TileVariant::Isolated),
    (0b1111_1111, TileVariant::Surrounded),
    (0b0111_1100, TileVariant::EdgeNorth),
    (0b1111_0001, TileVariant::EdgeEast),
    (0b1100_0111, TileVariant::EdgeSouth),
    (0b0001_1111, TileVariant::EdgeWest),
    (0b1111_1101, TileVariant::InnerCornerNorthEast),
    (0b1111_0111, TileVariant::InnerCornerSouthEast),
    (0b1101_1111, TileVariant::InnerCornerSouthWest),
    (0b0111_1111, TileVariant::InnerCornerNorthWest),
];

/// Variant for a mask; anything not in the table is `TileVariant::Default`.
pub fn variant_for(mask: u8) -> TileVariant {
    VARIANT_TABLE
        .iter()
        .find(|(pattern, _)| *pattern == mask)
        .map(|&(_, variant)| variant)
        .unwrap_or(TileVariant::Default)
}

impl TileVariant {
    pub fn name(self) -> &'static str {
        match self {
            TileVariant::Isolated => "isolated",
            TileVariant::Surrounded => "surrounded",
            TileVariant::EdgeNorth => "edge_north",
            TileVariant::EdgeEast => "edge_east",
            TileVariant::EdgeSouth => "edge_south",
            TileVariant::EdgeWest => "edge_west",
            TileVariant::InnerCornerNorthEast => "inner_corner_north_east",
            TileVariant::InnerCornerSouthEast => "inner_corner_south_east",
            TileVariant::InnerCornerSouthWest => "inner_corner_south_west",
            TileVariant::InnerCornerNorthWest => "inner_corner_north_west",
            TileVariant::Default => "default",
        }
    }
}
