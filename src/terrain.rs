//! Terrain categories and the grid types the pipeline passes around.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// Height or moisture values in [0, 1].
pub type HeightField = Tilemap<f64>;
pub type MoistureField = Tilemap<f64>;

/// Classified terrain, one category per cell.
pub type TerrainGrid = Tilemap<TerrainCategory>;

/// Discrete terrain classes, lowest to highest.
///
/// Ordering goes through [`TerrainCategory::rank`], never through the
/// declaration order of the variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainCategory {
    #[serde(rename = "water_deep")]
    DeepWater,
    #[serde(rename = "water_shallow")]
    ShallowWater,
    #[serde(rename = "sand")]
    Sand,
    #[default]
    #[serde(rename = "grass")]
    Grass,
    #[serde(rename = "hills")]
    Hills,
    #[serde(rename = "rock")]
    Rock,
    #[serde(rename = "mountain")]
    Mountain,
}

/// Number of categories, and the length of any per-category tally.
pub const CATEGORY_COUNT: usize = 7;

impl TerrainCategory {
    /// All categories, indexed by rank.
    pub const ALL: [TerrainCategory; CATEGORY_COUNT] = [
        TerrainCategory::DeepWater,
        TerrainCategory::ShallowWater,
        TerrainCategory::Sand,
        TerrainCategory::Grass,
        TerrainCategory::Hills,
        TerrainCategory::Rock,
        TerrainCategory::Mountain,
    ];

    /// Position in the DeepWater..Mountain sequence.
    pub fn rank(self) -> u8 {
        match self {
            TerrainCategory::DeepWater => 0,
            TerrainCategory::ShallowWater => 1,
            TerrainCategory::Sand => 2,
            TerrainCategory::Grass => 3,
            TerrainCategory::Hills => 4,
            TerrainCategory::Rock => 5,
            TerrainCategory::Mountain => 6,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Absolute rank difference, used to tell "close" terrain from abrupt jumps.
    pub fn rank_distance(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainCategory::DeepWater => "water_deep",
            TerrainCategory::ShallowWater => "water_shallow",
            TerrainCategory::Sand => "sand",
            TerrainCategory::Grass => "grass",
            TerrainCategory::Hills => "hills",
            TerrainCategory::Rock => "rock",
            TerrainCategory::Mountain => "mountain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    pub fn is_water(self) -> bool {
        matches!(self, TerrainCategory::DeepWater | TerrainCategory::ShallowWater)
    }
}

impl PartialOrd for TerrainCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TerrainCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of cells per category, indexed by rank.
pub fn category_counts(grid: &TerrainGrid) -> [usize; CATEGORY_COUNT] {
    let mut counts = [0usize; CATEGORY_COUNT];
    for category in grid.values() {
        counts[category.rank() as usize] += 1;
    }
    counts
}
