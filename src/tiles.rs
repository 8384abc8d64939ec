//! Tile-level adapter between the terrain grid and an external map.
//!
//! `create_terrain_transitions` works against anything implementing
//! [`TileMap`], so a renderer can keep its own tile records and only expose
//! the category and a bitmask slot.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::terrain::{TerrainCategory, TerrainGrid};
use crate::tilemap::Tilemap;
use crate::transitions::{neighbor_mask, variant_for, TileVariant};

/// A tile that carries a terrain category and a transition bitmask slot.
pub trait TransitionTile {
    fn category(&self) -> TerrainCategory;
    fn set_transition_bitmask(&mut self, mask: u8);
}

/// A rectangular map whose cells may be missing.
pub trait TileMap {
    type Tile: TransitionTile;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get_tile(&self, x: usize, y: usize) -> Option<&Self::Tile>;
    fn get_tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Self::Tile>;
}

/// Transition bitmask of the tile at `(x, y)`. Missing tiles, and missing or
/// out-of-range neighbors, contribute no bits.
pub fn tile_bitmask<M: TileMap + ?Sized>(map: &M, x: usize, y: usize) -> u8 {
    neighbor_mask(map.width(), map.height(), x, y, |cx, cy| {
        map.get_tile(cx, cy).map(|tile| tile.category())
    })
}

/// Write a transition bitmask into every present tile of `map`.
///
/// All masks are computed from the unmodified map before any is stored.
/// Missing tiles are skipped. Returns the number of tiles annotated.
#[instrument(skip_all)]
pub fn create_terrain_transitions<M: TileMap + ?Sized>(map: &mut M) -> usize {
    let (width, height) = (map.width(), map.height());

    let mut pending = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            if map.get_tile(x, y).is_some() {
                pending.push((x, y, tile_bitmask(&*map, x, y)));
            }
        }
    }

    let mut annotated = 0;
    for (x, y, mask) in pending {
        if let Some(tile) = map.get_tile_mut(x, y) {
            tile.set_transition_bitmask(mask);
            annotated += 1;
        }
    }

    debug!(width, height, annotated, "terrain transitions computed");
    annotated
}

/// Rendering-facing tile record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTile {
    #[serde(rename = "tile_type")]
    pub category: TerrainCategory,
    pub position: (usize, usize),
    #[serde(default)]
    pub transition_bitmask: u8,
}

impl TerrainTile {
    pub fn new(category: TerrainCategory, position: (usize, usize)) -> Self {
        Self {
            category,
            position,
            transition_bitmask: 0,
        }
    }

    pub fn variant(&self) -> TileVariant {
        variant_for(self.transition_bitmask)
    }
}

impl TransitionTile for TerrainTile {
    fn category(&self) -> TerrainCategory {
        self.category
    }

    fn set_transition_bitmask(&mut self, mask: u8) {
        self.transition_bitmask = mask;
    }
}

/// A map of optional [`TerrainTile`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    tiles: Tilemap<Option<TerrainTile>>,
}

impl TileLayer {
    /// An empty layer with every cell missing.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            tiles: Tilemap::new_with(width, height, None),
        }
    }

    /// One tile per grid cell, bitmasks zeroed.
    pub fn from_grid(grid: &TerrainGrid) -> Self {
        Self {
            tiles: Tilemap::from_fn(grid.width, grid.height, |x, y| {
                Some(TerrainTile::new(*grid.get(x, y), (x, y)))
            }),
        }
    }

    /// Place a tile at its own position. Returns the tile back if the
    /// position lies outside the layer.
    pub fn insert(&mut self, tile: TerrainTile) -> Result<(), TerrainTile> {
        let (x, y) = tile.position;
        if x >= self.tiles.width || y >= self.tiles.height {
            return Err(tile);
        }
        self.tiles.set(x, y, Some(tile));
        Ok(())
    }

    pub fn remove(&mut self, x: usize, y: usize) -> Option<TerrainTile> {
        if x >= self.tiles.width || y >= self.tiles.height {
            return None;
        }
        self.tiles.get_mut(x, y).take()
    }

    /// Present tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &TerrainTile> {
        self.tiles.values().flatten()
    }

    /// Bitmask per cell, 0 where a tile is missing.
    pub fn bitmasks(&self) -> Tilemap<u8> {
        self.tiles.map(|tile| tile.as_ref().map_or(0, |t| t.transition_bitmask))
    }
}

impl TileMap for TileLayer {
    type Tile = TerrainTile;

    fn width(&self) -> usize {
        self.tiles.width
    }

    fn height(&self) -> usize {
        self.tiles.height
    }

    fn get_tile(&self, x: usize, y: usize) -> Option<&TerrainTile> {
        if x >= self.tiles.width || y >= self.tiles.height {
            return None;
        }
        self.tiles.get(x, y).as_ref()
    }

    fn get_tile_mut(&mut self, x: usize, y: usize) -> Option<&mut TerrainTile> {
        if x >= self.tiles.width || y >= self.tiles.height {
            return None;
        }
        self.tiles.get_mut(x, y).as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::compute_bitmasks;

    use TerrainCategory::*;

    #[test]
    fn test_transitions_match_grid_bitmasks() {
        let grid = TerrainGrid::from_fn(6, 5, |x, y| if (x + y) % 3 == 0 { Sand } else { Grass });
        let mut layer = TileLayer::from_grid(&grid);

        let annotated = create_terrain_transitions(&mut layer);
        assert_eq!(annotated, 30);
        assert_eq!(layer.bitmasks(), compute_bitmasks(&grid));
    }

    #[test]
    fn test_grass_surrounded_by_sand() {
        let mut grid = TerrainGrid::new_with(5, 5, Sand);
        grid.set(2, 2, Grass);
        let mut layer = TileLayer::from_grid(&grid);
        create_terrain_transitions(&mut layer);

        let center = layer.get_tile(2, 2).unwrap();
        assert_eq!(center.transition_bitmask, 0);
        assert_eq!(center.variant(), TileVariant::Isolated);
    }

    #[test]
    fn test_missing_tiles_are_skipped() {
        let mut layer = TileLayer::empty(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 0) {
                    layer.insert(TerrainTile::new(Grass, (x, y))).unwrap();
                }
            }
        }

        let annotated = create_terrain_transitions(&mut layer);
        assert_eq!(annotated, 8);
        assert!(layer.get_tile(1, 0).is_none());
        // The missing north neighbor leaves the center without its north bit.
        assert_eq!(layer.get_tile(1, 1).unwrap().transition_bitmask, 0xFE);
        assert_eq!(layer.get_tile(1, 1).unwrap().variant(), TileVariant::Default);
    }

    #[test]
    fn test_empty_layer() {
        let mut layer = TileLayer::empty(4, 2);
        assert_eq!(create_terrain_transitions(&mut layer), 0);
        assert_eq!(layer.tiles().count(), 0);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut layer = TileLayer::empty(2, 2);
        let tile = TerrainTile::new(Rock, (5, 0));
        assert_eq!(layer.insert(tile.clone()), Err(tile));
        assert!(layer.get_tile(5, 0).is_none());
        assert!(layer.remove(5, 0).is_none());
    }

    #[test]
    fn test_rerun_after_edit() {
        let grid = TerrainGrid::new_with(3, 3, Grass);
        let mut layer = TileLayer::from_grid(&grid);
        create_terrain_transitions(&mut layer);
        assert_eq!(layer.get_tile(1, 1).unwrap().transition_bitmask, 0xFF);

        layer.insert(TerrainTile::new(Hills, (2, 1))).unwrap();
        create_terrain_transitions(&mut layer);
        assert_eq!(layer.get_tile(1, 1).unwrap().transition_bitmask, 0xFB);
        assert_eq!(layer.get_tile(2, 1).unwrap().transition_bitmask, 0);
    }
}
