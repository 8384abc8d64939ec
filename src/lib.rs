//! Procedural terrain synthesis and tile-transition library
//!
//! Turns `(width, height, seed)` into a grid of terrain categories and
//! computes the neighbor bitmasks a renderer uses to pick tile variants.

pub mod ascii;
pub mod classifier;
pub mod config;
pub mod continent;
pub mod error;
pub mod export;
pub mod generator;
pub mod moisture;
pub mod noise_field;
pub mod smoothing;
pub mod terrain;
pub mod tilemap;
pub mod tiles;
pub mod transitions;

pub use config::GenerationConfig;
pub use error::{Result, TerrainError};
pub use generator::{generate_terrain_map, GeneratedTerrain, TerrainGenerator};
pub use terrain::{TerrainCategory, TerrainGrid};
pub use tiles::{create_terrain_transitions, TileMap, TransitionTile};
pub use transitions::{bitmask, variant_for, TileVariant};
