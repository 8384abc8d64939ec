//! End-to-end terrain generation:
//! height noise -> continent mask -> moisture -> classification -> smoothing.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::classifier::classify_fields;
use crate::config::GenerationConfig;
use crate::continent::apply_continent_mask;
use crate::error::{check_dimensions, Result};
use crate::moisture::generate_moisture;
use crate::noise_field::{generate_field, NoiseParams};
use crate::smoothing::smooth;
use crate::terrain::{category_counts, HeightField, MoistureField, TerrainGrid};

/// Seeds drawn when the caller does not supply one fall in `0..SEED_RANGE`.
pub const SEED_RANGE: i64 = 1_000_000;

/// A generated grid together with the seed that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedTerrain {
    pub seed: i64,
    pub grid: TerrainGrid,
}

/// Every intermediate layer of one generation run.
#[derive(Clone, Debug)]
pub struct TerrainLayers {
    pub seed: i64,
    pub height: HeightField,
    pub moisture: MoistureField,
    pub grid: TerrainGrid,
}

/// Generator bound to a validated configuration.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: GenerationConfig,
}

impl TerrainGenerator {
    /// Validates the configuration up front so generation itself cannot fail
    /// on bad thresholds.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate a `width x height` terrain grid. A `None` seed draws a fresh
    /// one, reported back in the result.
    pub fn generate_terrain_map(
        &self,
        width: usize,
        height: usize,
        seed: Option<i64>,
    ) -> Result<GeneratedTerrain> {
        let layers = self.generate_layers(width, height, seed)?;
        Ok(GeneratedTerrain {
            seed: layers.seed,
            grid: layers.grid,
        })
    }

    /// Run the full pipeline and keep the height and moisture fields.
    #[instrument(skip(self))]
    pub fn generate_layers(
        &self,
        width: usize,
        height: usize,
        seed: Option<i64>,
    ) -> Result<TerrainLayers> {
        check_dimensions(width, height)?;

        let seed = match seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen_range(0..SEED_RANGE);
                debug!(seed, "drew fresh terrain seed");
                seed
            }
        };
        info!("Generating terrain map {}x{} with seed {}", width, height, seed);
        let start = Instant::now();

        let params = NoiseParams::terrain(&self.config);
        let mut height_field = generate_field(width, height, seed, &params)?;
        apply_continent_mask(&mut height_field);
        debug!(elapsed = ?start.elapsed(), "height field ready");

        let moisture = generate_moisture(width, height, seed, &height_field, &self.config)?;
        debug!(elapsed = ?start.elapsed(), "moisture field ready");

        let classified = classify_fields(&height_field, &moisture, &self.config);
        let grid = smooth(&classified);

        let distinct = category_counts(&grid).iter().filter(|&&count| count > 0).count();
        info!(distinct, elapsed = ?start.elapsed(), "terrain map generated");

        Ok(TerrainLayers {
            seed,
            height: height_field,
            moisture,
            grid,
        })
    }
}

/// One-shot generation with an explicit configuration.
pub fn generate_terrain_map(
    width: usize,
    height: usize,
    seed: Option<i64>,
    config: &GenerationConfig,
) -> Result<GeneratedTerrain> {
    TerrainGenerator::new(config.clone())?.generate_terrain_map(width, height, seed)
}
