//! Coherent noise fields normalized to [0, 1].

use noise::{NoiseFn, OpenSimplex, Seedable};
use rayon::prelude::*;
use tracing::trace;

use crate::config::GenerationConfig;
use crate::error::{check_dimensions, Result};
use crate::terrain::HeightField;

/// Value used for every cell of a field with zero variance.
pub const FLAT_FIELD_VALUE: f64 = 0.5;

/// Layered noise settings for one field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl NoiseParams {
    /// Settings for the height field, taken straight from the config.
    pub fn terrain(config: &GenerationConfig) -> Self {
        Self {
            scale: config.noise_scale,
            octaves: config.octaves,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
        }
    }

    /// Moisture uses 1.5x the terrain scale and one octave fewer (never below one).
    pub fn moisture(config: &GenerationConfig) -> Self {
        Self {
            scale: config.noise_scale * 1.5,
            octaves: config.octaves.saturating_sub(1).max(1),
            ..Self::terrain(config)
        }
    }
}

/// The noise crate seeds with 32 bits; only the low 32 bits of the seed
/// (two's complement for negative seeds) are kept.
fn noise_seed(seed: i64) -> u32 {
    seed as u32
}

/// Sample layered OpenSimplex noise at `(x * scale, y * scale)` for every cell,
/// then rescale so the field spans exactly [0, 1].
///
/// Rows are sampled in parallel. Every cell depends only on its own
/// coordinates, so the output is identical to a sequential run.
pub fn generate_field(
    width: usize,
    height: usize,
    seed: i64,
    params: &NoiseParams,
) -> Result<HeightField> {
    check_dimensions(width, height)?;

    let noise = OpenSimplex::new(0).set_seed(noise_seed(seed));
    let mut field = HeightField::new_with(width, height, 0.0);

    field.par_rows_mut().enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = fbm(
                &noise,
                x as f64 * params.scale,
                y as f64 * params.scale,
                params.octaves,
                params.persistence,
                params.lacunarity,
            );
        }
    });

    normalize_field(&mut field);
    trace!(width, height, seed, "noise field sampled");
    Ok(field)
}

/// Fractional Brownian motion over `octaves` layers of noise.
fn fbm<N: NoiseFn<f64, 2>>(
    noise: &N,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}

/// Linearly rescale in place so min maps to 0 and max to 1.
/// A flat field (min == max) becomes a constant [`FLAT_FIELD_VALUE`].
pub fn normalize_field(field: &mut HeightField) {
    let Some((min_val, max_val)) = field.min_max() else {
        return;
    };

    let range = max_val - min_val;
    if range > 0.0 {
        for value in field.values_mut() {
            // Clamp away rounding drift at the ends.
            *value = ((*value - min_val) / range).clamp(0.0, 1.0);
        }
    } else {
        field.fill(FLAT_FIELD_VALUE);
    }
}
