//! Moisture field: independent noise, raised around low-lying water cells.

use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{check_dimensions, Result, TerrainError};
use crate::noise_field::{generate_field, NoiseParams};
use crate::terrain::{HeightField, MoistureField};

/// Fixed offset between the terrain seed and the moisture seed.
pub const MOISTURE_SEED_OFFSET: i64 = 1000;

/// Cells within this Euclidean radius of water receive extra moisture.
pub const DIFFUSION_RADIUS: i32 = 3;

/// Boost at distance zero; falls off linearly to zero at the radius.
pub const DIFFUSION_STRENGTH: f64 = 0.3;

pub fn moisture_seed(seed: i64) -> i64 {
    seed.wrapping_add(MOISTURE_SEED_OFFSET)
}

/// Generate the moisture field for a map whose heights are `height_field`.
///
/// The base field is normalized noise; the diffusion step afterwards only
/// raises values (capped at 1.0) and is not renormalized.
pub fn generate_moisture(
    width: usize,
    height: usize,
    seed: i64,
    height_field: &HeightField,
    config: &GenerationConfig,
) -> Result<MoistureField> {
    check_dimensions(width, height)?;
    if height_field.width != width || height_field.height != height {
        return Err(TerrainError::DimensionMismatch {
            width,
            height,
            actual_width: height_field.width,
            actual_height: height_field.height,
        });
    }

    let params = NoiseParams::moisture(config);
    let mut moisture = generate_field(width, height, moisture_seed(seed), &params)?;
    let sources = diffuse_from_water(&mut moisture, height_field, config.water_level);
    debug!(sources, "moisture diffused from water cells");
    Ok(moisture)
}

/// Offsets inside the diffusion disc with their boost.
fn diffusion_kernel() -> Vec<(isize, isize, f64)> {
    let radius = DIFFUSION_RADIUS as f64;
    let mut kernel = Vec::new();
    for dy in -DIFFUSION_RADIUS..=DIFFUSION_RADIUS {
        for dx in -DIFFUSION_RADIUS..=DIFFUSION_RADIUS {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if distance <= radius {
                let factor = (radius - distance) / radius * DIFFUSION_STRENGTH;
                kernel.push((dx as isize, dy as isize, factor));
            }
        }
    }
    kernel
}

/// For every cell below `water_level`, add the kernel boost to each in-bounds
/// cell around it, clamped to 1.0. Returns the number of water cells.
///
/// Sources are read from `height_field` only, never from the moisture being
/// written, so the visiting order cannot change the result.
pub fn diffuse_from_water(
    moisture: &mut MoistureField,
    height_field: &HeightField,
    water_level: f64,
) -> usize {
    let kernel = diffusion_kernel();
    let mut sources = 0;

    for y in 0..height_field.height {
        for x in 0..height_field.width {
            if *height_field.get(x, y) >= water_level {
                continue;
            }
            sources += 1;

            for &(dx, dy, factor) in &kernel {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if !moisture.in_bounds(nx, ny) {
                    continue;
                }
                let cell = moisture.get_mut(nx as usize, ny as usize);
                *cell = (*cell + factor).min(1.0);
            }
        }
    }

    sources
}
