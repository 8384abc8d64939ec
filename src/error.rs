use std::io;

use thiserror::Error;

/// Result alias used by every fallible entry point of the crate.
pub type Result<T> = std::result::Result<T, TerrainError>;

/// Errors raised before or around generation. Degenerate noise fields and
/// out-of-bounds neighbors are not errors and never show up here.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("field is {actual_width}x{actual_height} but the map is {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },
    #[error("thresholds out of order: {lower} ({lower_value}) >= {upper} ({upper_value})")]
    ThresholdsNotIncreasing {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },
    #[error("threshold {name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("noise parameter {name} is invalid: {value}")]
    InvalidNoiseParameter { name: &'static str, value: f64 },
    #[error("tile at ({x}, {y}) lies outside the {width}x{height} map")]
    TileOutOfBounds { x: usize, y: usize, width: usize, height: usize },
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

/// Fail fast on empty maps.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}
