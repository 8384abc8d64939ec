use crate::config::GenerationConfig;
use crate::terrain::{HeightField, MoistureField, TerrainCategory, TerrainGrid};

/// Map a height (and, in future, moisture) to a terrain category.
///
/// The ladder is checked bottom-up and the first band the height falls
/// under wins. Moisture is accepted but does not affect the result yet.
pub fn classify(height: f64, _moisture: f64, config: &GenerationConfig) -> TerrainCategory {
    if height < config.deep_water_level {
        TerrainCategory::DeepWater
    } else if height < config.water_level {
        TerrainCategory::ShallowWater
    } else if height < config.sand_level {
        TerrainCategory::Sand
    } else if height < config.grass_level {
        TerrainCategory::Grass
    } else if height < config.hills_level {
        TerrainCategory::Hills
    } else if height < config.rock_level {
        TerrainCategory::Rock
    } else {
        TerrainCategory::Mountain
    }
}

/// Classify every cell. Both fields must share the same dimensions.
pub fn classify_fields(
    heights: &HeightField,
    moisture: &MoistureField,
    config: &GenerationConfig,
) -> TerrainGrid {
    debug_assert_eq!(heights.shape(), moisture.shape());
    TerrainGrid::from_fn(heights.width, heights.height, |x, y| {
        classify(*heights.get(x, y), *moisture.get(x, y), config)
    })
}
