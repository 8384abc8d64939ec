//! Generation thresholds and noise parameters.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TerrainError};

/// Noise settings and the six height cutoffs of the classification ladder.
///
/// Missing keys fall back to the defaults when deserializing, so a partial
/// JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Coordinate multiplier for noise sampling (lower = larger features)
    pub noise_scale: f64,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude decay per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    pub deep_water_level: f64,
    pub water_level: f64,
    pub sand_level: f64,
    pub grass_level: f64,
    pub hills_level: f64,
    pub rock_level: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.1,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            deep_water_level: 0.15,
            water_level: 0.3,
            sand_level: 0.35,
            grass_level: 0.6,
            hills_level: 0.7,
            rock_level: 0.85,
        }
    }
}

impl GenerationConfig {
    /// Threshold names and values in ladder order.
    pub fn thresholds(&self) -> [(&'static str, f64); 6] {
        [
            ("deep_water_level", self.deep_water_level),
            ("water_level", self.water_level),
            ("sand_level", self.sand_level),
            ("grass_level", self.grass_level),
            ("hills_level", self.hills_level),
            ("rock_level", self.rock_level),
        ]
    }

    /// Check noise parameters and that the thresholds climb strictly within [0, 1].
    pub fn validate(&self) -> Result<()> {
        let noise = [
            ("noise_scale", self.noise_scale),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ];
        for (name, value) in noise {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::InvalidNoiseParameter { name, value });
            }
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidNoiseParameter { name: "octaves", value: 0.0 });
        }

        let thresholds = self.thresholds();
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(TerrainError::ThresholdOutOfRange { name, value });
            }
        }
        for pair in thresholds.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value >= upper_value {
                return Err(TerrainError::ThresholdsNotIncreasing {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }
        Ok(())
    }

    /// Build from a plain key-value mapping. Absent keys keep their default,
    /// unknown keys are ignored. `octaves` is rounded to the nearest integer.
    pub fn from_values(values: &HashMap<String, f64>) -> Result<Self> {
        let mut config = Self::default();
        for (key, &value) in values {
            match key.as_str() {
                "noise_scale" => config.noise_scale = value,
                "octaves" => {
                    if !value.is_finite() || value < 0.5 {
                        return Err(TerrainError::InvalidNoiseParameter { name: "octaves", value });
                    }
                    config.octaves = value.round() as u32;
                }
                "persistence" => config.persistence = value,
                "lacunarity" => config.lacunarity = value,
                "deep_water_level" => config.deep_water_level = value,
                "water_level" => config.water_level = value,
                "sand_level" => config.sand_level = value,
                "grass_level" => config.grass_level = value,
                "hills_level" => config.hills_level = value,
                "rock_level" => config.rock_level = value,
                other => warn!(key = other, "ignoring unknown terrain config key"),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON object with any subset of the config keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), "loaded terrain config");
        Ok(config)
    }
}
