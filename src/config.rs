//! Configuration management for the TripSift engine
//!
//! Handles loading tuning values from an optional TOML file and environment
//! variables, and validates them before the engine will accept them.
//!
//! The text-match score constants (0.7 exact, 0.5 substring) are deliberately
//! not configurable: they encode tuned product behavior and live as module
//! constants next to the scorer.

use crate::TripSiftError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tuning configuration for the relevance engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// Core radius for urban destinations, in km
    #[serde(default = "default_urban_core_km")]
    pub urban_core_km: f64,
    /// Core radius for regional (multi-town) destinations, in km
    #[serde(default = "default_regional_core_km")]
    pub regional_core_km: f64,
    /// Outer radius as a multiple of the core radius
    #[serde(default = "default_taper_ratio")]
    pub taper_ratio: f64,
    /// Weight applied to anchors from adjacent itinerary days
    #[serde(default = "default_adjacent_day_weight")]
    pub adjacent_day_weight: f64,
    /// Suppress a lodging anchor within this distance of an existing anchor
    #[serde(default = "default_lodging_dedup_km")]
    pub lodging_dedup_km: f64,
}

// Default value functions
fn default_urban_core_km() -> f64 {
    18.0
}

fn default_regional_core_km() -> f64 {
    55.0
}

fn default_taper_ratio() -> f64 {
    1.6
}

fn default_adjacent_day_weight() -> f64 {
    0.55
}

fn default_lodging_dedup_km() -> f64 {
    10.0
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            urban_core_km: default_urban_core_km(),
            regional_core_km: default_regional_core_km(),
            taper_ratio: default_taper_ratio(),
            adjacent_day_weight: default_adjacent_day_weight(),
            lodging_dedup_km: default_lodging_dedup_km(),
        }
    }
}

impl RelevanceConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path, falling back to defaults
    /// for anything the file and environment do not set
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("tripsift.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TRIPSIFT_ prefix,
        // e.g. TRIPSIFT_URBAN_CORE_KM=20
        builder = builder.add_source(Environment::with_prefix("TRIPSIFT"));

        let config = builder
            .build()
            .with_context(|| format!("Failed to load config from {}", config_file.display()))?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to parse configuration values")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> std::result::Result<(), TripSiftError> {
        if self.urban_core_km <= 0.0 || self.regional_core_km <= 0.0 {
            return Err(TripSiftError::validation(
                "core radii must be positive kilometers",
            ));
        }
        if self.taper_ratio <= 1.0 {
            return Err(TripSiftError::validation(
                "taper ratio must be greater than 1 so the outer radius exceeds the core",
            ));
        }
        if self.adjacent_day_weight <= 0.0 || self.adjacent_day_weight > 1.0 {
            return Err(TripSiftError::validation(
                "adjacent day weight must be in (0, 1]",
            ));
        }
        if self.lodging_dedup_km < 0.0 {
            return Err(TripSiftError::validation(
                "lodging dedup distance cannot be negative",
            ));
        }
        Ok(())
    }
}
