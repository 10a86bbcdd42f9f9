//! Map metadata as produced by the map processing pipeline.

use serde::{Deserialize, Serialize};

use mortar_core::constants::GRID_SQUARES;

use crate::error::TerrainError;

/// Per-map scale parameters (`metadata.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// Map edge length in meters.
    pub map_size: f64,
    /// Elevation of the largest heightmap sample, in meters.
    pub height_scale: f64,
    /// Meters per grid square. Derived from `map_size` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heightmap_resolution: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters_per_pixel: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
}

impl MapMetadata {
    /// Metadata with only the required fields.
    pub fn new(map_size: f64, height_scale: f64) -> Self {
        Self {
            map_size,
            height_scale,
            grid_scale: None,
            map_name: None,
            heightmap_resolution: None,
            meters_per_pixel: None,
            format_version: None,
        }
    }

    /// Meters per grid square, always `map_size / 13`.
    ///
    /// A stored `grid_scale` is informational only; grid lookups and
    /// elevation sampling must agree on square boundaries.
    pub fn grid_scale(&self) -> f64 {
        self.map_size / GRID_SQUARES as f64
    }

    /// Check the required fields are usable.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.map_size > 0.0 && self.map_size.is_finite()) {
            return Err(TerrainError::InvalidMetadata(format!(
                "map_size must be positive, got {}",
                self.map_size
            )));
        }
        if !(self.height_scale > 0.0 && self.height_scale.is_finite()) {
            return Err(TerrainError::InvalidMetadata(format!(
                "height_scale must be positive, got {}",
                self.height_scale
            )));
        }
        if let Some(stored) = self.grid_scale {
            let derived = self.grid_scale();
            if (stored - derived).abs() > 1e-6 * derived {
                tracing::warn!(
                    "Stored grid_scale {stored} disagrees with map_size/13 = {derived}; using derived value"
                );
            }
        }
        Ok(())
    }
}
