//! Fundamental geometric types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Point in map space (meters).
/// Origin is the map's northwest corner; x = East, y = South, z = elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the map datum (z = 0).
    pub fn flat(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Same horizontal position at a different elevation.
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Horizontal components as a vector.
    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Horizontal offset to another point (`other - self`, z ignored).
    pub fn horizontal_offset_to(&self, other: &WorldPoint) -> DVec2 {
        other.horizontal() - self.horizontal()
    }

    /// Horizontal range (ignoring elevation).
    pub fn horizontal_range_to(&self, other: &WorldPoint) -> f64 {
        self.horizontal_offset_to(other).length()
    }

    /// Signed elevation difference (`other.z - self.z`).
    pub fn height_delta_to(&self, other: &WorldPoint) -> f64 {
        other.z - self.z
    }
}
