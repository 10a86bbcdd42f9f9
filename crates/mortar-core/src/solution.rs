//! Firing solution record produced by the ballistics solver.

use serde::{Deserialize, Serialize};

use crate::enums::SolutionStatus;

/// Complete firing solution for one mortar/target pair.
///
/// Angle and time fields are `Some` only when `valid` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    /// Horizontal distance (meters).
    pub distance: f64,
    /// Compass bearing from mortar to target (degrees, 0 = North, clockwise).
    pub azimuth: f64,
    /// Target elevation minus mortar elevation (meters).
    pub height_delta: f64,
    pub elevation_radians: Option<f64>,
    pub elevation_mils: Option<f64>,
    pub elevation_degrees: Option<f64>,
    /// Time of flight (seconds).
    pub time_of_flight: Option<f64>,
    pub status: SolutionStatus,
    /// Human-readable explanation of `status`.
    pub message: String,
    pub valid: bool,
}
