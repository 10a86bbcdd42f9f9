//! Ballistics solver for the mortar calculator.
//!
//! Turns a mortar and a target position into a classified firing solution
//! under the game's fixed projectile physics: no drag, no wind, high-angle
//! fire only.

pub use mortar_core as core;

pub mod solver;
pub mod units;

// Re-export key functions for convenience.
pub use solver::{
    calculate_azimuth, calculate_distance, calculate_elevation_angle,
    calculate_firing_solution, calculate_time_of_flight, validate_firing_solution, Validation,
};
pub use units::{mils_to_degrees, radians_to_degrees, radians_to_mils};
