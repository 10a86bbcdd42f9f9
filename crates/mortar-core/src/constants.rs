//! Game physics constants and grid layout parameters.
//!
//! The ballistic values come from the game engine and are not real-world
//! physics. They must not be tuned.

use std::f64::consts::TAU;

// --- Projectile physics ---

/// Engine gravity (m/s²). Not Earth's 9.81.
pub const GRAVITY: f64 = 14.86;

/// Mortar muzzle velocity (m/s).
pub const PROJECTILE_VELOCITY: f64 = 148.64;

/// Highest elevation the solver returns (89° ≈ 1.55334 rad ≈ 1582 mils).
pub const MAX_ELEVATION_ANGLE: f64 = 89.0 * std::f64::consts::PI / 180.0;

/// Gameplay horizontal range ceiling (meters).
pub const MAX_RANGE: f64 = 1500.0;

/// Positions closer than this cannot be solved (meters).
pub const MIN_DISTANCE: f64 = 1.0;

/// Height difference above which accuracy degrades (meters).
pub const EXTREME_HEIGHT_DELTA: f64 = 200.0;

/// Horizontal and vertical flight times closer than this are averaged (seconds).
pub const TIME_OF_FLIGHT_TOLERANCE: f64 = 1e-6;

// --- Angular units ---

/// NATO mils per full circle.
pub const MILS_PER_CIRCLE: f64 = 6400.0;

/// Degrees per full circle.
pub const DEGREES_PER_CIRCLE: f64 = 360.0;

/// Radians per full circle.
pub const RADIANS_PER_CIRCLE: f64 = TAU;

// --- Grid ---

/// Grid squares along each map edge.
pub const GRID_SQUARES: u8 = 13;

/// Column letters, west to east.
pub const GRID_COLUMNS: [char; 13] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
];

// --- Heightmap ---

/// Largest raw heightmap sample; maps to the map's height scale.
pub const HEIGHTMAP_MAX_SAMPLE: f64 = 65535.0;

/// Default map edge length when no metadata is available (meters).
pub const DEFAULT_MAP_SIZE: f64 = 4096.0;

/// Tolerance for coordinates slightly outside the map (meters).
pub const COORDINATE_TOLERANCE: f64 = 0.1;
