//! Firing solution solver.
//!
//! The projectile flies a drag-free parabola at a fixed muzzle velocity, so
//! the elevation angle has a closed form. Of the two roots of the range
//! equation the solver always takes the high-angle one.
//!
//! Validation runs as an ordered chain; the first failing check decides the
//! status:
//!
//! 1. closer than 1 m → `TooClose`
//! 2. negative discriminant → `Unreachable`
//! 3. elevation missing or above 89° → `AngleTooHigh`
//! 4. height difference above 200 m → `ExtremeElevation` (still valid)
//! 5. otherwise → `Ok`
//!
//! There is no separate distance check. The 1500 m ceiling falls out of the
//! discriminant: flat-ground reach is `v²/g ≈ 1487 m`, and only targets well
//! below the firer can be hit from further out.

use std::f64::consts::FRAC_PI_2;

use mortar_core::constants::*;
use mortar_core::enums::SolutionStatus;
use mortar_core::solution::FiringSolution;
use mortar_core::types::WorldPoint;

use crate::units::{radians_to_degrees, radians_to_mils};

/// Outcome of [`validate_firing_solution`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub status: SolutionStatus,
    pub message: String,
    /// High-angle elevation (radians); `Some` exactly when `valid`.
    pub elevation: Option<f64>,
}

impl Validation {
    fn rejected(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            status,
            message: message.into(),
            elevation: None,
        }
    }

    fn accepted(status: SolutionStatus, message: impl Into<String>, elevation: f64) -> Self {
        Self {
            valid: status.is_valid(),
            status,
            message: message.into(),
            elevation: Some(elevation),
        }
    }
}

/// Horizontal distance between two map-space points (meters).
pub fn calculate_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    WorldPoint::flat(x1, y1).horizontal_range_to(&WorldPoint::flat(x2, y2))
}

/// Compass bearing from the first point to the second, degrees in [0, 360).
///
/// 0 = North, clockwise. Map y points south, hence `atan2(dx, -dy)`.
pub fn calculate_azimuth(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;

    let mut azimuth = radians_to_degrees(dx.atan2(-dy));
    if azimuth < 0.0 {
        azimuth += DEGREES_PER_CIRCLE;
    }
    // A tiny negative angle can round up to exactly 360.
    if azimuth >= DEGREES_PER_CIRCLE {
        azimuth -= DEGREES_PER_CIRCLE;
    }
    azimuth
}

/// `v⁴ − g·(g·D² + 2·v²·ΔZ)`; negative when no trajectory reaches the target.
fn discriminant(distance: f64, height_diff: f64) -> f64 {
    let v2 = PROJECTILE_VELOCITY * PROJECTILE_VELOCITY;
    let v4 = v2 * v2;
    v4 - GRAVITY * (GRAVITY * distance * distance + 2.0 * v2 * height_diff)
}

/// High-angle elevation (radians) needed to hit a target `distance` meters
/// away and `height_diff` meters higher.
///
/// Returns `None` when the target is closer than 1 m, geometrically
/// unreachable, or the angle falls outside [0, 90°]. The 89° ceiling is
/// enforced by validation, not here.
pub fn calculate_elevation_angle(distance: f64, height_diff: f64) -> Option<f64> {
    if distance < MIN_DISTANCE {
        return None;
    }

    let disc = discriminant(distance, height_diff);
    if disc < 0.0 {
        return None;
    }

    let v2 = PROJECTILE_VELOCITY * PROJECTILE_VELOCITY;
    // Plus root: mortars fire high-angle
    let angle = ((v2 + disc.sqrt()) / (GRAVITY * distance)).atan();

    if (0.0..=FRAC_PI_2).contains(&angle) {
        Some(angle)
    } else {
        None
    }
}

/// Flight time (seconds) along the trajectory fired at `elevation` radians.
///
/// The horizontal time `D / (v·cos φ)` and the later root of
/// `½·g·t² − v·sin φ·t + ΔZ = 0` describe the same flight; they are
/// averaged when they agree, otherwise the horizontal time is used unless
/// the shot is near vertical. NaN if the target height is never reached.
pub fn calculate_time_of_flight(distance: f64, elevation: f64, height_diff: f64) -> f64 {
    let v = PROJECTILE_VELOCITY;
    let g = GRAVITY;

    let cos_phi = elevation.cos();
    let v_sin = v * elevation.sin();

    let horizontal_time = if cos_phi.abs() > 1e-12 {
        distance / (v * cos_phi)
    } else {
        f64::INFINITY
    };

    let disc = v_sin * v_sin - 2.0 * g * height_diff;
    if disc < 0.0 {
        return f64::NAN;
    }
    let sqrt_disc = disc.sqrt();
    let vertical_time = ((v_sin - sqrt_disc) / g).max((v_sin + sqrt_disc) / g);

    if !horizontal_time.is_finite() {
        return vertical_time;
    }
    if (horizontal_time - vertical_time).abs() > TIME_OF_FLIGHT_TOLERANCE {
        return horizontal_time;
    }
    0.5 * (horizontal_time + vertical_time)
}

/// Classify a shot by horizontal distance and height difference.
pub fn validate_firing_solution(distance: f64, height_diff: f64) -> Validation {
    if distance < MIN_DISTANCE {
        return Validation::rejected(
            SolutionStatus::TooClose,
            "ERROR - Mortar and target positions too close (< 1m)",
        );
    }

    if discriminant(distance, height_diff) < 0.0 {
        return Validation::rejected(
            SolutionStatus::Unreachable,
            "TARGET UNREACHABLE - Reduce distance or elevation difference",
        );
    }

    let max_degrees = radians_to_degrees(MAX_ELEVATION_ANGLE);
    let angle = match calculate_elevation_angle(distance, height_diff) {
        None => {
            return Validation::rejected(
                SolutionStatus::AngleTooHigh,
                format!("ANGLE TOO HIGH - Shot geometry impossible (max: {max_degrees:.1}°)"),
            );
        }
        Some(angle) if angle > MAX_ELEVATION_ANGLE => {
            let required = radians_to_degrees(angle);
            return Validation::rejected(
                SolutionStatus::AngleTooHigh,
                format!(
                    "OUT OF RANGE - Requires {required:.1}° elevation (max: {max_degrees:.1}°). \
                     Target too close or elevation difference too extreme."
                ),
            );
        }
        Some(angle) => angle,
    };

    if height_diff.abs() > EXTREME_HEIGHT_DELTA {
        return Validation::accepted(
            SolutionStatus::ExtremeElevation,
            format!(
                "WARNING - Extreme elevation difference ({}m) may reduce accuracy",
                height_diff.round()
            ),
            angle,
        );
    }

    Validation::accepted(SolutionStatus::Ok, "Firing solution valid", angle)
}

/// Full firing solution from mortar to target.
///
/// Pure: identical inputs always give a bit-identical result.
pub fn calculate_firing_solution(mortar: &WorldPoint, target: &WorldPoint) -> FiringSolution {
    let distance = mortar.horizontal_range_to(target);
    let azimuth = calculate_azimuth(mortar.x, mortar.y, target.x, target.y);
    let height_delta = mortar.height_delta_to(target);

    let validation = validate_firing_solution(distance, height_delta);
    let elevation = validation.elevation;

    let time_of_flight =
        elevation.map(|angle| calculate_time_of_flight(distance, angle, height_delta));

    tracing::debug!(
        "Firing solution: distance={distance:.1}m azimuth={azimuth:.1}° dz={height_delta:.1}m status={}",
        validation.status
    );

    FiringSolution {
        distance,
        azimuth,
        height_delta,
        elevation_radians: elevation,
        elevation_mils: elevation.map(radians_to_mils),
        elevation_degrees: elevation.map(radians_to_degrees),
        time_of_flight,
        status: validation.status,
        message: validation.message,
        valid: validation.valid,
    }
}
