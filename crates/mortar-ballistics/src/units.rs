//! Angular unit conversions.

use mortar_core::constants::{DEGREES_PER_CIRCLE, MILS_PER_CIRCLE, RADIANS_PER_CIRCLE};

pub fn radians_to_mils(radians: f64) -> f64 {
    radians * (MILS_PER_CIRCLE / RADIANS_PER_CIRCLE)
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (DEGREES_PER_CIRCLE / RADIANS_PER_CIRCLE)
}

pub fn mils_to_degrees(mils: f64) -> f64 {
    mils * (DEGREES_PER_CIRCLE / MILS_PER_CIRCLE)
}
