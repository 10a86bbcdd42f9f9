//! Enumeration types used throughout the calculator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome classification of a firing solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolutionStatus {
    /// Mortar and target are less than a meter apart.
    TooClose,
    /// No real trajectory exists at the fixed muzzle velocity.
    Unreachable,
    /// The high-angle solution exceeds the maximum elevation.
    AngleTooHigh,
    /// Beyond the 1500 m range ceiling. The validation chain never emits it:
    /// the ceiling is enforced through the discriminant, not a distance check.
    OutOfRange,
    /// Valid, with a large height difference that may reduce accuracy.
    ExtremeElevation,
    /// Valid.
    Ok,
}

impl SolutionStatus {
    /// Whether a solution with this status can be fired.
    pub fn is_valid(self) -> bool {
        matches!(self, SolutionStatus::Ok | SolutionStatus::ExtremeElevation)
    }

    /// Wire name (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::TooClose => "TOO_CLOSE",
            SolutionStatus::Unreachable => "UNREACHABLE",
            SolutionStatus::AngleTooHigh => "ANGLE_TOO_HIGH",
            SolutionStatus::OutOfRange => "OUT_OF_RANGE",
            SolutionStatus::ExtremeElevation => "EXTREME_ELEVATION",
            SolutionStatus::Ok => "OK",
        }
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
