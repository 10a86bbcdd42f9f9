use thiserror::Error;

/// Map axis, used to report which coordinate fell off the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid column: {0}. Must be A-M.")]
    InvalidColumn(char),

    #[error("Invalid row: {0}. Must be 1-13.")]
    InvalidRow(u8),

    #[error("Invalid keypad: {0}. Must be 1-9.")]
    InvalidKeypad(u8),

    #[error("Invalid grid scale: {0}. Must be positive.")]
    InvalidGridScale(f64),

    #[error("{axis:?} coordinate {value} is out of map bounds (0-{max}m)")]
    OutOfBounds { axis: Axis, value: f64, max: f64 },

    #[error("Grid reference must be a non-empty string")]
    EmptyReference,

    #[error("Invalid format: {0:?}. Expected: \"D6-7\" or \"D6-kpad7\"")]
    InvalidFormat(String),
}
