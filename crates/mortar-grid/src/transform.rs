//! Conversion between grid references and map-space coordinates.
//!
//! Map space has its origin at the northwest corner with x = East and
//! y = South, so row 1 starts at y = 0. Every map is divided into 13×13
//! squares of `grid_scale` meters.

use mortar_core::constants::{COORDINATE_TOLERANCE, GRID_COLUMNS, GRID_SQUARES};
use mortar_core::types::WorldPoint;

use crate::error::{Axis, GridError};
use crate::reference::{column_index, parse_grid_reference, GridReference};

/// Keypad sub-cell rows, north to south.
const KEYPAD_LAYOUT: [[u8; 3]; 3] = [[7, 8, 9], [4, 5, 6], [1, 2, 3]];

/// Fractional offset of a keypad position inside its square, per axis.
const KEYPAD_FRACTIONS: [f64; 3] = [0.0, 0.5, 1.0];

/// Meters per grid square for a map of the given edge length.
pub fn calculate_grid_scale(map_size: f64) -> f64 {
    map_size / GRID_SQUARES as f64
}

/// Offset (meters) of a keypad position from its square's northwest corner.
pub fn keypad_offset(keypad: u8, grid_scale: f64) -> Result<(f64, f64), GridError> {
    let (col, row) = keypad_cell(keypad)?;
    Ok((
        KEYPAD_FRACTIONS[col] * grid_scale,
        KEYPAD_FRACTIONS[row] * grid_scale,
    ))
}

/// Position of a grid reference in map space (z = 0).
pub fn grid_to_xy(
    column: char,
    row: u8,
    keypad: u8,
    grid_scale: f64,
) -> Result<WorldPoint, GridError> {
    let column_idx = column_index(column)?;
    if !(1..=GRID_SQUARES).contains(&row) {
        return Err(GridError::InvalidRow(row));
    }
    if !(1..=9).contains(&keypad) {
        return Err(GridError::InvalidKeypad(keypad));
    }
    check_scale(grid_scale)?;

    // Northwest corner of the square
    let base_x = column_idx as f64 * grid_scale;
    let base_y = (row - 1) as f64 * grid_scale;

    let (offset_x, offset_y) = keypad_offset(keypad, grid_scale)?;

    Ok(WorldPoint::flat(base_x + offset_x, base_y + offset_y))
}

/// Parse a reference and convert it in one step.
///
/// Returns `Ok(None)` when the text does not parse.
pub fn grid_ref_to_xy(text: &str, grid_scale: f64) -> Result<Option<WorldPoint>, GridError> {
    match parse_grid_reference(text) {
        Some(gr) => grid_to_xy(gr.column, gr.row, gr.keypad, grid_scale).map(Some),
        None => Ok(None),
    }
}

/// Grid reference of the keypad zone containing a map-space point.
///
/// Points off the map are an error, never clamped. Each square is split
/// into thirds per axis, so many points share one reference.
pub fn xy_to_grid(x: f64, y: f64, grid_scale: f64) -> Result<GridReference, GridError> {
    check_scale(grid_scale)?;

    let col_f = x / grid_scale;
    let row_f = y / grid_scale;
    let max = GRID_SQUARES as f64 * grid_scale;
    let squares = GRID_SQUARES as f64;

    // Negated comparisons also reject NaN.
    if !(col_f.floor() >= 0.0 && col_f.floor() < squares) {
        return Err(GridError::OutOfBounds {
            axis: Axis::X,
            value: x,
            max,
        });
    }
    if !(row_f.floor() >= 0.0 && row_f.floor() < squares) {
        return Err(GridError::OutOfBounds {
            axis: Axis::Y,
            value: y,
            max,
        });
    }

    let column_idx = col_f.floor() as usize;
    let row_idx = row_f.floor() as usize;

    let keypad_col = third(col_f.fract());
    let keypad_row = third(row_f.fract());

    Ok(GridReference {
        column: GRID_COLUMNS[column_idx],
        row: row_idx as u8 + 1,
        keypad: KEYPAD_LAYOUT[keypad_row][keypad_col],
    })
}

/// Whether a point lies on the map (edges inclusive).
pub fn is_within_map_bounds(x: f64, y: f64, map_size: f64) -> bool {
    (0.0..=map_size).contains(&x) && (0.0..=map_size).contains(&y)
}

/// Like [`is_within_map_bounds`], allowing for small floating-point overshoot.
pub fn is_valid_coordinate(x: f64, y: f64, map_size: f64) -> bool {
    let range = -COORDINATE_TOLERANCE..=map_size + COORDINATE_TOLERANCE;
    range.contains(&x) && range.contains(&y)
}

fn check_scale(grid_scale: f64) -> Result<(), GridError> {
    if grid_scale > 0.0 && grid_scale.is_finite() {
        Ok(())
    } else {
        Err(GridError::InvalidGridScale(grid_scale))
    }
}

/// Keypad digit to (column, row) in the 3×3 layout.
fn keypad_cell(keypad: u8) -> Result<(usize, usize), GridError> {
    for (row, digits) in KEYPAD_LAYOUT.iter().enumerate() {
        if let Some(col) = digits.iter().position(|&d| d == keypad) {
            return Ok((col, row));
        }
    }
    Err(GridError::InvalidKeypad(keypad))
}

/// Classify a fraction in [0, 1] into thirds.
fn third(fraction: f64) -> usize {
    if fraction < 1.0 / 3.0 {
        0
    } else if fraction < 2.0 / 3.0 {
        1
    } else {
        2
    }
}
