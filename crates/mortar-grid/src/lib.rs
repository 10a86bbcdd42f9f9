//! Grid reference system for the mortar calculator.
//!
//! Parsing and formatting of the 13×13 column-row-keypad notation,
//! and conversion between grid references and map-space coordinates.

pub use mortar_core as core;

pub mod error;
pub mod reference;
pub mod transform;

// Re-export key types for convenience.
pub use error::GridError;
pub use reference::{
    format_grid_reference, parse_grid_reference, validate_grid_reference, GridReference,
};
pub use transform::{
    calculate_grid_scale, grid_ref_to_xy, grid_to_xy, is_valid_coordinate,
    is_within_map_bounds, keypad_offset, xy_to_grid,
};
