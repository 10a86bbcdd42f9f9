//! Core types and definitions for the mortar calculator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! world points, physics constants, solution statuses and the firing
//! solution record. It has no dependency on map loading or any front end.

pub mod constants;
pub mod enums;
pub mod solution;
pub mod types;
