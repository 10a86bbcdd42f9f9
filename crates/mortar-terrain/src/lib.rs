//! Terrain system for the mortar calculator.
//!
//! Heightmap sampling, map metadata, and loading of processed
//! map directories.

pub use mortar_core as core;

pub mod error;
pub mod heightmap;
pub mod loader;
pub mod map;
pub mod metadata;

// Re-export key types for convenience.
pub use error::TerrainError;
pub use heightmap::{
    bilinear_interpolation, get_elevation, world_to_pixel, HeightmapData, HeightmapStats,
};
pub use loader::{heightmap_path, load_heightmap, load_map, load_metadata, MapCache};
pub use map::LoadedMap;
pub use metadata::MapMetadata;
