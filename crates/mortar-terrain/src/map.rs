//! LoadedMap: metadata and heightmap for one map, ready for queries.

use std::sync::Arc;

use mortar_core::types::WorldPoint;

use crate::heightmap::HeightmapData;
use crate::metadata::MapMetadata;

/// A map's metadata and shared heightmap.
///
/// The heightmap sits behind an `Arc`, so clones are cheap and readers keep
/// their samples alive even after the map is evicted from a cache.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    name: String,
    metadata: MapMetadata,
    heightmap: Arc<HeightmapData>,
}

impl LoadedMap {
    pub fn new(name: impl Into<String>, metadata: MapMetadata, heightmap: HeightmapData) -> Self {
        Self {
            name: name.into(),
            metadata,
            heightmap: Arc::new(heightmap),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    pub fn heightmap(&self) -> &Arc<HeightmapData> {
        &self.heightmap
    }

    /// Map edge length (meters).
    pub fn map_size(&self) -> f64 {
        self.metadata.map_size
    }

    /// Meters per grid square.
    pub fn grid_scale(&self) -> f64 {
        self.metadata.grid_scale()
    }

    /// Terrain elevation (meters) at a map-space position, clamped onto the map.
    pub fn elevation_at(&self, x: f64, y: f64) -> f64 {
        self.heightmap.elevation_at(
            x,
            y,
            self.metadata.height_scale,
            self.metadata.map_size,
        )
    }

    /// Map-space point at ground level.
    pub fn point_at(&self, x: f64, y: f64) -> WorldPoint {
        WorldPoint::new(x, y, self.elevation_at(x, y))
    }
}
