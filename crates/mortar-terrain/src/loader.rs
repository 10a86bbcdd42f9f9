//! Processed map directory loader and per-map cache.
//!
//! Each map lives in `<maps_root>/<map_name>/` and holds two JSON payloads:
//! `metadata.json` (scale parameters) and the heightmap
//! (`{"resolution": N, "data": [...]}` with N² samples). The map processor
//! ships the heightmap gzipped as `heightmap.json.gz`; a plain
//! `heightmap.json` is read when no compressed file exists.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use crate::error::TerrainError;
use crate::heightmap::HeightmapData;
use crate::map::LoadedMap;
use crate::metadata::MapMetadata;

/// Metadata file name inside a map directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Uncompressed heightmap file name inside a map directory.
pub const HEIGHTMAP_FILE: &str = "heightmap.json";

/// Gzipped heightmap file name, preferred when present.
pub const HEIGHTMAP_GZ_FILE: &str = "heightmap.json.gz";

/// Load and validate a `metadata.json` file.
pub fn load_metadata(path: &Path) -> Result<MapMetadata, TerrainError> {
    let metadata: MapMetadata = read_json(path)?;
    metadata.validate()?;
    Ok(metadata)
}

/// Load a heightmap payload. Files ending in `.gz` are decompressed.
pub fn load_heightmap(path: &Path) -> Result<HeightmapData, TerrainError> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        read_json_gz(path)
    } else {
        read_json(path)
    }
}

/// Heightmap path for a map directory: the gzipped payload if it exists.
pub fn heightmap_path(dir: &Path) -> PathBuf {
    let compressed = dir.join(HEIGHTMAP_GZ_FILE);
    if compressed.is_file() {
        compressed
    } else {
        dir.join(HEIGHTMAP_FILE)
    }
}

/// Load one map from a processed maps directory.
pub fn load_map(maps_root: &Path, name: &str) -> Result<LoadedMap, TerrainError> {
    let dir = maps_root.join(name);
    let metadata = load_metadata(&dir.join(METADATA_FILE))?;
    let heightmap_file = heightmap_path(&dir);
    tracing::debug!("Reading heightmap {}", heightmap_file.display());
    let heightmap = load_heightmap(&heightmap_file)?;

    if let Some(declared) = metadata.heightmap_resolution {
        if declared != heightmap.resolution() {
            tracing::warn!(
                "Map {name}: metadata declares resolution {declared}, heightmap has {}",
                heightmap.resolution()
            );
        }
    }

    tracing::info!(
        "Loaded map {name}: {}×{} heightmap, map_size={}m, height_scale={}m",
        heightmap.resolution(),
        heightmap.resolution(),
        metadata.map_size,
        metadata.height_scale
    );

    Ok(LoadedMap::new(name, metadata, heightmap))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TerrainError> {
    let file = open(path)?;
    parse_json(path, BufReader::new(file))
}

fn read_json_gz<T: DeserializeOwned>(path: &Path) -> Result<T, TerrainError> {
    let file = open(path)?;
    parse_json(path, BufReader::new(GzDecoder::new(BufReader::new(file))))
}

fn open(path: &Path) -> Result<File, TerrainError> {
    File::open(path).map_err(|source| TerrainError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Decompression failures surface as serde_json I/O errors.
fn parse_json<T: DeserializeOwned, R: Read>(path: &Path, reader: R) -> Result<T, TerrainError> {
    serde_json::from_reader(reader).map_err(|source| TerrainError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loaded maps keyed by name.
///
/// Maps are handed out as `Arc`s; clearing or replacing an entry never
/// invalidates a map a caller is still sampling.
#[derive(Debug)]
pub struct MapCache {
    root: PathBuf,
    maps: HashMap<String, Arc<LoadedMap>>,
}

impl MapCache {
    /// Cache over the map directories under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            maps: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cached map, loading it on first use.
    pub fn get_or_load(&mut self, name: &str) -> Result<Arc<LoadedMap>, TerrainError> {
        if let Some(map) = self.maps.get(name) {
            tracing::debug!("Map cache hit: {name}");
            return Ok(Arc::clone(map));
        }

        let map = Arc::new(load_map(&self.root, name)?);
        self.maps.insert(name.to_string(), Arc::clone(&map));
        Ok(map)
    }

    /// Cached map, without loading.
    pub fn get(&self, name: &str) -> Option<Arc<LoadedMap>> {
        self.maps.get(name).cloned()
    }

    /// Insert an already-loaded map, replacing any entry with the same name.
    pub fn insert(&mut self, map: LoadedMap) -> Arc<LoadedMap> {
        let map = Arc::new(map);
        self.maps.insert(map.name().to_string(), Arc::clone(&map));
        map
    }

    /// Evict one map, or every map when `name` is `None`.
    pub fn clear(&mut self, name: Option<&str>) {
        match name {
            Some(name) => {
                self.maps.remove(name);
            }
            None => self.maps.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
