use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid heightmap resolution: {0}. Must be at least 2.")]
    InvalidResolution(u32),

    #[error("Heightmap has {actual} samples, expected {expected}")]
    SampleCount { expected: usize, actual: usize },
}
