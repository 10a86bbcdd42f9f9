//! HeightmapData: decoded heightmap with elevation queries.
//!
//! A heightmap is a square grid of raw 16-bit samples. Its resolution
//! includes a one-sample border, so `resolution - 1` sample intervals span
//! exactly one map edge. Raw values 0–65535 scale linearly to
//! `[0, height_scale]` meters.

use serde::{Deserialize, Serialize};

use mortar_core::constants::HEIGHTMAP_MAX_SAMPLE;

use crate::error::TerrainError;

/// Heightmap payload as stored in `heightmap.json(.gz)`.
#[derive(Debug, Deserialize)]
struct HeightmapPayload {
    resolution: u32,
    data: Vec<u16>,
}

/// Loaded heightmap samples, row-major (north-to-south, west-to-east).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HeightmapPayload")]
pub struct HeightmapData {
    resolution: u32,
    data: Vec<u16>,
}

impl TryFrom<HeightmapPayload> for HeightmapData {
    type Error = TerrainError;

    fn try_from(payload: HeightmapPayload) -> Result<Self, Self::Error> {
        Self::new(payload.resolution, payload.data)
    }
}

/// Summary statistics over raw sample values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeightmapStats {
    pub min: u16,
    pub max: u16,
    pub mean: f64,
}

impl HeightmapData {
    /// Create a heightmap, checking that `data` holds `resolution²` samples.
    pub fn new(resolution: u32, data: Vec<u16>) -> Result<Self, TerrainError> {
        if resolution < 2 {
            return Err(TerrainError::InvalidResolution(resolution));
        }
        let expected = resolution as usize * resolution as usize;
        if data.len() != expected {
            return Err(TerrainError::SampleCount {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { resolution, data })
    }

    /// Samples per edge (including the border sample).
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Raw samples, row-major.
    pub fn samples(&self) -> &[u16] {
        &self.data
    }

    /// Raw sample at integer pixel coordinates, if in range.
    pub fn sample(&self, pixel_x: usize, pixel_y: usize) -> Option<u16> {
        let width = self.resolution as usize;
        if pixel_x >= width || pixel_y >= width {
            return None;
        }
        self.data.get(pixel_y * width + pixel_x).copied()
    }

    /// Interpolated raw value at fractional pixel coordinates.
    pub fn interpolate(&self, pixel_x: f64, pixel_y: f64) -> f64 {
        let width = self.resolution as usize;
        bilinear_interpolation(&self.data, pixel_x, pixel_y, width, width)
    }

    /// Elevation in meters at a map-space position. Off-map positions are clamped.
    pub fn elevation_at(&self, x: f64, y: f64, height_scale: f64, map_size: f64) -> f64 {
        get_elevation(x, y, &self.data, height_scale, map_size, self.resolution)
    }

    /// Min, max and mean raw sample values.
    pub fn stats(&self) -> HeightmapStats {
        let Some(&first) = self.data.first() else {
            return HeightmapStats::default();
        };

        let mut min = first;
        let mut max = first;
        let mut sum = 0u64;
        for &value in &self.data {
            min = min.min(value);
            max = max.max(value);
            sum += value as u64;
        }

        HeightmapStats {
            min,
            max,
            mean: sum as f64 / self.data.len() as f64,
        }
    }
}

/// Convert map-space meters to fractional pixel coordinates.
pub fn world_to_pixel(x: f64, y: f64, map_size: f64, resolution: u32) -> (f64, f64) {
    // The +1 border sample means (resolution - 1) pixels per map edge.
    let pixels_per_meter = (resolution as f64 - 1.0) / map_size;
    (x * pixels_per_meter, y * pixels_per_meter)
}

/// Bilinear interpolation at fractional pixel coordinates.
///
/// Edge pixels clamp instead of wrapping. Samples are widened to `f64`
/// before any arithmetic, so the result does not depend on the storage
/// type. Reads past the end of `samples` yield 0.
pub fn bilinear_interpolation<T>(
    samples: &[T],
    pixel_x: f64,
    pixel_y: f64,
    width: usize,
    height: usize,
) -> f64
where
    T: Copy + Into<f64>,
{
    let x0 = pixel_x.floor() as usize;
    let y0 = pixel_y.floor() as usize;
    let x1 = (x0 + 1).min(width.saturating_sub(1));
    let y1 = (y0 + 1).min(height.saturating_sub(1));

    let fx = pixel_x - x0 as f64;
    let fy = pixel_y - y0 as f64;

    let sample = |x: usize, y: usize| -> f64 {
        samples.get(y * width + x).copied().map_or(0.0, Into::into)
    };

    let top_left = sample(x0, y0);
    let top_right = sample(x1, y0);
    let bottom_left = sample(x0, y1);
    let bottom_right = sample(x1, y1);

    let top = top_left + fx * (top_right - top_left);
    let bottom = bottom_left + fx * (bottom_right - bottom_left);
    top + fy * (bottom - top)
}

/// Elevation in meters at a map-space position.
///
/// Positions outside `[0, map_size]` are clamped onto the map rather than
/// rejected; marker placement routinely lands a little off the edge.
/// Never panics, even for a NaN or negative `map_size`.
pub fn get_elevation<T>(
    x: f64,
    y: f64,
    samples: &[T],
    height_scale: f64,
    map_size: f64,
    resolution: u32,
) -> f64
where
    T: Copy + Into<f64>,
{
    let (x, y) = if !(0.0..=map_size).contains(&x) || !(0.0..=map_size).contains(&y) {
        tracing::warn!("Coordinates ({x}, {y}) outside map bounds (0-{map_size}), clamping");
        (x.max(0.0).min(map_size), y.max(0.0).min(map_size))
    } else {
        (x, y)
    };

    let (pixel_x, pixel_y) = world_to_pixel(x, y, map_size, resolution);
    let width = resolution as usize;
    let raw = bilinear_interpolation(samples, pixel_x, pixel_y, width, width);

    raw / HEIGHTMAP_MAX_SAMPLE * height_scale
}
