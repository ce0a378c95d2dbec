//! Raster configuration.
//!
//! Tunes batching and tiling of the drawing pipeline. Every value has an
//! upper bound fixed by the stack buffers used in the hot paths; larger
//! values are clamped with a warning.
//!
//! With the `yaml` feature, configurations load from YAML files:
//!
//! ```yaml
//! fill_batch: 16
//! tile_size: 4
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "yaml")]
use crate::error::{Error, Result};
#[cfg(feature = "yaml")]
use std::path::Path;

/// Capacity of the stack buffers used by fillers and blits.
pub const MAX_BATCH: usize = 64;

/// Largest supported blit tile edge.
pub const MAX_TILE_SIZE: u16 = 8;

/// Batching and tiling parameters for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RasterConfig {
    /// Rectangles buffered before each `fill_rects` call.
    #[cfg_attr(feature = "serde", serde(default = "default_fill_batch"))]
    pub fill_batch: usize,

    /// Pixels buffered before each `write_pixels` call.
    #[cfg_attr(feature = "serde", serde(default = "default_pixel_batch"))]
    pub pixel_batch: usize,

    /// Edge length of the tiles a large raster blit is split into.
    #[cfg_attr(feature = "serde", serde(default = "default_tile_size"))]
    pub tile_size: u16,

    /// Clip areas up to this many pixels are blitted as a single block.
    #[cfg_attr(feature = "serde", serde(default = "default_small_area"))]
    pub small_area: u32,
}

fn default_fill_batch() -> usize {
    32
}
fn default_pixel_batch() -> usize {
    MAX_BATCH
}
fn default_tile_size() -> u16 {
    MAX_TILE_SIZE
}
fn default_small_area() -> u32 {
    MAX_BATCH as u32
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            fill_batch: default_fill_batch(),
            pixel_batch: default_pixel_batch(),
            tile_size: default_tile_size(),
            small_area: default_small_area(),
        }
    }
}

impl RasterConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rectangle batch size.
    #[must_use]
    pub fn with_fill_batch(mut self, fill_batch: usize) -> Self {
        self.fill_batch = fill_batch;
        self.sanitized()
    }

    /// Sets the pixel batch size.
    #[must_use]
    pub fn with_pixel_batch(mut self, pixel_batch: usize) -> Self {
        self.pixel_batch = pixel_batch;
        self.sanitized()
    }

    /// Sets the blit tile edge.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: u16) -> Self {
        self.tile_size = tile_size;
        self.sanitized()
    }

    /// Returns a copy with every value clamped into its supported range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let fill_batch = clamp_logged("fill_batch", self.fill_batch, 1, MAX_BATCH);
        let pixel_batch = clamp_logged("pixel_batch", self.pixel_batch, 1, MAX_BATCH);
        let tile_size = clamp_logged(
            "tile_size",
            usize::from(self.tile_size),
            1,
            usize::from(MAX_TILE_SIZE),
        ) as u16;
        let small_area =
            clamp_logged("small_area", self.small_area as usize, 1, MAX_BATCH) as u32;
        Self {
            fill_batch,
            pixel_batch,
            tile_size,
            small_area,
        }
    }

    /// Parses configuration from a YAML string.
    ///
    /// Zero values are rejected; values above the buffer capacity are clamped.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config.sanitized())
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads configuration with fallback to defaults.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    #[cfg(feature = "yaml")]
    fn validate(&self) -> Result<()> {
        let zero = |field: &'static str| Error::ConfigInvalid {
            field,
            reason: "must be at least 1".to_string(),
        };
        if self.fill_batch == 0 {
            return Err(zero("fill_batch"));
        }
        if self.pixel_batch == 0 {
            return Err(zero("pixel_batch"));
        }
        if self.tile_size == 0 {
            return Err(zero("tile_size"));
        }
        if self.small_area == 0 {
            return Err(zero("small_area"));
        }
        Ok(())
    }
}

fn clamp_logged(field: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("raster config {field}={value} out of range, using {clamped}");
    }
    clamped
}
