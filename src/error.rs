//! Error types for trueno-shapes operations.
//!
//! The geometry core never fails: degenerate shapes draw nothing and
//! out-of-range values are clamped. Errors only surface from transform
//! inversion, framebuffer allocation, PNG output and configuration loading.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-shapes operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or raster.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A transformation has no inverse.
    #[error("Singular transformation (determinant {determinant})")]
    SingularTransform {
        /// Determinant of the linear part, zero or non-finite.
        determinant: f32,
    },

    /// Configuration file could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Configuration value is out of its accepted domain.
    #[error("Invalid config value for {field}: {reason}")]
    ConfigInvalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
