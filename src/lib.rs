//! # Trueno-Shapes
//!
//! Shape rasterization for small displays and in-memory framebuffers.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! SIMD-accelerated framebuffer operations, trueno-shapes draws through a
//! narrow [`render::PixelSink`] interface so the same shapes target a display
//! driver, a [`framebuffer::Framebuffer`] or a test double.
//!
//! ## Features
//!
//! - **Integer shapes**: lines, rectangles, borders, round rectangles,
//!   circles, ellipses and triangles, rasterized as coalesced spans
//! - **Anti-aliased shapes**: wedged lines, arcs, pies, round rectangles and
//!   triangles evaluated per pixel with a rectangle fast path
//! - **Transform algebra**: translation, scaling, rotation, affine and
//!   projective mappings with composition, inversion and resampling
//! - **Output**: PNG encoding of framebuffers and any pixel source
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_shapes::prelude::*;
//!
//! let mut fb = Framebuffer::new(64, 64)?;
//! fb.clear(Rgba::WHITE);
//! let bounds = fb.bounds();
//! {
//!     let mut s = Surface::new(&mut fb, bounds);
//!     s.draw_object(&FilledRect::new(4, 4, 20, 12, Rgba::BLUE));
//!     s.draw_object(&SmoothShape::filled_circle(FpPoint::new(40.0, 40.0), 10.0, Rgba::RED));
//! }
//! assert_eq!(fb.get_pixel(10, 8), Some(Rgba::BLUE));
//! assert_eq!(fb.get_pixel(40, 40), Some(Rgba::RED));
//! # Ok::<(), trueno_shapes::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize [`config::RasterConfig`]
//! - `yaml`: Load [`config::RasterConfig`] from YAML files
//! - `gpu`: Enable trueno GPU compute acceleration
//! - `parallel`: Enable trueno parallel processing
//! - `full`: All features enabled
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital
//!   plotter." IBM Systems Journal.
//! - Porter, T., & Duff, T. (1984). "Compositing Digital Images."
//!   SIGGRAPH '84.
//! - Heckbert, P. S. (1989). *Fundamentals of Texture Mapping and Image
//!   Warping*. UC Berkeley.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in rasterization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and compositing.
pub mod color;

/// Rasterization tuning.
pub mod config;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// In-memory framebuffer.
pub mod framebuffer;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Pixel sinks, surfaces and span fillers.
pub mod render;

/// Coordinate-addressed pixel sources and the tiled blit.
pub mod raster;

/// Integer-coordinate shapes.
pub mod shapes;

/// Anti-aliased shapes.
pub mod smooth;

/// 2D transformations and transformed rasters.
pub mod transform;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-shapes operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_shapes::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{BlendingMode, Rgba};
    pub use crate::config::RasterConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{FpPoint, Point, Rect};
    pub use crate::output::PngEncoder;
    pub use crate::raster::{Raster, Rasterizable};
    pub use crate::render::{Drawable, FillMode, PixelSink, Surface};
    pub use crate::shapes::{
        Border, Circle, Ellipse, FilledCircle, FilledRect, FilledRoundRect, FilledTriangle, Line,
        OutlineRect, RoundRect, Triangle,
    };
    pub use crate::smooth::{EndingStyle, SmoothShape};
    pub use crate::transform::{Transformation, TransformedRaster};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
