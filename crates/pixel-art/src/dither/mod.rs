//! Palette-constrained dithering.
//!
//! Two algorithms quantize a raster to a [`Palette`] while simulating the
//! colors in between:
//!
//! - **Ordered** ([`OrderedDither`]): each pixel is biased by a threshold
//!   from a Bayer matrix tiled over the image, then matched to the nearest
//!   palette color. Pixels are independent, so rows are processed in
//!   parallel and the result does not depend on traversal order.
//! - **Error diffusion** ([`FloydSteinberg`]): the quantization error of each
//!   pixel is pushed onto its unvisited neighbors. This is inherently
//!   sequential in scan order and runs single-threaded.
//!
//! | Aspect | Ordered | Error diffusion |
//! |--------|---------|-----------------|
//! | Parallelizable | Yes (per-pixel) | No (neighbor dependencies) |
//! | Pattern | Regular cross-hatch | Organic |
//! | Best for | Flat map regions, tile seams | Gradients |
//!
//! Both algorithms leave the alpha channel untouched.

mod floyd_steinberg;
mod matrix;
mod options;
mod ordered;

use std::fmt;
use std::str::FromStr;

pub use floyd_steinberg::FloydSteinberg;
pub use matrix::{DitherMatrix, MatrixSize};
pub use options::DitherOptions;
pub use ordered::OrderedDither;

use crate::error::ConfigError;
use crate::palette::Palette;
use crate::raster::Raster;

/// Trait for palette-constrained dithering algorithms.
///
/// Implementors return a new raster of the same geometry whose RGB values
/// are all members of `palette` and whose alpha equals the input alpha.
pub trait Dither {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Raster;
}

/// Dither algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMethod {
    /// Bayer-matrix threshold dithering.
    #[default]
    Ordered,
    /// Floyd-Steinberg error diffusion.
    ErrorDiffusion,
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DitherMethod::Ordered => "ordered",
            DitherMethod::ErrorDiffusion => "diffusion",
        })
    }
}

impl FromStr for DitherMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" | "bayer" => Ok(DitherMethod::Ordered),
            "diffusion" | "error-diffusion" | "floyd-steinberg" => {
                Ok(DitherMethod::ErrorDiffusion)
            }
            other => Err(ConfigError::UnknownDitherMethod(other.to_string())),
        }
    }
}
