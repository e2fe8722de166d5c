//! Outline detection and drawing.
//!
//! Two detectors produce an [`EdgeMask`]:
//!
//! - [`boundary_mask`]: marks opaque pixels whose 4-neighbors differ in
//!   color by more than a threshold or are transparent. Used with
//!   [`darken_boundaries`], which shades those pixels in place.
//! - [`sobel_edges`]: gradient magnitude on luminance. Used with
//!   [`overlay_outline`], which paints a fixed ink color.
//!
//! Both read the unmodified input; the mask is complete before any pixel
//! is written.

mod boundary;
mod sobel;

use std::fmt;
use std::str::FromStr;

pub use boundary::{boundary_mask, darken_boundaries};
pub use sobel::{overlay_outline, sobel_edges};

use crate::color::Rgb;
use crate::error::{ConfigError, RasterError};
use crate::raster::Raster;

/// Channel units subtracted from boundary pixels.
pub const DEFAULT_DARKEN: u8 = 48;

/// Ink color for the Sobel overlay.
pub const OUTLINE_COLOR: Rgb = Rgb::new(38, 31, 26);

/// Minimum alpha for a pixel to count as opaque.
pub const OPAQUE_ALPHA: u8 = 128;

/// Outline detector selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineStyle {
    /// Color-boundary darkening.
    #[default]
    Boundary,
    /// Sobel gradient with a flat ink overlay.
    Sobel,
}

impl OutlineStyle {
    /// Detect and draw outlines on `raster` in one step.
    pub fn apply(self, raster: &Raster, threshold: f32) -> Result<Raster, RasterError> {
        match self {
            OutlineStyle::Boundary => Ok(darken_boundaries(raster, threshold, DEFAULT_DARKEN)),
            OutlineStyle::Sobel => {
                let mask = sobel_edges(raster, threshold);
                overlay_outline(raster, &mask, OUTLINE_COLOR)
            }
        }
    }
}

impl fmt::Display for OutlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlineStyle::Boundary => "boundary",
            OutlineStyle::Sobel => "sobel",
        })
    }
}

impl FromStr for OutlineStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boundary" => Ok(OutlineStyle::Boundary),
            "sobel" => Ok(OutlineStyle::Sobel),
            other => Err(ConfigError::UnknownOutlineStyle(other.to_string())),
        }
    }
}

/// One flag per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl EdgeMask {
    /// All-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.bits[y as usize * self.width as usize + x as usize] = value;
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Row-major flags.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub(crate) fn check_matches(&self, raster: &Raster) -> Result<(), RasterError> {
        if self.width != raster.width() || self.height != raster.height() {
            return Err(RasterError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: raster.width(),
                right_height: raster.height(),
            });
        }
        Ok(())
    }
}
