//! Dithering options.

use super::{Dither, DitherMethod, FloydSteinberg, MatrixSize, OrderedDither};
use crate::palette::Palette;
use crate::raster::Raster;

/// Which algorithm to run and how hard to push it.
///
/// `matrix` and `strength` only affect ordered dithering; error diffusion
/// has no tunables.
///
/// ```
/// use pixel_art::{DitherMethod, DitherOptions, MatrixSize};
///
/// let options = DitherOptions::new()
///     .method(DitherMethod::Ordered)
///     .matrix(MatrixSize::Eight)
///     .strength(16.0);
/// assert_eq!(options.strength, 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    pub method: DitherMethod,
    pub matrix: MatrixSize,
    /// Bias amplitude in channel units.
    ///
    /// Default: `32.0`
    pub strength: f32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            method: DitherMethod::Ordered,
            matrix: MatrixSize::Four,
            strength: 32.0,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn matrix(mut self, matrix: MatrixSize) -> Self {
        self.matrix = matrix;
        self
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Dither `raster` against `palette` with the selected algorithm.
    pub fn apply(&self, raster: &Raster, palette: &Palette) -> Raster {
        match self.method {
            DitherMethod::Ordered => {
                OrderedDither::new(self.matrix, self.strength).dither(raster, palette)
            }
            DitherMethod::ErrorDiffusion => FloydSteinberg.dither(raster, palette),
        }
    }
}
