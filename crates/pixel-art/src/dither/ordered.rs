//! Bayer ordered dithering.

use rayon::prelude::*;

use super::{Dither, DitherMatrix, MatrixSize};
use crate::color::Rgb;
use crate::palette::Palette;
use crate::raster::Raster;

/// Ordered dithering with a tiled Bayer matrix.
///
/// For every pixel the matrix threshold `t` at `(x mod N, y mod N)` becomes
/// a bias of `(t - 0.5) * strength` channel units, added to R, G and B
/// before the nearest palette lookup. The bias is symmetric around zero, so
/// strength 0 degrades to plain nearest-color reduction.
///
/// Each output pixel depends only on its own input and position, which lets
/// rows run in parallel and keeps tile borders seamless when neighboring
/// tiles are dithered independently.
#[derive(Debug, Clone)]
pub struct OrderedDither {
    matrix: DitherMatrix,
    strength: f32,
}

impl OrderedDither {
    pub fn new(size: MatrixSize, strength: f32) -> Self {
        Self {
            matrix: DitherMatrix::new(size),
            strength,
        }
    }

    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    #[inline]
    pub fn matrix(&self) -> &DitherMatrix {
        &self.matrix
    }
}

impl Default for OrderedDither {
    fn default() -> Self {
        Self::new(MatrixSize::Four, 32.0)
    }
}

impl Dither for OrderedDither {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Raster {
        if raster.is_empty() {
            return raster.clone();
        }

        let ch = raster.channels().count();
        let stride = raster.stride();
        let mut data = raster.data().to_vec();

        data.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(ch).enumerate() {
                    let bias = (self.matrix.threshold(x, y) - 0.5) * self.strength;
                    let biased = Rgb::from_f32_clamped(
                        px[0] as f32 + bias,
                        px[1] as f32 + bias,
                        px[2] as f32 + bias,
                    );
                    palette.find_nearest(biased).write_to(px);
                }
            });

        raster.with_data(data)
    }
}
