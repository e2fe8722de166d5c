//! Raster resampling.
//!
//! Nearest-neighbor is the pixel-art kernel: it never invents colors, so a
//! paletted image stays paletted. The area (box) kernel averages every source
//! pixel a destination pixel covers and is only used for smooth pyramid
//! levels.

use super::Raster;
use crate::error::RasterError;

impl Raster {
    fn check_resample(&self, width: u32, height: u32) -> Result<(), RasterError> {
        if self.is_empty() || width == 0 || height == 0 {
            return Err(RasterError::ZeroArea {
                from_width: self.width,
                from_height: self.height,
                to_width: width,
                to_height: height,
            });
        }
        Ok(())
    }

    /// Nearest-neighbor resample to `width` x `height`.
    ///
    /// Destination pixel `(x, y)` takes source pixel
    /// `(x * src_w / width, y * src_h / height)`.
    pub fn resize_nearest(&self, width: u32, height: u32) -> Result<Raster, RasterError> {
        self.check_resample(width, height)?;
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let ch = self.channels.count();
        let src_x: Vec<usize> = (0..width as u64)
            .map(|x| (x * self.width as u64 / width as u64) as usize * ch)
            .collect();

        let mut data = Vec::with_capacity(width as usize * height as usize * ch);
        for y in 0..height as u64 {
            let sy = (y * self.height as u64 / height as u64) as usize;
            let row = &self.data[sy * self.stride()..(sy + 1) * self.stride()];
            for &sx in &src_x {
                data.extend_from_slice(&row[sx..sx + ch]);
            }
        }

        Ok(Raster {
            width,
            height,
            channels: self.channels,
            data,
        })
    }

    /// Box-filter resample: each destination pixel is the rounded mean of
    /// the source pixels it covers. All channels, including alpha, are
    /// averaged.
    pub fn resize_area(&self, width: u32, height: u32) -> Result<Raster, RasterError> {
        self.check_resample(width, height)?;
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let ch = self.channels.count();
        let span = |d: u64, src: u64, dst: u64| {
            let start = d * src / dst;
            let end = ((d + 1) * src).div_ceil(dst).min(src).max(start + 1);
            (start as usize, end as usize)
        };

        let mut data = Vec::with_capacity(width as usize * height as usize * ch);
        let mut acc = vec![0u64; ch];
        for dy in 0..height as u64 {
            let (y0, y1) = span(dy, self.height as u64, height as u64);
            for dx in 0..width as u64 {
                let (x0, x1) = span(dx, self.width as u64, width as u64);
                acc.iter_mut().for_each(|a| *a = 0);
                for sy in y0..y1 {
                    let row = &self.data[sy * self.stride()..(sy + 1) * self.stride()];
                    for px in row[x0 * ch..x1 * ch].chunks_exact(ch) {
                        for (a, &v) in acc.iter_mut().zip(px) {
                            *a += v as u64;
                        }
                    }
                }
                let count = ((y1 - y0) * (x1 - x0)) as u64;
                data.extend(acc.iter().map(|&a| ((a + count / 2) / count) as u8));
            }
        }

        Ok(Raster {
            width,
            height,
            channels: self.channels,
            data,
        })
    }

    /// Shrink by an integer factor with nearest-neighbor sampling.
    ///
    /// The result is `max(1, w / factor)` x `max(1, h / factor)`. A factor
    /// of 0 or 1 returns a copy.
    pub fn downscale(&self, factor: u32) -> Result<Raster, RasterError> {
        if factor <= 1 {
            return Ok(self.clone());
        }
        let width = (self.width / factor).max(1);
        let height = (self.height / factor).max(1);
        self.resize_nearest(width, height)
    }
}
