//! Raster buffer type.
//!
//! A [`Raster`] is a flat, row-major byte buffer plus its width, height and
//! channel count. The three always travel together; the constructor rejects
//! a buffer whose length does not match them.

mod resize;

use std::fmt;

use crate::color::Rgb;
use crate::error::RasterError;

/// Bytes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

impl TryFrom<usize> for Channels {
    type Error = RasterError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(RasterError::InvalidChannels(other)),
        }
    }
}

/// Width x height pixels at 3 or 4 bytes each, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Raster {
    /// Wrap a buffer, checking that its length matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A raster where every pixel is `color` (alpha 255 for RGBA).
    pub fn filled(width: u32, height: u32, channels: Channels, color: Rgb) -> Self {
        let pixel: &[u8] = match channels {
            Channels::Rgb => &[color.r, color.g, color.b],
            Channels::Rgba => &[color.r, color.g, color.b, 255],
        };
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Same geometry as `self`, new pixel bytes. Length is the caller's
    /// responsibility.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
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
    pub fn channels(&self) -> Channels {
        self.channels
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// The raw bytes of one pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels.count()]
    }

    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_slice(self.pixel(x, y))
    }

    /// Alpha of one pixel; always 255 for RGB rasters.
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        match self.channels {
            Channels::Rgb => 255,
            Channels::Rgba => self.data[self.offset(x, y) + 3],
        }
    }

    /// Copy out a sub-rectangle.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Raster, RasterError> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);
        if !fits_x || !fits_y {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width,
                height,
                raster_width: self.width,
                raster_height: self.height,
            });
        }

        let ch = self.channels.count();
        let row_len = width as usize * ch;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y..y + height {
            let start = self.offset(x, row);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(Raster {
            width,
            height,
            channels: self.channels,
            data,
        })
    }

    /// Copy `src` onto `self` with its top-left corner at `(x, y)`.
    ///
    /// Pixels are replaced, not blended. Whatever falls outside `self` is
    /// clipped. Channel layouts are converted: RGB sources become opaque,
    /// RGBA sources onto an RGB target lose their alpha.
    pub fn blit(&mut self, src: &Raster, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let copy_w = src.width.min(self.width - x);
        let copy_h = src.height.min(self.height - y);
        let dst_ch = self.channels.count();
        let src_ch = src.channels.count();

        for row in 0..copy_h {
            let dst_start = self.offset(x, y + row);
            let src_start = src.offset(0, row);
            if dst_ch == src_ch {
                let len = copy_w as usize * dst_ch;
                self.data[dst_start..dst_start + len]
                    .copy_from_slice(&src.data[src_start..src_start + len]);
                continue;
            }
            for col in 0..copy_w as usize {
                let s = &src.data[src_start + col * src_ch..src_start + (col + 1) * src_ch];
                let d = &mut self.data[dst_start + col * dst_ch..dst_start + (col + 1) * dst_ch];
                d[..3].copy_from_slice(&s[..3]);
                if dst_ch == 4 {
                    d[3] = 255;
                }
            }
        }
    }

    /// Apply `f` to the RGB part of every pixel, leaving alpha untouched.
    pub fn map_rgb(&self, mut f: impl FnMut(Rgb) -> Rgb) -> Raster {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(self.channels.count()) {
            f(Rgb::from_slice(px)).write_to(px);
        }
        self.with_data(data)
    }
}
