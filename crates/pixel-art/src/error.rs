//! Error types shared across the pixel pipeline.
//!
//! [`PixelArtError`] wraps every error type of the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::palette::{PaletteError, PaletteSize};

/// Raster construction or geometry error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Buffer length does not match `width * height * channels`
    #[error("raster buffer has {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Unsupported channel count (only 3 and 4 are valid)
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    InvalidChannels(usize),

    /// A resample target or source has zero area
    #[error("cannot resample {from_width}x{from_height} to {to_width}x{to_height}")]
    ZeroArea {
        from_width: u32,
        from_height: u32,
        to_width: u32,
        to_height: u32,
    },

    /// Requested region lies (partly) outside the raster
    #[error("region {width}x{height}+{x}+{y} is outside the {raster_width}x{raster_height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        raster_width: u32,
        raster_height: u32,
    },

    /// Two buffers that must share dimensions do not
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },
}

/// Invalid processing option value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("downscale factor must be at least 1, got {0}")]
    InvalidDownscale(u32),

    #[error("dither strength must be within 0..=255, got {0}")]
    InvalidStrength(f32),

    #[error("outline threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f32),

    #[error("posterize levels must be within 2..=255, got {0}")]
    InvalidPosterize(u32),

    /// Posterization replaces the palette pass, so it needs `palette: full`
    #[error("posterize requires the full palette, got palette {0}")]
    PosterizeWithPalette(PaletteSize),

    #[error("unsupported dither matrix size {0:?} (expected 4 or 8)")]
    InvalidMatrixSize(String),

    #[error("unknown dither method {0:?} (expected ordered or diffusion)")]
    UnknownDitherMethod(String),

    #[error("unknown outline style {0:?} (expected boundary or sobel)")]
    UnknownOutlineStyle(String),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Unified error type for the pixel-art public API.
#[derive(Debug, Error)]
pub enum PixelArtError {
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = RasterError::LengthMismatch {
            expected: 12,
            actual: 10,
        };
        assert_eq!(err.to_string(), "raster buffer has 10 bytes, expected 12");
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = RasterError::OutOfBounds {
            x: 4,
            y: 0,
            width: 5,
            height: 5,
            raster_width: 8,
            raster_height: 8,
        };
        assert_eq!(
            err.to_string(),
            "region 5x5+4+0 is outside the 8x8 raster"
        );
    }

    #[test]
    fn test_config_error_wraps_palette_error() {
        let err: ConfigError = PaletteError::InvalidSize("40".to_string()).into();
        assert_eq!(
            err.to_string(),
            "unsupported palette size \"40\" (expected 32, 48, 64 or full)"
        );
    }

    #[test]
    fn test_pixel_art_error_from_raster_error() {
        let err: PixelArtError = RasterError::InvalidChannels(2).into();
        match err {
            PixelArtError::Raster(RasterError::InvalidChannels(2)) => {}
            other => panic!("Expected Raster variant, got {other:?}"),
        }
    }
}
