//! Per-tile processing pipeline.
//!
//! [`TileProcessor`] chains the individual transforms of this crate in a
//! fixed order for one [`ProcessConfig`]. It is immutable after
//! construction and shareable across threads.

use std::fmt;

use crate::dither::{DitherMethod, DitherOptions, MatrixSize};
use crate::edge::OutlineStyle;
use crate::error::{ConfigError, PixelArtError};
use crate::palette::{get_palette, posterize, reduce_colors, Palette, PaletteSize};
use crate::raster::Raster;

/// Complete, explicit option bundle for one processing run.
///
/// The default is the "classic" look: half resolution, boundary outlines,
/// 4x4 ordered dither at strength 32, 48 colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    /// Integer shrink factor before stylizing; 1 keeps full resolution.
    pub downscale: u32,
    pub outline: bool,
    pub outline_style: OutlineStyle,
    /// Boundary: summed RGB difference. Sobel: gradient magnitude.
    pub outline_threshold: f32,
    pub dither: bool,
    pub dither_method: DitherMethod,
    /// Ordered dither bias amplitude in channel units.
    pub dither_strength: f32,
    pub dither_matrix: MatrixSize,
    pub palette: PaletteSize,
    /// Color levels per channel, only honored with the full palette.
    pub posterize: Option<u32>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            downscale: 2,
            outline: true,
            outline_style: OutlineStyle::Boundary,
            outline_threshold: 48.0,
            dither: true,
            dither_method: DitherMethod::Ordered,
            dither_strength: 32.0,
            dither_matrix: MatrixSize::Four,
            palette: PaletteSize::Colors48,
            posterize: None,
        }
    }
}

impl ProcessConfig {
    /// Every stage disabled; processing returns an identical copy.
    pub fn passthrough() -> Self {
        Self {
            downscale: 1,
            outline: false,
            dither: false,
            palette: PaletteSize::Full,
            posterize: None,
            ..Self::default()
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.downscale == 0 {
            return Err(ConfigError::InvalidDownscale(self.downscale));
        }
        if !(0.0..=255.0).contains(&self.dither_strength) {
            return Err(ConfigError::InvalidStrength(self.dither_strength));
        }
        if !self.outline_threshold.is_finite() || self.outline_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.outline_threshold));
        }
        if let Some(levels) = self.posterize {
            if !(2..=255).contains(&levels) {
                return Err(ConfigError::InvalidPosterize(levels));
            }
            if self.palette != PaletteSize::Full {
                return Err(ConfigError::PosterizeWithPalette(self.palette));
            }
        }
        Ok(())
    }

    fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .method(self.dither_method)
            .matrix(self.dither_matrix)
            .strength(self.dither_strength)
    }
}

impl fmt::Display for ProcessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "downscale={} palette={}", self.downscale, self.palette)?;
        if self.outline {
            write!(f, " outline={}@{}", self.outline_style, self.outline_threshold)?;
        }
        if self.dither {
            write!(f, " dither={}", self.dither_method)?;
            if self.dither_method == DitherMethod::Ordered {
                write!(f, "/{}x{}@{}", self.dither_matrix, self.dither_matrix, self.dither_strength)?;
            }
        }
        if let Some(levels) = self.posterize {
            write!(f, " posterize={levels}")?;
        }
        Ok(())
    }
}

/// Applies a validated [`ProcessConfig`] to rasters.
#[derive(Debug, Clone)]
pub struct TileProcessor {
    config: ProcessConfig,
    palette: Option<Palette>,
}

impl TileProcessor {
    pub fn new(config: ProcessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = get_palette(config.palette);
        Ok(Self { config, palette })
    }

    #[inline]
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// The reduction palette, `None` for the full palette.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Run the pipeline. The result always has the input's dimensions and
    /// channel layout; the input is never modified.
    pub fn process(&self, raster: &Raster) -> Result<Raster, PixelArtError> {
        if raster.is_empty() {
            return Ok(raster.clone());
        }
        let cfg = &self.config;

        let mut work = raster.downscale(cfg.downscale)?;

        if cfg.outline {
            work = cfg.outline_style.apply(&work, cfg.outline_threshold)?;
        }

        match (&self.palette, cfg.posterize) {
            (None, Some(levels)) => work = posterize(&work, levels)?,
            (None, None) => {}
            (Some(palette), _) if cfg.dither => work = cfg.dither_options().apply(&work, palette),
            // validate() rules out posterize with a reduced palette
            (Some(palette), _) => work = reduce_colors(&work, palette),
        }

        if work.width() != raster.width() || work.height() != raster.height() {
            work = work.resize_nearest(raster.width(), raster.height())?;
        }
        Ok(work)
    }
}
