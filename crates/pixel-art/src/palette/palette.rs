//! Palette struct and nearest-color matching.
//!
//! A [`Palette`] is an ordered, immutable list of colors. The fixed map
//! palettes borrow slices of [`MAP_PALETTE`](super::MAP_PALETTE); custom
//! palettes (mostly useful in tests) own their colors.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use super::table::MAP_PALETTE;
use crate::color::Rgb;

/// Supported palette sizes.
///
/// `Full` means "no reduction": the palette pass is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteSize {
    Colors32,
    #[default]
    Colors48,
    Colors64,
    Full,
}

impl PaletteSize {
    /// Number of colors, or `None` for the full palette.
    pub fn color_count(self) -> Option<usize> {
        match self {
            PaletteSize::Colors32 => Some(32),
            PaletteSize::Colors48 => Some(48),
            PaletteSize::Colors64 => Some(64),
            PaletteSize::Full => None,
        }
    }
}

impl fmt::Display for PaletteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color_count() {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("full"),
        }
    }
}

impl FromStr for PaletteSize {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "32" => Ok(PaletteSize::Colors32),
            "48" => Ok(PaletteSize::Colors48),
            "64" => Ok(PaletteSize::Colors64),
            "full" => Ok(PaletteSize::Full),
            other => Err(PaletteError::InvalidSize(other.to_string())),
        }
    }
}

/// An ordered set of representative colors.
///
/// # Example
///
/// ```
/// use pixel_art::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.find_nearest(Rgb::new(200, 190, 210)), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Cow<'static, [Rgb]>,
}

impl Palette {
    /// Create a palette from owned colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        validate(&colors)?;
        Ok(Self {
            colors: Cow::Owned(colors),
        })
    }

    /// Parse a palette from hex strings such as `"#7CA84A"`.
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    fn from_static(colors: &'static [Rgb]) -> Self {
        Self {
            colors: Cow::Borrowed(colors),
        }
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the color with the smallest squared RGB distance.
    ///
    /// Ties resolve to the earliest palette slot. The scan exits early on an
    /// exact match.
    #[inline]
    pub fn find_nearest_index(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (i, &candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }
        best_idx
    }

    /// The palette color nearest to `color`.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.find_nearest_index(color)]
    }
}

fn validate(colors: &[Rgb]) -> Result<(), PaletteError> {
    if colors.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }
    let mut seen = HashSet::new();
    for (i, color) in colors.iter().enumerate() {
        if !seen.insert(*color) {
            return Err(PaletteError::DuplicateColor { index: i });
        }
    }
    Ok(())
}

/// The fixed map palette for `size`, or `None` for [`PaletteSize::Full`].
pub fn get_palette(size: PaletteSize) -> Option<Palette> {
    size.color_count()
        .map(|n| Palette::from_static(&MAP_PALETTE[..n]))
}

/// Free-function form of [`Palette::find_nearest`].
#[inline]
pub fn find_nearest_color(color: Rgb, palette: &Palette) -> Rgb {
    palette.find_nearest(color)
}
