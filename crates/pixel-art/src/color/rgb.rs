//! 8-bit RGB color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color as three 8-bit channel intensities.
///
/// Values are always in range by construction; conversions from floating
/// point go through [`Rgb::from_f32_clamped`], which rounds and clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    ///
    /// ```
    /// use pixel_art::Rgb;
    /// assert_eq!(Rgb::from_hex(0x7CA84A), Rgb::new(0x7C, 0xA8, 0x4A));
    /// ```
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Read the first three bytes of a pixel slice.
    #[inline]
    pub fn from_slice(pixel: &[u8]) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Round and clamp floating point channels into a color.
    #[inline]
    pub fn from_f32_clamped(r: f32, g: f32, b: f32) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Write this color into the RGB part of a pixel slice.
    #[inline]
    pub fn write_to(self, pixel: &mut [u8]) {
        pixel[0] = self.r;
        pixel[1] = self.g;
        pixel[2] = self.b;
    }

    /// Rec. 601 luma: `0.299 R + 0.587 G + 0.114 B`.
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Sum of absolute per-channel differences.
    #[inline]
    pub fn abs_diff_sum(self, other: Rgb) -> u32 {
        self.r.abs_diff(other.r) as u32
            + self.g.abs_diff(other.g) as u32
            + self.b.abs_diff(other.b) as u32
    }

    /// Subtract `amount` from every channel, saturating at 0.
    #[inline]
    pub fn darken(self, amount: u8) -> Self {
        Self::new(
            self.r.saturating_sub(amount),
            self.g.saturating_sub(amount),
            self.b.saturating_sub(amount),
        )
    }
}

#[inline]
fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#RGB`, `#RRGGBB`, or the same without the leading `#`.
impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16)?;
                let g = u8::from_str_radix(&hex[1..2], 16)?;
                let b = u8::from_str_radix(&hex[2..3], 16)?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)?;
                let g = u8::from_str_radix(&hex[2..4], 16)?;
                let b = u8::from_str_radix(&hex[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
