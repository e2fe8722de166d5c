//! Whole-raster color reduction without dithering.

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Rgb;
use crate::raster::Raster;

/// Replace every pixel's RGB with its nearest palette color.
///
/// Alpha is untouched and the input is never modified.
pub fn reduce_colors(raster: &Raster, palette: &Palette) -> Raster {
    raster.map_rgb(|c| palette.find_nearest(c))
}

/// Band each channel into `levels` evenly spaced values.
///
/// `v' = round(v / 255 * (levels - 1)) * 255 / (levels - 1)`, rounded to
/// the nearest byte.
pub fn posterize(raster: &Raster, levels: u32) -> Result<Raster, PaletteError> {
    if !(2..=255).contains(&levels) {
        return Err(PaletteError::InvalidLevels(levels));
    }
    let steps = (levels - 1) as f32;
    let lut: Vec<u8> = (0..=255u32)
        .map(|v| {
            let band = (v as f32 / 255.0 * steps).round();
            (band * 255.0 / steps).round() as u8
        })
        .collect();
    Ok(raster.map_rgb(|c| {
        Rgb::new(lut[c.r as usize], lut[c.g as usize], lut[c.b as usize])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{get_palette, PaletteSize};
    use crate::raster::Channels;

    #[test]
    fn test_reduce_maps_into_palette() {
        let palette = get_palette(PaletteSize::Colors32).unwrap();
        let data: Vec<u8> = (0..64u32)
            .flat_map(|i| [(i * 4) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8, i as u8])
            .collect();
        let raster = Raster::new(8, 8, Channels::Rgba, data).unwrap();
        let out = reduce_colors(&raster, &palette);

        for (src, dst) in raster.data().chunks_exact(4).zip(out.data().chunks_exact(4)) {
            assert!(palette.contains(Rgb::from_slice(dst)));
            assert_eq!(src[3], dst[3], "alpha must pass through");
        }
    }

    #[test]
    fn test_reduce_keeps_palette_colors() {
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(250, 10, 10)]).unwrap();
        let raster = Raster::filled(2, 2, Channels::Rgb, Rgb::new(250, 10, 10));
        assert_eq!(reduce_colors(&raster, &palette), raster);
    }

    #[test]
    fn test_posterize_two_levels() {
        let raster = Raster::new(
            3,
            1,
            Channels::Rgb,
            vec![0, 100, 127, 128, 200, 255, 64, 191, 30],
        )
        .unwrap();
        let out = posterize(&raster, 2).unwrap();
        assert_eq!(out.data(), &[0, 0, 0, 255, 255, 255, 0, 255, 0]);
    }

    #[test]
    fn test_posterize_levels_range() {
        let raster = Raster::filled(1, 1, Channels::Rgb, Rgb::new(1, 2, 3));
        assert_eq!(
            posterize(&raster, 1),
            Err(PaletteError::InvalidLevels(1))
        );
        assert_eq!(
            posterize(&raster, 256),
            Err(PaletteError::InvalidLevels(256))
        );
        assert_eq!(posterize(&raster, 255).unwrap(), raster);
    }
}
