//! Assertion helpers for tests.

use std::path::Path;

use isomap::rendering::read_png;
use pixel_art::{Palette, Raster, Rgb};
use pretty_assertions::assert_eq;

/// Decode a PNG the code under test wrote, with a readable failure.
pub fn load_png(path: &Path) -> Raster {
    read_png(path).unwrap_or_else(|e| panic!("Expected readable PNG at {}: {e}", path.display()))
}

/// Assert a PNG exists and has the given dimensions; returns it.
pub fn assert_png_size(path: &Path, width: u32, height: u32) -> Raster {
    let raster = load_png(path);
    assert_eq!(
        (raster.width(), raster.height()),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    raster
}

/// Assert every pixel in the rectangle has the given RGB.
pub fn assert_region_color(raster: &Raster, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
    for py in y..y + height {
        for px in x..x + width {
            assert_eq!(
                raster.rgb_at(px, py),
                color,
                "Pixel ({px}, {py}) has unexpected color"
            );
        }
    }
}

/// Assert every pixel's RGB is a member of `palette`.
pub fn assert_in_palette(raster: &Raster, palette: &Palette) {
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let color = raster.rgb_at(x, y);
            assert!(
                palette.contains(color),
                "Pixel ({x}, {y}) = {color} is not a palette color"
            );
        }
    }
}
