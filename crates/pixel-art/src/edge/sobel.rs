use super::EdgeMask;
use crate::color::Rgb;
use crate::error::RasterError;
use crate::raster::Raster;

/// Sobel gradient magnitude on luminance, thresholded.
///
/// A pixel is an edge when `sqrt(gx² + gy²) > threshold`. The outermost
/// rows and columns are never edges, so rasters narrower or shorter than
/// 3 pixels yield an empty mask.
pub fn sobel_edges(raster: &Raster, threshold: f32) -> EdgeMask {
    let width = raster.width();
    let height = raster.height();
    let mut mask = EdgeMask::new(width, height);
    if width < 3 || height < 3 {
        return mask;
    }

    let ch = raster.channels().count();
    let luma: Vec<f32> = raster
        .data()
        .chunks_exact(ch)
        .map(|px| Rgb::from_slice(px).luminance())
        .collect();

    let w = width as usize;
    let at = |x: usize, y: usize| luma[y * w + x];

    for y in 1..height as usize - 1 {
        for x in 1..w - 1 {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
            if (gx * gx + gy * gy).sqrt() > threshold {
                mask.set(x as u32, y as u32, true);
            }
        }
    }
    mask
}

/// Replace the RGB of every masked pixel with `color`. Alpha is kept.
pub fn overlay_outline(raster: &Raster, mask: &EdgeMask, color: Rgb) -> Result<Raster, RasterError> {
    mask.check_matches(raster)?;
    let mut flags = mask.as_slice().iter();
    Ok(raster.map_rgb(|c| {
        if flags.next().copied().unwrap_or(false) {
            color
        } else {
            c
        }
    }))
}
