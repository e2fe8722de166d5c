use super::{EdgeMask, OPAQUE_ALPHA};
use crate::raster::Raster;

const NEIGHBORS: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Mark opaque pixels that sit on a color or transparency boundary.
///
/// A pixel is opaque when its alpha is at least [`OPAQUE_ALPHA`]; every
/// pixel of an RGB raster is opaque. An opaque pixel is marked when any
/// in-range 4-neighbor is transparent or differs by more than `threshold`
/// in summed absolute RGB difference.
pub fn boundary_mask(raster: &Raster, threshold: f32) -> EdgeMask {
    let width = raster.width();
    let height = raster.height();
    let mut mask = EdgeMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if raster.alpha_at(x, y) < OPAQUE_ALPHA {
                continue;
            }
            let here = raster.rgb_at(x, y);
            let on_boundary = NEIGHBORS.iter().any(|&(dx, dy)| {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    return false;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                raster.alpha_at(nx, ny) < OPAQUE_ALPHA
                    || here.abs_diff_sum(raster.rgb_at(nx, ny)) as f32 > threshold
            });
            if on_boundary {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

/// Darken boundary pixels by `amount` per channel, saturating at 0.
///
/// Detection runs on the unmodified input.
pub fn darken_boundaries(raster: &Raster, threshold: f32, amount: u8) -> Raster {
    let mask = boundary_mask(raster, threshold);
    let mut flags = mask.as_slice().iter();
    raster.map_rgb(|c| {
        if flags.next().copied().unwrap_or(false) {
            c.darken(amount)
        } else {
            c
        }
    })
}
