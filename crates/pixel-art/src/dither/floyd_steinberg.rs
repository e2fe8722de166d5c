//! Floyd-Steinberg error diffusion.

use super::Dither;
use crate::color::Rgb;
use crate::palette::Palette;
use crate::raster::Raster;

/// `(dx, dy, weight)` in sixteenths.
///
/// ```text
///        X   7
///    3   5   1
/// ```
const KERNEL: [(isize, usize, f32); 4] = [
    (1, 0, 7.0),  // right
    (-1, 1, 3.0), // bottom-left
    (0, 1, 5.0),  // bottom
    (1, 1, 1.0),  // bottom-right
];

const DIVISOR: f32 = 16.0;

/// Floyd-Steinberg error diffusion.
///
/// Pixels are visited in row-major order. Each one is matched to the
/// nearest palette color using its accumulated value (clamped to 0..=255
/// only for the lookup) and the unclamped difference is spread over the
/// unvisited neighbors. Error aimed outside the raster is dropped.
///
/// The scan is strictly sequential: every pixel depends on the error its
/// predecessors left behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Raster {
        let width = raster.width() as usize;
        let height = raster.height() as usize;
        let ch = raster.channels().count();

        let mut work: Vec<[f32; 3]> = raster
            .data()
            .chunks_exact(ch)
            .map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
            .collect();
        let mut data = raster.data().to_vec();

        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                let [r, g, b] = work[i];
                let chosen = palette.find_nearest(Rgb::from_f32_clamped(r, g, b));
                chosen.write_to(&mut data[i * ch..i * ch + 3]);

                let error = [
                    r - chosen.r as f32,
                    g - chosen.g as f32,
                    b - chosen.b as f32,
                ];
                for &(dx, dy, weight) in &KERNEL {
                    let Some(nx) = x.checked_add_signed(dx) else {
                        continue;
                    };
                    let ny = y + dy;
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let cell = &mut work[ny * width + nx];
                    for (c, e) in cell.iter_mut().zip(error) {
                        *c += e * weight / DIVISOR;
                    }
                }
            }
        }

        raster.with_data(data)
    }
}
