//! Deep Zoom descriptor and level geometry.

use std::path::{Path, PathBuf};

/// Contents of a `.dzi` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DziDescriptor {
    pub format: String,
    pub overlap: u32,
    pub tile_size: u32,
    pub width: u32,
    pub height: u32,
}

impl DziDescriptor {
    pub fn png(tile_size: u32, overlap: u32, width: u32, height: u32) -> Self {
        Self {
            format: "png".to_string(),
            overlap,
            tile_size,
            width,
            height,
        }
    }

    pub fn to_xml(&self) -> String {
        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<Image xmlns=\"http://schemas.microsoft.com/deepzoom/2008\" ",
                "Format=\"{}\" Overlap=\"{}\" TileSize=\"{}\">\n",
                "  <Size Width=\"{}\" Height=\"{}\"/>\n",
                "</Image>\n"
            ),
            self.format, self.overlap, self.tile_size, self.width, self.height
        )
    }
}

/// `{out}/{name}.dzi`
pub fn descriptor_path(out: &Path, name: &str) -> PathBuf {
    out.join(format!("{name}.dzi"))
}

/// `{out}/{name}_files/{level}`
pub fn level_dir(out: &Path, name: &str, level: u32) -> PathBuf {
    out.join(format!("{name}_files")).join(level.to_string())
}

/// Smallest `L >= 0` with `tile_size * 2^L >= max(width, height)`.
pub fn max_level(width: u32, height: u32, tile_size: u32) -> u32 {
    let longest = width.max(height) as u64;
    let mut span = tile_size.max(1) as u64;
    let mut level = 0;
    while span < longest {
        span *= 2;
        level += 1;
    }
    level
}

/// Dimensions of `level`: the full size divided by `2^(max_level - level)`,
/// rounded up.
pub fn level_size(width: u32, height: u32, max_level: u32, level: u32) -> (u32, u32) {
    let scale = 1u64 << (max_level - level.min(max_level));
    (
        (width as u64).div_ceil(scale) as u32,
        (height as u64).div_ceil(scale) as u32,
    )
}

/// One tile cut from a level raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub col: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.col, self.row)
    }
}

/// Tile grid of a `width` x `height` level.
///
/// `ceil(width / tile_size)` x `ceil(height / tile_size)` tiles whose
/// origins step by `tile_size`; each extends `overlap` pixels past its
/// right and bottom edges where the level allows. Zero-area tiles are
/// omitted.
pub fn tile_rects(width: u32, height: u32, tile_size: u32, overlap: u32) -> Vec<TileRect> {
    if tile_size == 0 {
        return Vec::new();
    }
    let cols = width.div_ceil(tile_size);
    let rows = height.div_ceil(tile_size);
    let reach = tile_size.saturating_add(overlap);

    let mut rects = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = col * tile_size;
            let y = row * tile_size;
            let rect = TileRect {
                col,
                row,
                x,
                y,
                width: reach.min(width - x),
                height: reach.min(height - y),
            };
            if rect.width > 0 && rect.height > 0 {
                rects.push(rect);
            }
        }
    }
    rects
}
