use pixel_art::{Channels, Raster, Rgb};
use std::path::Path;

use crate::error::ManifestError;
use crate::models::Manifest;
use crate::rendering::read_png;

/// Grass green, the color of uncovered ground in the renderer.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::from_hex(0x7CA84A);

/// What happened to each manifest entry while stitching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchReport {
    pub placed: usize,
    /// Entries whose file does not exist.
    pub missing: usize,
    /// Entries whose file exists but could not be decoded.
    pub unreadable: usize,
}

/// Assemble the manifest's tiles into one RGBA canvas.
///
/// The canvas is `cols * tileSize` by `rows * tileSize`, pre-filled with
/// `background`. Each entry's image is copied at
/// `(col * tileSize, row * tileSize)` and clipped to the canvas. Absent or
/// undecodable files leave their area as background.
pub fn stitch_tiles(
    dir: &Path,
    manifest: &Manifest,
    background: Rgb,
) -> Result<(Raster, StitchReport), ManifestError> {
    let (width, height) = manifest.canvas_size()?;
    let mut canvas = Raster::filled(width, height, Channels::Rgba, background);
    let mut report = StitchReport::default();

    for entry in &manifest.tiles {
        let path = dir.join(&entry.filename);
        if !path.is_file() {
            tracing::debug!(file = %entry.filename, col = entry.col, row = entry.row, "Tile missing, using background");
            report.missing += 1;
            continue;
        }
        let tile = match read_png(&path) {
            Ok(tile) => tile,
            Err(e) => {
                tracing::warn!(file = %entry.filename, error = %e, "Unreadable tile, using background");
                report.unreadable += 1;
                continue;
            }
        };
        let origin = entry
            .col
            .checked_mul(manifest.tile_size)
            .zip(entry.row.checked_mul(manifest.tile_size));
        if let Some((x, y)) = origin {
            canvas.blit(&tile, x, y);
        }
        report.placed += 1;
    }

    tracing::info!(
        width,
        height,
        placed = report.placed,
        missing = report.missing,
        unreadable = report.unreadable,
        "Stitched tiles"
    );
    Ok((canvas, report))
}
