//! Test fixtures: scratch render directories with tiles and manifests.

use std::path::{Path, PathBuf};

use isomap::models::{Manifest, TileEntry, MANIFEST_FILE};
use isomap::rendering::{write_png, PngOptions};
use pixel_art::{Channels, Raster, Rgb};
use tempfile::TempDir;

/// Distinct, non-palette colors used to tell tiles apart.
pub mod colors {
    use pixel_art::Rgb;

    pub const RED: Rgb = Rgb::new(201, 30, 44);
    pub const BLUE: Rgb = Rgb::new(20, 60, 210);
    pub const ORANGE: Rgb = Rgb::new(240, 140, 20);
    pub const TEAL: Rgb = Rgb::new(30, 170, 160);
}

/// A temporary renderer output directory plus a sibling output directory.
pub struct RenderDir {
    root: TempDir,
}

impl RenderDir {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("render")).expect("create render dir");
        Self { root }
    }

    /// Where the renderer's files live.
    pub fn input(&self) -> PathBuf {
        self.root.path().join("render")
    }

    /// Not created; the code under test must create it.
    pub fn output(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn write_raster(&self, name: &str, raster: &Raster) -> PathBuf {
        let path = self.input().join(name);
        write_png(&path, raster, PngOptions::default()).expect("write fixture png");
        path
    }

    /// Write a solid `size` x `size` RGB tile.
    pub fn write_solid_tile(&self, name: &str, size: u32, color: Rgb) -> PathBuf {
        self.write_raster(name, &Raster::filled(size, size, Channels::Rgb, color))
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.input().join(name);
        std::fs::write(&path, bytes).expect("write fixture file");
        path
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> PathBuf {
        let json = serde_json::to_string_pretty(manifest).expect("serialize manifest");
        self.write_bytes(MANIFEST_FILE, json.as_bytes())
    }
}

/// A tile-mode manifest for a `cols` x `rows` grid.
pub fn grid_manifest(cols: u32, rows: u32, tile_size: u32, tiles: &[(u32, u32)]) -> Manifest {
    Manifest {
        tile_size,
        world_tile_size: 40.0,
        cols,
        rows,
        bounds: None,
        center: None,
        tiles: tiles
            .iter()
            .map(|&(col, row)| TileEntry {
                col,
                row,
                filename: tile_name(col, row),
            })
            .collect(),
        full_image: None,
        width: None,
        height: None,
    }
}

pub fn tile_name(col: u32, row: u32) -> String {
    format!("tile_{col}_{row}.png")
}

/// Horizontal gradient with some vertical variation.
pub fn gradient(width: u32, height: u32) -> Raster {
    let data: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    128,
                    255,
                ]
            })
        })
        .collect();
    Raster::new(width, height, Channels::Rgba, data).expect("gradient raster")
}

/// Relative paths of every file below `dir`, sorted.
pub fn list_tree(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).expect("relative path");
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    if dir.is_dir() {
        walk(dir, dir, &mut out);
    }
    out.sort();
    out
}
