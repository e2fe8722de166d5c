use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ManifestError;

/// File name of the renderer's manifest inside an input directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Grid description written by the renderer next to its tiles.
///
/// Only the fields the pipeline reads are modelled; unknown fields are
/// ignored. The batch processor copies the file byte-for-byte, so nothing
/// is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Edge length of every tile in pixels.
    pub tile_size: u32,

    /// Edge length of one tile in world units.
    #[serde(default)]
    pub world_tile_size: f64,

    pub cols: u32,
    pub rows: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<WorldBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,

    #[serde(default)]
    pub tiles: Vec<TileEntry>,

    /// Composite render written alongside (or instead of) the tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// One rendered tile and its grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEntry {
    pub col: u32,
    pub row: u32,
    pub filename: String,
}

impl Manifest {
    /// Read and parse `{dir}/manifest.json`.
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(ManifestError::Missing(path));
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        let manifest: Self = serde_json::from_str(&content)
            .map_err(|source| ManifestError::Parse { path, source })?;
        tracing::debug!(
            cols = manifest.cols,
            rows = manifest.rows,
            tile_size = manifest.tile_size,
            tiles = manifest.tiles.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Stitched canvas size: `(cols * tileSize, rows * tileSize)`.
    pub fn canvas_size(&self) -> Result<(u32, u32), ManifestError> {
        let invalid = || ManifestError::InvalidGrid {
            cols: self.cols,
            rows: self.rows,
            tile_size: self.tile_size,
        };
        if self.tile_size == 0 || self.cols == 0 || self.rows == 0 {
            return Err(invalid());
        }
        let width = self.cols.checked_mul(self.tile_size).ok_or_else(invalid)?;
        let height = self.rows.checked_mul(self.tile_size).ok_or_else(invalid)?;
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tile_manifest() {
        let json = r#"{
            "tileSize": 512,
            "worldTileSize": 40.0,
            "cols": 2,
            "rows": 1,
            "bounds": {"minX": -40.0, "maxX": 40.0, "minZ": -20.0, "maxZ": 20.0},
            "center": {"lon": 8.5417, "lat": 47.3769},
            "tiles": [
                {"col": 0, "row": 0, "filename": "tile_0_0.png"},
                {"col": 1, "row": 0, "filename": "tile_1_0.png"}
            ],
            "renderer": "blender"
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.tile_size, 512);
        assert_eq!(manifest.tiles.len(), 2);
        assert_eq!(manifest.tiles[1].filename, "tile_1_0.png");
        assert_eq!(manifest.center.unwrap().lat, 47.3769);
        assert_eq!(manifest.bounds.unwrap().max_z, 20.0);
        assert_eq!(manifest.canvas_size().unwrap(), (1024, 512));
    }

    #[test]
    fn test_parse_composite_manifest() {
        let json = r#"{
            "tileSize": 256, "cols": 4, "rows": 3,
            "fullImage": "full-render.png", "width": 1024, "height": 768
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert!(manifest.tiles.is_empty());
        assert_eq!(manifest.full_image.as_deref(), Some("full-render.png"));
        assert_eq!(manifest.width, Some(1024));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let json = r#"{"tileSize": 256, "cols": 0, "rows": 3}"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            manifest.canvas_size(),
            Err(ManifestError::InvalidGrid { cols: 0, .. })
        ));
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Manifest::load(dir.path()),
            Err(ManifestError::Missing(_))
        ));

        std::fs::write(dir.path().join(MANIFEST_FILE), "{not json").unwrap();
        assert!(matches!(
            Manifest::load(dir.path()),
            Err(ManifestError::Parse { .. })
        ));
    }
}
