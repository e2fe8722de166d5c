use std::path::PathBuf;

use pixel_art::{PixelArtError, RasterError};
use thiserror::Error;

/// Failure to read, decode, encode or write one PNG.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unreadable image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid manifest grid: {cols}x{rows} tiles of {tile_size}px")]
    InvalidGrid { cols: u32, rows: u32, tile_size: u32 },
}

/// Invalid or unresolvable processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown preset {0:?} (expected raw, subtle, classic or retro)")]
    UnknownPreset(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Pixel(#[from] pixel_art::ConfigError),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Processing error: {0}")]
    Pixel(#[from] PixelArtError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PyramidError {
    #[error("Input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Composite image not found: {}", .0.display())]
    CompositeMissing(PathBuf),

    #[error("Manifest {} lists no tiles and no composite image was found", .0.display())]
    NoTiles(PathBuf),

    #[error("Invalid pyramid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid landmarks file {}: {reason}", path.display())]
    Landmarks { path: PathBuf, reason: String },

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_image_message() {
        let error = ImageError::UnreadableImage {
            path: PathBuf::from("tiles/tile_0_0.png"),
            reason: "invalid signature".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unreadable image tiles/tile_0_0.png: invalid signature"
        );
    }

    #[test]
    fn test_manifest_missing_message() {
        let error = ManifestError::Missing(PathBuf::from("in/manifest.json"));
        assert_eq!(error.to_string(), "Manifest not found: in/manifest.json");
    }

    #[test]
    fn test_unknown_preset_message() {
        let error = ConfigError::UnknownPreset("vapor".to_string());
        assert_eq!(
            error.to_string(),
            "Unknown preset \"vapor\" (expected raw, subtle, classic or retro)"
        );
    }

    #[test]
    fn test_config_error_from_pixel_config_error() {
        let error: ConfigError = pixel_art::ConfigError::InvalidDownscale(0).into();
        assert_eq!(
            error.to_string(),
            "downscale factor must be at least 1, got 0"
        );
    }

    #[test]
    fn test_pyramid_error_from_manifest_error() {
        let error: PyramidError = ManifestError::Missing(PathBuf::from("m.json")).into();
        match error {
            PyramidError::Manifest(ManifestError::Missing(_)) => {}
            other => panic!("Expected Manifest variant, got {other:?}"),
        }
    }

    #[test]
    fn test_process_error_from_image_error() {
        let error: ProcessError = ImageError::Encode("boom".to_string()).into();
        assert_eq!(error.to_string(), "Image error: PNG encode error: boom");
    }
}
