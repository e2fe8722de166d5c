use pixel_art::{Raster, RasterError, Rgb};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ManifestError, PyramidError};
use crate::models::{
    descriptor_path, level_dir, level_size, load_landmarks, max_level, placeholder_landmarks,
    tile_rects, DziDescriptor, Manifest, LANDMARKS_FILE, MANIFEST_FILE,
};
use crate::rendering::{read_png, write_png, PngOptions};
use crate::services::stitch::{stitch_tiles, StitchReport, DEFAULT_BACKGROUND};

/// Composite file looked for when neither the options nor the manifest
/// name one.
pub const DEFAULT_COMPOSITE: &str = "full-render.png";

/// Kernel used to shrink the canonical raster for lower levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    /// Keeps hard pixel edges and the palette.
    #[default]
    Nearest,
    /// Box average; smoother, introduces new colors.
    Area,
}

impl Resample {
    pub fn apply(self, raster: &Raster, width: u32, height: u32) -> Result<Raster, RasterError> {
        match self {
            Resample::Nearest => raster.resize_nearest(width, height),
            Resample::Area => raster.resize_area(width, height),
        }
    }
}

impl fmt::Display for Resample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resample::Nearest => "nearest",
            Resample::Area => "area",
        })
    }
}

impl FromStr for Resample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Resample::Nearest),
            "area" | "box" => Ok(Resample::Area),
            other => Err(format!("unknown resample kernel {other:?} (expected nearest or area)")),
        }
    }
}

/// Where the full-resolution raster comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Stitch the manifest's tiles.
    #[default]
    Tiles,
    /// Load one pre-rendered composite image.
    Composite,
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiles" => Ok(Source::Tiles),
            "composite" => Ok(Source::Composite),
            other => Err(format!("unknown source {other:?} (expected tiles or composite)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PyramidOptions {
    /// Base name of the descriptor and the tile directory.
    pub name: String,
    pub tile_size: u32,
    pub overlap: u32,
    pub resample: Resample,
    /// Fill for canvas areas no tile covers.
    pub background: Rgb,
    pub source: Source,
    /// Explicit composite path; wins over the manifest's `fullImage`.
    pub composite: Option<PathBuf>,
    /// JSON landmark list to publish instead of the placeholders.
    pub landmarks: Option<PathBuf>,
    pub png: PngOptions,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self {
            name: "map".to_string(),
            tile_size: 256,
            overlap: 1,
            resample: Resample::Nearest,
            background: DEFAULT_BACKGROUND,
            source: Source::Tiles,
            composite: None,
            landmarks: None,
            png: PngOptions::default(),
        }
    }
}

impl PyramidOptions {
    pub fn validate(&self) -> Result<(), PyramidError> {
        if self.tile_size == 0 {
            return Err(PyramidError::InvalidOptions(
                "tile size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.tile_size {
            return Err(PyramidError::InvalidOptions(format!(
                "overlap {} must be smaller than tile size {}",
                self.overlap, self.tile_size
            )));
        }
        let name_ok = !self.name.is_empty()
            && !self.name.contains(['/', '\\'])
            && self.name != "."
            && self.name != "..";
        if !name_ok {
            return Err(PyramidError::InvalidOptions(format!(
                "invalid pyramid name {:?}",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level: u32,
    pub width: u32,
    pub height: u32,
    pub tiles: usize,
}

/// Outcome of one pyramid run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyramidReport {
    pub width: u32,
    pub height: u32,
    pub max_level: u32,
    /// From `max_level` down to 0.
    pub levels: Vec<LevelReport>,
    pub descriptor: PathBuf,
    /// Present when the canonical raster was stitched from tiles.
    pub stitch: Option<StitchReport>,
}

impl PyramidReport {
    pub fn total_tiles(&self) -> usize {
        self.levels.iter().map(|l| l.tiles).sum()
    }
}

/// Build a deep-zoom pyramid from `input_dir` into `output_dir`.
///
/// All fatal conditions (missing input, manifest, composite or a bad
/// landmark file) are detected before anything is written.
pub fn generate_pyramid(
    input_dir: &Path,
    output_dir: &Path,
    options: &PyramidOptions,
) -> Result<PyramidReport, PyramidError> {
    if !input_dir.is_dir() {
        return Err(PyramidError::InputDirMissing(input_dir.to_path_buf()));
    }
    options.validate()?;

    let landmarks = match &options.landmarks {
        Some(path) => load_landmarks(path)?,
        None => placeholder_landmarks(),
    };

    let (canonical, stitch) = match options.source {
        Source::Composite => {
            let manifest = match Manifest::load(input_dir) {
                Ok(manifest) => Some(manifest),
                Err(ManifestError::Missing(_)) => None,
                Err(e) => return Err(e.into()),
            };
            let path = composite_path(input_dir, options, manifest.as_ref())?;
            (read_png(&path)?, None)
        }
        Source::Tiles => {
            let manifest = Manifest::load(input_dir)?;
            if prefers_composite(input_dir, options, &manifest) {
                let path = composite_path(input_dir, options, Some(&manifest))?;
                tracing::info!(composite = %path.display(), "Using composite render instead of tiles");
                (read_png(&path)?, None)
            } else if manifest.tiles.is_empty() {
                return Err(PyramidError::NoTiles(input_dir.join(MANIFEST_FILE)));
            } else {
                let (raster, report) = stitch_tiles(input_dir, &manifest, options.background)?;
                (raster, Some(report))
            }
        }
    };

    let (width, height) = (canonical.width(), canonical.height());
    let top = max_level(width, height, options.tile_size);
    tracing::info!(
        width,
        height,
        max_level = top,
        tile_size = options.tile_size,
        overlap = options.overlap,
        resample = %options.resample,
        "Generating pyramid"
    );

    std::fs::create_dir_all(output_dir)?;

    let mut levels = Vec::with_capacity(top as usize + 1);
    for level in (0..=top).rev() {
        let (lw, lh) = level_size(width, height, top, level);
        let raster: Cow<'_, Raster> = if (lw, lh) == (width, height) {
            Cow::Borrowed(&canonical)
        } else {
            Cow::Owned(options.resample.apply(&canonical, lw, lh)?)
        };

        let dir = level_dir(output_dir, &options.name, level);
        std::fs::create_dir_all(&dir)?;

        let rects = tile_rects(lw, lh, options.tile_size, options.overlap);
        rects.par_iter().try_for_each(|rect| -> Result<(), PyramidError> {
            let tile = raster.crop(rect.x, rect.y, rect.width, rect.height)?;
            write_png(&dir.join(rect.file_name()), &tile, options.png)?;
            Ok(())
        })?;

        tracing::info!(level, width = lw, height = lh, tiles = rects.len(), "Wrote level");
        levels.push(LevelReport {
            level,
            width: lw,
            height: lh,
            tiles: rects.len(),
        });
    }

    let descriptor = descriptor_path(output_dir, &options.name);
    let dzi = DziDescriptor::png(options.tile_size, options.overlap, width, height);
    std::fs::write(&descriptor, dzi.to_xml())?;

    let landmarks_json = serde_json::to_string_pretty(&landmarks)
        .map_err(|e| PyramidError::Io(std::io::Error::other(e)))?;
    std::fs::write(output_dir.join(LANDMARKS_FILE), landmarks_json)?;

    let report = PyramidReport {
        width,
        height,
        max_level: top,
        levels,
        descriptor,
        stitch,
    };
    tracing::info!(
        levels = report.levels.len(),
        tiles = report.total_tiles(),
        descriptor = %report.descriptor.display(),
        "Pyramid complete"
    );
    Ok(report)
}

/// Explicit option, then the manifest's `fullImage`, then
/// [`DEFAULT_COMPOSITE`]. The file must exist.
fn composite_path(
    input_dir: &Path,
    options: &PyramidOptions,
    manifest: Option<&Manifest>,
) -> Result<PathBuf, PyramidError> {
    let path = match &options.composite {
        Some(path) => path.clone(),
        None => {
            let named = manifest.and_then(|m| m.full_image.as_deref());
            input_dir.join(named.unwrap_or(DEFAULT_COMPOSITE))
        }
    };
    if !path.is_file() {
        return Err(PyramidError::CompositeMissing(path));
    }
    Ok(path)
}

/// Tile mode still takes a composite when one is supplied: an explicit
/// `--composite`, a manifest naming `fullImage`, or a tile-less manifest
/// next to [`DEFAULT_COMPOSITE`].
fn prefers_composite(input_dir: &Path, options: &PyramidOptions, manifest: &Manifest) -> bool {
    options.composite.is_some()
        || manifest.full_image.is_some()
        || (manifest.tiles.is_empty() && input_dir.join(DEFAULT_COMPOSITE).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_parse() {
        assert_eq!("nearest".parse(), Ok(Resample::Nearest));
        assert_eq!("Area".parse(), Ok(Resample::Area));
        assert!("bicubic".parse::<Resample>().is_err());
        assert_eq!(Resample::default(), Resample::Nearest);
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("composite".parse(), Ok(Source::Composite));
        assert_eq!("tiles".parse(), Ok(Source::Tiles));
        assert!("mosaic".parse::<Source>().is_err());
    }

    #[test]
    fn test_default_options() {
        let options = PyramidOptions::default();
        assert_eq!(options.tile_size, 256);
        assert_eq!(options.overlap, 1);
        assert_eq!(options.name, "map");
        assert_eq!(options.resample, Resample::Nearest);
        assert_eq!(options.background, Rgb::new(0x7C, 0xA8, 0x4A));
        options.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        for options in [
            PyramidOptions {
                tile_size: 0,
                ..Default::default()
            },
            PyramidOptions {
                tile_size: 4,
                overlap: 4,
                ..Default::default()
            },
            PyramidOptions {
                name: "../escape".to_string(),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                options.validate(),
                Err(PyramidError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn test_composite_path_lookup_order() {
        let dir = tempfile::tempdir().unwrap();
        let options = PyramidOptions::default();
        assert!(matches!(
            composite_path(dir.path(), &options, None),
            Err(PyramidError::CompositeMissing(p)) if p.ends_with(DEFAULT_COMPOSITE)
        ));

        std::fs::write(dir.path().join(DEFAULT_COMPOSITE), b"").unwrap();
        assert_eq!(
            composite_path(dir.path(), &options, None).unwrap(),
            dir.path().join(DEFAULT_COMPOSITE)
        );

        let manifest: Manifest = serde_json::from_str(
            r#"{"tileSize": 4, "cols": 1, "rows": 1, "fullImage": "campus.png"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("campus.png"), b"").unwrap();
        assert_eq!(
            composite_path(dir.path(), &options, Some(&manifest)).unwrap(),
            dir.path().join("campus.png")
        );

        let explicit = dir.path().join("other.png");
        std::fs::write(&explicit, b"").unwrap();
        let options = PyramidOptions {
            composite: Some(explicit.clone()),
            ..Default::default()
        };
        assert_eq!(
            composite_path(dir.path(), &options, Some(&manifest)).unwrap(),
            explicit
        );
    }

    #[test]
    fn test_tile_mode_prefers_supplied_composite() {
        let dir = tempfile::tempdir().unwrap();
        let options = PyramidOptions::default();
        let tiled: Manifest = serde_json::from_str(
            r#"{"tileSize": 4, "cols": 1, "rows": 1, "tiles": [{"col": 0, "row": 0, "filename": "tile_0_0.png"}]}"#,
        )
        .unwrap();
        let bare: Manifest =
            serde_json::from_str(r#"{"tileSize": 4, "cols": 1, "rows": 1}"#).unwrap();
        let named: Manifest = serde_json::from_str(
            r#"{"tileSize": 4, "cols": 1, "rows": 1, "fullImage": "campus.png"}"#,
        )
        .unwrap();

        assert!(!prefers_composite(dir.path(), &options, &tiled));
        assert!(!prefers_composite(dir.path(), &options, &bare));
        assert!(prefers_composite(dir.path(), &options, &named));

        std::fs::write(dir.path().join(DEFAULT_COMPOSITE), b"").unwrap();
        assert!(prefers_composite(dir.path(), &options, &bare));
        assert!(!prefers_composite(dir.path(), &options, &tiled));

        let explicit = PyramidOptions {
            composite: Some(dir.path().join("other.png")),
            ..Default::default()
        };
        assert!(prefers_composite(dir.path(), &explicit, &tiled));
    }
}
