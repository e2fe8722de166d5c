use pixel_art::{ProcessConfig, TileProcessor};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ProcessError;
use crate::models::MANIFEST_FILE;
use crate::rendering::{read_png, write_png, PngOptions};

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Applies one [`ProcessConfig`] to every PNG of a flat directory.
pub struct BatchProcessor {
    processor: TileProcessor,
    png: PngOptions,
}

impl BatchProcessor {
    pub fn new(config: ProcessConfig) -> Result<Self, pixel_art::ConfigError> {
        Ok(Self {
            processor: TileProcessor::new(config)?,
            png: PngOptions::default(),
        })
    }

    pub fn png_options(mut self, png: PngOptions) -> Self {
        self.png = png;
        self
    }

    pub fn config(&self) -> &ProcessConfig {
        self.processor.config()
    }

    /// Process one tile file. Nothing is written when decoding fails.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<(), ProcessError> {
        let raster = read_png(input)?;
        let processed = self.processor.process(&raster)?;
        write_png(output, &processed, self.png)?;
        Ok(())
    }

    /// Process every `.png` in `input_dir` into `output_dir` under the same
    /// name and copy the manifest alongside.
    ///
    /// A missing input directory or a failed manifest copy is fatal and
    /// happens before any tile is written. Failures of individual tiles are
    /// logged, counted and skipped.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport, ProcessError> {
        if !input_dir.is_dir() {
            return Err(ProcessError::InputDirMissing(input_dir.to_path_buf()));
        }
        std::fs::create_dir_all(output_dir)?;

        // copied first: a failed copy must leave no tile output
        let manifest = input_dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            std::fs::copy(&manifest, output_dir.join(MANIFEST_FILE))?;
            tracing::debug!("Copied manifest");
        }

        let files = list_png_files(input_dir)?;
        let total = files.len();
        tracing::info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            tiles = total,
            config = %self.config(),
            "Processing tiles"
        );

        let done = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        files.par_iter().for_each(|input| {
            let Some(name) = input.file_name() else {
                return;
            };
            let output = output_dir.join(name);
            let result = self.process_file(input, &output);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            let percent = finished * 100 / total.max(1);
            match result {
                Ok(()) => tracing::info!(
                    file = %name.to_string_lossy(),
                    percent,
                    "Processed tile"
                ),
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        file = %name.to_string_lossy(),
                        error = %e,
                        percent,
                        "Failed to process tile"
                    );
                }
            }
        });

        let failed = failed.into_inner();
        let report = BatchReport {
            processed: total - failed,
            failed,
            output_dir: output_dir.to_path_buf(),
        };
        tracing::info!(
            processed = report.processed,
            failed = report.failed,
            "Batch complete"
        );
        Ok(report)
    }
}

/// Regular files directly inside `dir` with a `.png` extension (any case),
/// sorted by name.
pub fn list_png_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_art::{Channels, Raster, Rgb};

    #[test]
    fn test_list_png_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.PNG", "notes.txt", "manifest.json"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_png_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let batch = BatchProcessor::new(ProcessConfig::default()).unwrap();
        let err = batch
            .run(&dir.path().join("absent"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ProcessError::InputDirMissing(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_manifest_copy_failure_writes_no_tiles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("render");
        let output = dir.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join(MANIFEST_FILE), b"{}").unwrap();
        let tile = Raster::filled(4, 4, Channels::Rgb, Rgb::new(9, 9, 9));
        write_png(&input.join("tile_0_0.png"), &tile, PngOptions::default()).unwrap();
        // a directory in the way makes the copy fail
        std::fs::create_dir_all(output.join(MANIFEST_FILE)).unwrap();

        let batch = BatchProcessor::new(ProcessConfig::default()).unwrap();
        let err = batch.run(&input, &output).unwrap_err();
        assert!(matches!(err, ProcessError::Io(_)));
        assert!(!output.join("tile_0_0.png").exists());
    }
}
