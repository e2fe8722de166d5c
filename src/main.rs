use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use isomap::models::{check_optimize_level, resolve_config, ConfigOverrides, Preset};
use isomap::rendering::PngOptions;
use isomap::services::{
    generate_pyramid, BatchProcessor, PyramidOptions, Resample, Source, DEFAULT_BACKGROUND,
};
use pixel_art::{DitherMethod, MatrixSize, OutlineStyle, PaletteSize, Rgb};

#[derive(Parser)]
#[command(name = "isomap")]
#[command(about = "Pixel-art post-processing and deep-zoom tiling for isometric map renders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a pixel-art preset to every tile of a render
    Process(ProcessArgs),
    /// Build a deep-zoom tile pyramid from tiles or a composite image
    Pyramid(PyramidArgs),
    /// List the built-in presets
    Presets,
}

#[derive(Args)]
struct ProcessArgs {
    /// Directory with raw tile PNGs (and manifest.json)
    input_dir: PathBuf,

    /// Directory for processed tiles
    output_dir: PathBuf,

    /// Base preset: raw, subtle, classic or retro
    #[arg(long, default_value = "classic")]
    preset: String,

    /// YAML or JSON file with option overrides
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, conflicts_with = "no_dither")]
    dither: bool,

    #[arg(long)]
    no_dither: bool,

    /// ordered or diffusion
    #[arg(long)]
    dither_method: Option<DitherMethod>,

    /// Ordered dither bias in channel units (0-255)
    #[arg(long)]
    dither_strength: Option<f32>,

    /// Bayer matrix size: 4 or 8
    #[arg(long)]
    matrix: Option<MatrixSize>,

    #[arg(long, conflicts_with = "no_outline")]
    outline: bool,

    #[arg(long)]
    no_outline: bool,

    /// boundary or sobel
    #[arg(long)]
    outline_style: Option<OutlineStyle>,

    #[arg(long)]
    outline_threshold: Option<f32>,

    /// Integer shrink factor before stylizing
    #[arg(long)]
    downscale: Option<u32>,

    /// 32, 48, 64 or full
    #[arg(long)]
    palette: Option<PaletteSize>,

    /// Color levels per channel (full palette only)
    #[arg(long)]
    posterize: Option<u32>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct PyramidArgs {
    /// Directory with tiles and manifest.json, or a composite render
    input_dir: PathBuf,

    /// Directory for the descriptor and tile tree
    output_dir: PathBuf,

    /// Base name of the .dzi file and the tile directory
    #[arg(long, default_value = "map")]
    name: String,

    /// tiles or composite
    #[arg(long, default_value = "tiles")]
    source: Source,

    /// Composite image (default: manifest fullImage, then full-render.png)
    #[arg(long)]
    composite: Option<PathBuf>,

    #[arg(long, default_value_t = 256)]
    tile_size: u32,

    #[arg(long, default_value_t = 1)]
    overlap: u32,

    /// nearest or area
    #[arg(long, default_value = "nearest")]
    resample: Resample,

    /// Fill color for uncovered canvas, e.g. "#7CA84A"
    #[arg(long)]
    background: Option<Rgb>,

    /// JSON array of {name, x, y} with normalized coordinates
    #[arg(long)]
    landmarks: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Re-compress output PNGs with oxipng at this level (0-6)
    #[arg(long)]
    optimize: Option<u8>,

    /// Worker threads (default: one per core)
    #[arg(long)]
    threads: Option<usize>,
}

impl CommonArgs {
    fn png_options(&self) -> anyhow::Result<PngOptions> {
        Ok(PngOptions {
            optimize: self.optimize.map(check_optimize_level).transpose()?,
        })
    }

    fn init_thread_pool(&self) -> anyhow::Result<()> {
        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to configure worker threads")?;
        }
        Ok(())
    }
}

/// `--x` / `--no-x` to an optional override.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "isomap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Process(args) => run_process_command(args),
        Commands::Pyramid(args) => run_pyramid_command(args),
        Commands::Presets => {
            run_presets_command();
            Ok(())
        }
    }
}

fn run_process_command(args: ProcessArgs) -> anyhow::Result<()> {
    args.common.init_thread_pool()?;
    let preset: Preset = args.preset.parse()?;
    let file = args
        .config
        .as_deref()
        .map(ConfigOverrides::from_file)
        .transpose()?;
    let cli = ConfigOverrides {
        downscale: args.downscale,
        outline: flag_pair(args.outline, args.no_outline),
        outline_style: args.outline_style,
        outline_threshold: args.outline_threshold,
        dither: flag_pair(args.dither, args.no_dither),
        dither_method: args.dither_method,
        dither_strength: args.dither_strength,
        dither_matrix: args.matrix,
        palette: args.palette,
        posterize: args.posterize,
    };
    let config = resolve_config(preset, file, cli)?;
    tracing::info!(preset = %preset, version = preset.version(), "Resolved configuration");

    let batch = BatchProcessor::new(config)?.png_options(args.common.png_options()?);
    let report = batch
        .run(&args.input_dir, &args.output_dir)
        .with_context(|| format!("Failed to process {}", args.input_dir.display()))?;

    println!(
        "Processed {} tiles ({} failed) into {}",
        report.processed,
        report.failed,
        report.output_dir.display()
    );
    Ok(())
}

fn run_pyramid_command(args: PyramidArgs) -> anyhow::Result<()> {
    args.common.init_thread_pool()?;
    let options = PyramidOptions {
        name: args.name,
        tile_size: args.tile_size,
        overlap: args.overlap,
        resample: args.resample,
        background: args.background.unwrap_or(DEFAULT_BACKGROUND),
        source: args.source,
        composite: args.composite,
        landmarks: args.landmarks,
        png: args.common.png_options()?,
    };

    let report = generate_pyramid(&args.input_dir, &args.output_dir, &options)
        .with_context(|| format!("Failed to build pyramid from {}", args.input_dir.display()))?;

    println!(
        "Wrote {} levels ({} tiles) for {}x{} image: {}",
        report.levels.len(),
        report.total_tiles(),
        report.width,
        report.height,
        report.descriptor.display()
    );
    if let Some(stitch) = report.stitch {
        if stitch.missing + stitch.unreadable > 0 {
            println!(
                "  {} tiles missing, {} unreadable (filled with background)",
                stitch.missing, stitch.unreadable
            );
        }
    }
    Ok(())
}

fn run_presets_command() {
    println!("Presets:\n");
    for preset in Preset::ALL {
        let marker = if preset == Preset::default() { " (default)" } else { "" };
        println!(
            "  {:<8} v{}  {}{}",
            preset.name(),
            preset.version(),
            preset.description(),
            marker
        );
        println!("               {}", preset.config());
    }
}
