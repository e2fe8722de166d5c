pub mod batch;
pub mod pyramid;
pub mod stitch;

pub use batch::{list_png_files, BatchProcessor, BatchReport};
pub use pyramid::{
    generate_pyramid, LevelReport, PyramidOptions, PyramidReport, Resample, Source,
    DEFAULT_COMPOSITE,
};
pub use stitch::{stitch_tiles, StitchReport, DEFAULT_BACKGROUND};
