#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! pixel-art: deterministic retro-style transforms for rendered map tiles
//!
//! This library turns smooth renderer output into chunky pixel art. It works
//! on plain [`Raster`] buffers (row-major RGB or RGBA bytes) and performs no
//! file I/O; decoding and encoding live in the `isomap` application crate.
//!
//! # Quick Start
//!
//! The [`TileProcessor`] is the primary entry point:
//!
//! ```
//! use pixel_art::{Channels, ProcessConfig, Raster, TileProcessor};
//!
//! let tile = Raster::new(2, 2, Channels::Rgb, vec![128; 12]).unwrap();
//! let processor = TileProcessor::new(ProcessConfig::default()).unwrap();
//! let out = processor.process(&tile).unwrap();
//!
//! assert_eq!(out.width(), 2);
//! assert_eq!(out.height(), 2);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! input raster
//!     |
//!     v
//! [downscale]      integer factor, nearest-neighbor
//!     |
//!     v
//! [outline]        color-boundary darkening or Sobel overlay
//!     |
//!     v
//! [posterize]      only with the full palette
//!     |
//!     v
//! [palette pass]   ordered / Floyd-Steinberg dither, or plain reduction
//!     |
//!     v
//! [upscale]        back to the input size, nearest-neighbor
//! ```
//!
//! Every stage is optional. With all stages disabled the output is a
//! byte-for-byte copy of the input.
//!
//! # Palettes
//!
//! The 32, 48 and 64 color palettes are prefixes of one constant table, so
//! growing the palette never moves an existing color. See [`get_palette`].
//!
//! # Alpha
//!
//! Every transform reads and writes RGB only. The alpha channel of an RGBA
//! raster passes through untouched.

pub mod color;
pub mod dither;
pub mod edge;
pub mod error;
pub mod palette;
pub mod processor;
pub mod raster;


pub use color::Rgb;
pub use dither::{
    Dither, DitherMatrix, DitherMethod, DitherOptions, FloydSteinberg, MatrixSize, OrderedDither,
};
pub use edge::{EdgeMask, OutlineStyle};
pub use error::{ConfigError, PixelArtError, RasterError};
pub use palette::{
    find_nearest_color, get_palette, posterize, reduce_colors, Palette, PaletteError, PaletteSize,
    ParseColorError,
};
pub use processor::{ProcessConfig, TileProcessor};
pub use raster::{Channels, Raster};
