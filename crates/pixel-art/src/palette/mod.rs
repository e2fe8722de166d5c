//! Palette types and utilities
//!
//! This module provides the fixed map palettes, nearest-color matching and
//! the whole-raster color reduction passes built on top of it.

mod error;
mod palette;
mod reduce;
mod table;

pub use error::{PaletteError, ParseColorError};
pub use palette::{find_nearest_color, get_palette, Palette, PaletteSize};
pub use reduce::{posterize, reduce_colors};
pub use table::MAP_PALETTE;
