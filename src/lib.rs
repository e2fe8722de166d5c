//! isomap - pixel-art post-processing and deep-zoom tiling for isometric
//! map renders.
//!
//! The pixel transforms live in the `pixel_art` crate; this crate adds PNG
//! I/O, the renderer manifest, presets and the two batch jobs. It exposes
//! its modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
