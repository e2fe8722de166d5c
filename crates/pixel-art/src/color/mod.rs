//! Color types
//!
//! All pixel work in this crate happens on 8-bit sRGB triples. There is no
//! linear-light conversion: palette matching and error diffusion operate on
//! the stored byte values so results are reproducible bit for bit.

mod rgb;

pub use rgb::Rgb;
