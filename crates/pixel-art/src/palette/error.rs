//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette selection.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette selection and construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Requested palette size is not one of 32, 48, 64 or "full"
    #[error("unsupported palette size {0:?} (expected 32, 48, 64 or full)")]
    InvalidSize(String),
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Duplicate color found at the specified index
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Posterize level count outside 2..=255
    #[error("posterize levels must be within 2..=255, got {0}")]
    InvalidLevels(u32),
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
