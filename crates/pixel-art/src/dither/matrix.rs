//! Bayer threshold matrices.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Edge length of the threshold matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixSize {
    #[default]
    Four,
    Eight,
}

impl MatrixSize {
    #[inline]
    pub fn edge(self) -> usize {
        match self {
            MatrixSize::Four => 4,
            MatrixSize::Eight => 8,
        }
    }
}

impl fmt::Display for MatrixSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edge())
    }
}

impl FromStr for MatrixSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" => Ok(MatrixSize::Four),
            "8" => Ok(MatrixSize::Eight),
            other => Err(ConfigError::InvalidMatrixSize(other.to_string())),
        }
    }
}

/// Normalized thresholds in `[0, 1)`, tiled over the image.
///
/// The flattened values are exactly `{0, 1, .., N²-1} / N²`, each once.
#[derive(Debug, Clone, PartialEq)]
pub struct DitherMatrix {
    edge: usize,
    thresholds: Vec<f32>,
}

impl DitherMatrix {
    pub fn new(size: MatrixSize) -> Self {
        let ranks: Vec<u8> = match size {
            MatrixSize::Four => BAYER_4.iter().flatten().copied().collect(),
            MatrixSize::Eight => BAYER_8.iter().flatten().copied().collect(),
        };
        let cells = (size.edge() * size.edge()) as f32;
        Self {
            edge: size.edge(),
            thresholds: ranks.into_iter().map(|r| r as f32 / cells).collect(),
        }
    }

    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Row-major thresholds.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.thresholds
    }

    /// Threshold for image position `(x, y)`, read at row `y mod N`,
    /// column `x mod N`.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f32 {
        self.thresholds[(y % self.edge) * self.edge + x % self.edge]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_uniform(size: MatrixSize) {
        let matrix = DitherMatrix::new(size);
        let n2 = size.edge() * size.edge();
        let mut values = matrix.values().to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f32> = (0..n2).map(|i| i as f32 / n2 as f32).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_bayer4_is_permutation() {
        assert_uniform(MatrixSize::Four);
    }

    #[test]
    fn test_bayer8_is_permutation() {
        assert_uniform(MatrixSize::Eight);
    }

    #[test]
    fn test_threshold_tiles() {
        let m = DitherMatrix::new(MatrixSize::Four);
        assert_eq!(m.threshold(0, 0), 0.0);
        assert_eq!(m.threshold(1, 0), 8.0 / 16.0);
        assert_eq!(m.threshold(0, 1), 12.0 / 16.0);
        assert_eq!(m.threshold(5, 4), m.threshold(1, 0));
        assert_eq!(m.threshold(7, 7), 5.0 / 16.0);
    }

    #[test]
    fn test_matrix_size_parse() {
        assert_eq!("4".parse(), Ok(MatrixSize::Four));
        assert_eq!("8".parse(), Ok(MatrixSize::Eight));
        assert_eq!(
            "16".parse::<MatrixSize>(),
            Err(ConfigError::InvalidMatrixSize("16".to_string()))
        );
    }
}
