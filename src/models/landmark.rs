use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PyramidError;

/// File name of the landmark list inside the output directory.
pub const LANDMARKS_FILE: &str = "landmarks.json";

/// Named point of interest for the viewer overlay.
///
/// `x` and `y` are fractions of the full image width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Static markers written when no landmark file is supplied. They are not
/// derived from real anchor points.
pub fn placeholder_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new("Center", 0.5, 0.5),
        Landmark::new("North", 0.5, 0.15),
        Landmark::new("South", 0.5, 0.85),
    ]
}

/// Read a JSON array of landmarks, rejecting any coordinate outside [0, 1].
pub fn load_landmarks(path: &Path) -> Result<Vec<Landmark>, PyramidError> {
    let invalid = |reason: String| PyramidError::Landmarks {
        path: path.to_path_buf(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let landmarks: Vec<Landmark> =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    if let Some(bad) = landmarks.iter().find(|l| !l.is_normalized()) {
        return Err(invalid(format!(
            "{:?} at ({}, {}) is outside the unit square",
            bad.name, bad.x, bad.y
        )));
    }
    Ok(landmarks)
}
