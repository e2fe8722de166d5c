pub mod config;
pub mod descriptor;
pub mod landmark;
pub mod manifest;

pub use config::{check_optimize_level, resolve_config, ConfigOverrides, Preset};
pub use descriptor::{
    descriptor_path, level_dir, level_size, max_level, tile_rects, DziDescriptor, TileRect,
};
pub use landmark::{load_landmarks, placeholder_landmarks, Landmark, LANDMARKS_FILE};
pub use manifest::{GeoPoint, Manifest, TileEntry, WorldBounds, MANIFEST_FILE};
