//! Error types.
//!
//! Only environment failures end up here. Picking on an empty history,
//! clicking outside the image and similar user no-ops are logged, not
//! returned as errors.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransectError {
    /// I/O error while reading a config or image file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid JSON for `PickerConfig`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source image could not be decoded.
    #[cfg(feature = "im-io")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The picker window failed to start or crashed.
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// The raster has no cells, or no finite values to derive a colour range from.
    #[error("Raster is empty or has no finite values ({rows}x{cols})")]
    EmptyRaster { rows: usize, cols: usize },

    /// A config value is invalid.
    #[error("Invalid config '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TransectError>;
