use crate::error::{Result, TransectError};
use serde::Deserialize;
use std::path::Path;

/// Which key identifiers drive the picker.
///
/// Identifiers are the lower-case key names the host reports, e.g.
/// `"enter"`, `"backspace"`, `"escape"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub reset_key: String,
    pub finalize_key: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            reset_key: "backspace".to_owned(),
            finalize_key: "enter".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    #[serde(flatten)]
    pub keys: KeyBindings,
    /// RGB used for cells above the raster's value range (the transect).
    pub over_color: [u8; 3],
    /// RGB of the waypoint polyline.
    pub polyline_color: [u8; 3],
    /// Display pixels per raster cell.
    pub cell_scale: f32,
    pub window_size: [f32; 2],
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            over_color: [255, 0, 0],
            polyline_color: [0, 0, 0],
            cell_scale: 10.0,
            window_size: [800.0, 700.0],
        }
    }
}

impl PickerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.keys.reset_key.is_empty() {
            return Err(invalid("reset_key", "must not be empty"));
        }
        if self.keys.finalize_key.is_empty() {
            return Err(invalid("finalize_key", "must not be empty"));
        }
        if self.keys.reset_key == self.keys.finalize_key {
            return Err(invalid("finalize_key", "must differ from reset_key"));
        }
        if !(self.cell_scale.is_finite() && self.cell_scale > 0.0) {
            return Err(invalid("cell_scale", "must be a positive number"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> TransectError {
    TransectError::InvalidConfig {
        key: key.to_owned(),
        reason: reason.to_owned(),
    }
}
