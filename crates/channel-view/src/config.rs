//! JSON configuration for the viewer.

use std::{fs, path::Path};

use channel_view_core::{CropRegion, GrayMapping};
use serde::{Deserialize, Serialize};

/// Image loaded when no path is configured, relative to the working directory.
pub const DEFAULT_IMAGE_PATH: &str = "Img.bmp";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_image_path() -> String {
    DEFAULT_IMAGE_PATH.to_string()
}

fn default_scale() -> u32 {
    4
}

/// Viewer settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_image_path")]
    pub image_path: String,
    /// Top-left crop (`width`, `height`) and `channel`, flattened into the
    /// top-level object.
    #[serde(flatten)]
    pub crop: CropRegion,
    #[serde(default)]
    pub mapping: GrayMapping,
    /// Window magnification: 1, 2, 4 or 8.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Render to this PNG instead of opening a window.
    #[serde(default)]
    pub output_path: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            crop: CropRegion::default(),
            mapping: GrayMapping::default(),
            scale: default_scale(),
            output_path: None,
        }
    }
}

impl ViewerConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
