//! Configuration file handling for label-scanner.
//!
//! Loads configuration from `<config dir>/label-scanner/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, FacingMode, DEFAULT_IMAGE_QUALITY, FALLBACK_CAPTURE_SIZE};
use crate::platform::PixelSize;

/// Configuration file structure for label-scanner.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct CameraConfig {
    #[serde(default)]
    pub facing_mode: FacingMode,
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,
    #[serde(default = "default_png_quality")]
    pub png_quality: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::default(),
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
            png_quality: default_png_quality(),
        }
    }
}

impl CameraConfig {
    /// Settings for a [`CameraManager`](crate::camera::CameraManager).
    ///
    /// Zero fallback dimensions and out-of-range qualities are replaced by
    /// the defaults.
    pub fn settings(&self) -> CameraSettings {
        let fallback_size = if self.fallback_width == 0 || self.fallback_height == 0 {
            FALLBACK_CAPTURE_SIZE
        } else {
            PixelSize::new(self.fallback_width, self.fallback_height)
        };
        let image_quality = if (0.0..=1.0).contains(&self.png_quality) {
            self.png_quality
        } else {
            DEFAULT_IMAGE_QUALITY
        };
        CameraSettings {
            facing_mode: self.facing_mode,
            fallback_size,
            image_quality,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// `log` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_fallback_width() -> u32 {
    FALLBACK_CAPTURE_SIZE.width
}

fn default_fallback_height() -> u32 {
    FALLBACK_CAPTURE_SIZE.height
}

fn default_png_quality() -> f32 {
    DEFAULT_IMAGE_QUALITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Render as TOML, for `config show` and `config init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("label-scanner").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/label-scanner/config.toml")
        })
}
