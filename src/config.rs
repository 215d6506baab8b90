//! Configuration module.
//!
//! Handles loading and validating `image-intake.toml`. Every key is optional;
//! stock defaults fill in whatever the file leaves out, and a missing file
//! means "all defaults".
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! platform = "android"      # android | ios
//!
//! [picker]
//! max_dimension = 512       # Longer-edge bound in pixels
//! quality = 80              # JPEG quality (0-100)
//! multiple = false          # Allow selecting several photos
//! selection_limit = 0       # Max photos when multiple (0 = unlimited)
//!
//! [output]
//! dir = ".image-intake"     # Where compressed files are written
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use crate::platform::Platform;
use crate::types::{PickRequest, Source};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "image-intake.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Platform family; selects URI style and source selector.
    pub platform: Platform,
    /// Pick and compression policy.
    pub picker: PickerConfig,
    /// Output location for compressed files.
    pub output: OutputConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.picker.validate()
    }
}

/// Pick and compression policy for one picker instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// Longer-edge bound in pixels.
    pub max_dimension: u32,
    /// JPEG quality (0 = worst, 100 = best).
    pub quality: u32,
    /// Allow selecting several photos from the library.
    pub multiple: bool,
    /// Max photos when `multiple` is set; 0 means unlimited.
    pub selection_limit: u32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_dimension: 512,
            quality: 80,
            multiple: false,
            selection_limit: 0,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "picker.max_dimension must be greater than 0".into(),
            ));
        }
        if self.quality > 100 {
            return Err(ConfigError::Validation(
                "picker.quality must be 0-100".into(),
            ));
        }
        Ok(())
    }

    /// Build the request this policy implies for `source`.
    pub fn request(&self, source: Source) -> PickRequest {
        PickRequest {
            source,
            allow_multiple: self.multiple,
            selection_limit: self.selection_limit,
            max_dimension: self.max_dimension,
            quality: Quality::new(self.quality),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory compressed files are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".image-intake"),
        }
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// Returns stock defaults if the file does not exist. Returns `Err` if it
/// exists but is unreadable, malformed, or fails validation.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `image-intake.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-intake configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Platform family: "android" or "ios".
# android: compressed file URIs are written as file:///path, and the
#          camera-vs-gallery question is an alert dialog.
# ios:     compressed file URIs are bare paths, and the question is an
#          action sheet.
platform = "android"

# ---------------------------------------------------------------------------
# Pick and compression policy
# ---------------------------------------------------------------------------
[picker]
# Longer edge of the output, in pixels. Smaller images are re-encoded at
# their original size, never upscaled.
max_dimension = 512

# JPEG quality, 0 (smallest) to 100 (best).
quality = 80

# Allow selecting several photos from the library. The camera always
# captures a single photo.
multiple = false

# Maximum number of photos when multiple = true. 0 means unlimited.
selection_limit = 0

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Directory compressed files are written to. Created on demand.
dir = ".image-intake"
"##
}
