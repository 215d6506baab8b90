//! Platform families and the behavior that differs between them.
//!
//! Two things vary by platform: how a compressed file's path must be written
//! for the image view to load it ([`UriStyle`]), and how the camera-vs-gallery
//! question is presented ([`ChooserStyle`]). Both are derived from a single
//! [`Platform`] value so call sites never branch on the platform themselves.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Mobile platform family the pipeline is running for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn uri_style(self) -> UriStyle {
        match self {
            Self::Android => UriStyle::FileScheme,
            Self::Ios => UriStyle::Bare,
        }
    }

    pub fn chooser_style(self) -> ChooserStyle {
        match self {
            Self::Android => ChooserStyle::Alert,
            Self::Ios => ChooserStyle::ActionSheet,
        }
    }
}

/// How an output path is turned into a URI for downstream image views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriStyle {
    /// Prefix with `file://` (Android image views reject bare paths).
    FileScheme,
    /// Use the filesystem path as-is.
    Bare,
}

impl UriStyle {
    /// Render a filesystem path as a URI in this style.
    ///
    /// The input is always a plain path produced by the resize backend, so
    /// the scheme is added exactly once.
    pub fn normalize(self, path: &Path) -> String {
        let path = path.to_string_lossy();
        match self {
            Self::FileScheme => format!("{FILE_SCHEME}{path}"),
            Self::Bare => path.into_owned(),
        }
    }
}

/// Selector used to ask the user for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserStyle {
    /// Bottom action sheet with a dedicated cancel row (iOS).
    ActionSheet,
    /// Modal alert dialog with buttons (Android).
    Alert,
}

/// Convert a picker URI into a filesystem path.
///
/// Pickers return either bare paths or `file://` URIs depending on the
/// platform; the resize backend always wants a path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri))
}
