//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`compress`](super::compress) module (which decides
//! the target size and output location) and the [`backend`](super::backend)
//! (which does the actual pixel work). Swapping the backend for a mock in
//! tests does not change any of the planning logic.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 80). Clamped on construction.
//! - [`ResizeParams`]: everything a resize needs: source, output path, target dimensions, quality.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
///
/// Callers speak in the 0–100 range; 0 is clamped up to 1 because the JPEG
/// encoder has no zero-quality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

impl From<u32> for Quality {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for u32 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Parameters for a single resize + JPEG re-encode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}
