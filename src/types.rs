//! Shared types passed between the acquirer, the compressor, and callers.
//!
//! [`CompressedImage`] and [`PickResult`] are also what the CLI prints with
//! `--json`, so they serialize with stable lowercase field names.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};

/// Longer-edge bound used when a request does not say otherwise.
pub const DEFAULT_MAX_DIMENSION: u32 = 256;

/// Where a photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Gallery,
    Camera,
}

/// One user-initiated pick: where to pick from and how to compress.
///
/// `selection_limit` only matters when `allow_multiple` is set (0 means no
/// limit). Camera requests never allow multiple photos, whatever the flag says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRequest {
    pub source: Source,
    pub allow_multiple: bool,
    pub selection_limit: u32,
    pub max_dimension: u32,
    pub quality: Quality,
}

impl PickRequest {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            allow_multiple: false,
            selection_limit: 0,
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: Quality::default(),
        }
    }

    pub fn gallery() -> Self {
        Self::new(Source::Gallery)
    }

    pub fn camera() -> Self {
        Self::new(Source::Camera)
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_multiple(mut self, selection_limit: u32) -> Self {
        self.allow_multiple = true;
        self.selection_limit = selection_limit;
        self
    }

    pub fn single(mut self) -> Self {
        self.allow_multiple = false;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Quality::new(quality);
        self
    }
}

/// A photo reference handed back by the OS picker, before compression.
///
/// The uri is only valid for the duration of the pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAsset {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl RawAsset {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// An asset whose dimensions the picker did not report.
    pub fn without_dimensions(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }
}

/// A resized, re-encoded image owned by the caller.
///
/// `width`/`height` are the dimensions actually written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one pick session.
///
/// `cancelled` implies `images` is empty. Not cancelled with no images means
/// something failed (nothing came back, every compression failed, or the
/// picker itself errored).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickResult {
    pub images: Vec<CompressedImage>,
    pub cancelled: bool,
}

impl PickResult {
    pub fn cancelled() -> Self {
        Self {
            images: Vec::new(),
            cancelled: true,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn completed(images: Vec<CompressedImage>) -> Self {
        Self {
            images,
            cancelled: false,
        }
    }

    /// At least one image came back.
    pub fn is_success(&self) -> bool {
        !self.cancelled && !self.images.is_empty()
    }
}
