//! Image processing backend trait and shared types.
//!
//! The [`ResizeBackend`] trait defines the two operations the compressor
//! needs from a platform: identify (read dimensions) and resize (scale and
//! re-encode to JPEG at a given quality).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. On a phone the same seam is filled by the OS resizer.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image resize backends.
///
/// `resize` returns the dimensions actually written, which may differ from
/// the requested ones if the backend applies its own rounding.
pub trait ResizeBackend: Send + Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize `params.source` to `params.width` x `params.height` and write a
    /// JPEG to `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError>;
}
