//! Per-asset compression: bound the longer edge, re-encode, normalize the URI.
//!
//! [`ImageCompressor::plan`] is pure and decides the target size and output
//! file. [`ImageCompressor::try_compress`] runs the plan on the backend (on
//! the blocking pool) and [`ImageCompressor::compress`] is the batch-friendly
//! wrapper that logs a failure and yields `None` instead of an error.

use super::backend::{BackendError, ResizeBackend};
use super::calculations::{calculate_bounded_dimensions, resolve_source_dimensions};
use super::params::{Quality, ResizeParams};
use crate::naming::compressed_file_name;
use crate::platform::{Platform, UriStyle, uri_to_path};
use crate::types::{CompressedImage, RawAsset};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("asset has an empty uri")]
    EmptyUri,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("resize task aborted: {0}")]
    Aborted(String),
}

/// Resizes picked assets into `output_dir` and hands back platform URIs.
pub struct ImageCompressor {
    backend: Arc<dyn ResizeBackend>,
    output_dir: PathBuf,
    uri_style: UriStyle,
}

impl ImageCompressor {
    pub fn new(
        backend: Arc<dyn ResizeBackend>,
        output_dir: impl Into<PathBuf>,
        platform: Platform,
    ) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            uri_style: platform.uri_style(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Plan the resize for `asset` without executing it.
    ///
    /// Dimensions come from the picker when reported, then from the file
    /// header, then fall back to `max_dimension`.
    pub fn plan(
        &self,
        asset: &RawAsset,
        max_dimension: u32,
        quality: Quality,
    ) -> Result<ResizeParams, CompressError> {
        if asset.uri.is_empty() {
            return Err(CompressError::EmptyUri);
        }
        let source = uri_to_path(&asset.uri);

        let (width, height) = match (asset.width, asset.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (Some(w), Some(h)),
            _ => match self.backend.identify(&source) {
                Ok(dims) => (Some(dims.width), Some(dims.height)),
                Err(e) => {
                    debug!(uri = %asset.uri, error = %e, "dimensions unknown, using bound");
                    (asset.width, asset.height)
                }
            },
        };

        let source_dims = resolve_source_dimensions(width, height, max_dimension);
        let (target_w, target_h) = calculate_bounded_dimensions(source_dims, max_dimension);
        let output = self.output_dir.join(compressed_file_name(
            &source,
            target_w,
            target_h,
            quality.value(),
        ));

        Ok(ResizeParams {
            source,
            output,
            width: target_w,
            height: target_h,
            quality,
        })
    }

    /// Compress one asset, surfacing the failure.
    pub async fn try_compress(
        &self,
        asset: &RawAsset,
        max_dimension: u32,
        quality: Quality,
    ) -> Result<CompressedImage, CompressError> {
        let params = self.plan(asset, max_dimension, quality)?;
        debug!(
            source = %params.source.display(),
            width = params.width,
            height = params.height,
            quality = quality.value(),
            "compressing"
        );

        let backend = Arc::clone(&self.backend);
        let job = params.clone();
        let dims = tokio::task::spawn_blocking(move || backend.resize(&job))
            .await
            .map_err(|e| CompressError::Aborted(e.to_string()))??;

        Ok(CompressedImage {
            uri: self.uri_style.normalize(&params.output),
            width: dims.width,
            height: dims.height,
        })
    }

    /// Compress one asset; a failure is logged and dropped.
    pub async fn compress(
        &self,
        asset: &RawAsset,
        max_dimension: u32,
        quality: Quality,
    ) -> Option<CompressedImage> {
        match self.try_compress(asset, max_dimension, quality).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(uri = %asset.uri, error = %e, "image compression failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    fn compressor(backend: Arc<MockBackend>, platform: Platform) -> ImageCompressor {
        ImageCompressor::new(backend, "/cache", platform)
    }

    #[test]
    fn plan_landscape_over_bound() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let params = c
            .plan(&RawAsset::new("img1.png", 4000, 2000), 256, Quality::new(80))
            .unwrap();

        assert_eq!((params.width, params.height), (256, 128));
        assert_eq!(params.source, PathBuf::from("img1.png"));
        assert!(params.output.starts_with("/cache"));
        assert_eq!(params.quality.value(), 80);
    }

    #[test]
    fn plan_portrait_uses_height_bound() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let params = c
            .plan(&RawAsset::new("tall.jpg", 1000, 3000), 256, Quality::default())
            .unwrap();
        assert_eq!((params.width, params.height), (85, 256));
    }

    #[test]
    fn plan_small_image_passes_through() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let params = c
            .plan(&RawAsset::new("small.jpg", 120, 80), 256, Quality::default())
            .unwrap();
        assert_eq!((params.width, params.height), (120, 80));
    }

    #[test]
    fn plan_strips_file_scheme_from_source() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let params = c
            .plan(&RawAsset::new("file:///dcim/a.jpg", 10, 10), 256, Quality::default())
            .unwrap();
        assert_eq!(params.source, PathBuf::from("/dcim/a.jpg"));
    }

    #[test]
    fn plan_identifies_asset_without_dimensions() {
        let backend = Arc::new(MockBackend::with_dimensions(vec![Dimensions {
            width: 3000,
            height: 1000,
        }]));
        let c = compressor(Arc::clone(&backend), Platform::Ios);
        let params = c
            .plan(&RawAsset::without_dimensions("/p/wide.jpg"), 300, Quality::default())
            .unwrap();

        assert_eq!((params.width, params.height), (300, 100));
        assert!(matches!(&backend.get_operations()[0], RecordedOp::Identify(p) if p == "/p/wide.jpg"));
    }

    #[test]
    fn plan_unknown_dimensions_fall_back_to_bound() {
        // Mock has no dimensions queued, so identify fails
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let params = c
            .plan(&RawAsset::without_dimensions("/p/mystery.jpg"), 512, Quality::default())
            .unwrap();
        assert_eq!((params.width, params.height), (512, 512));
    }

    #[test]
    fn plan_rejects_empty_uri() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Android);
        let result = c.plan(&RawAsset::new("", 10, 10), 256, Quality::default());
        assert!(matches!(result, Err(CompressError::EmptyUri)));
    }

    #[tokio::test]
    async fn compress_android_prefixes_uri() {
        let backend = Arc::new(MockBackend::new());
        let c = compressor(Arc::clone(&backend), Platform::Android);

        let image = c
            .compress(&RawAsset::new("img1.png", 4000, 2000), 256, Quality::new(80))
            .await
            .unwrap();

        assert_eq!((image.width, image.height), (256, 128));
        assert!(image.uri.starts_with("file:///cache/img1-"), "{}", image.uri);
        assert_eq!(image.uri.matches("file://").count(), 1);
        assert_eq!(backend.resize_count(), 1);
    }

    #[tokio::test]
    async fn compress_ios_keeps_bare_path() {
        let c = compressor(Arc::new(MockBackend::new()), Platform::Ios);
        let image = c
            .compress(&RawAsset::new("a.jpg", 100, 100), 256, Quality::default())
            .await
            .unwrap();
        assert!(image.uri.starts_with("/cache/a-"), "{}", image.uri);
    }

    #[tokio::test]
    async fn compress_failure_yields_none() {
        let backend = Arc::new(MockBackend::failing_on(&["bad.jpg"]));
        let c = compressor(backend, Platform::Android);
        let result = c
            .compress(&RawAsset::new("bad.jpg", 500, 500), 256, Quality::default())
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn try_compress_surfaces_backend_error() {
        let backend = Arc::new(MockBackend::failing_on(&["bad.jpg"]));
        let c = compressor(backend, Platform::Android);
        let result = c
            .try_compress(&RawAsset::new("bad.jpg", 500, 500), 256, Quality::default())
            .await;
        assert!(matches!(result, Err(CompressError::Backend(_))));
    }

    #[tokio::test]
    async fn compressing_twice_does_not_downscale_again() {
        let backend = Arc::new(MockBackend::new());
        let c = compressor(Arc::clone(&backend), Platform::Ios);

        let first = c
            .compress(&RawAsset::new("big.jpg", 4032, 3024), 512, Quality::default())
            .await
            .unwrap();
        let second = c
            .compress(
                &RawAsset::new(first.uri.clone(), first.width, first.height),
                512,
                Quality::default(),
            )
            .await
            .unwrap();

        assert_eq!((first.width, first.height), (512, 384));
        assert_eq!((second.width, second.height), (first.width, first.height));
    }
}
