//! The pick pipeline: acquire → compress each asset in order → result.
//!
//! Failure policy:
//!
//! - A cancelled pick returns [`PickResult::cancelled`] and compresses nothing.
//! - A single asset that fails to compress is dropped; the rest continue.
//! - A picker error is handed to the [`ErrorReporter`] and the pipeline
//!   returns [`PickResult::failed`] (empty, not cancelled).

use crate::acquire::{Acquisition, PickerError, SourceAcquirer};
use crate::imaging::ImageCompressor;
use crate::notify::ErrorReporter;
use crate::types::{CompressedImage, PickRequest, PickResult, RawAsset, Source};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ImagePipeline {
    acquirer: SourceAcquirer,
    compressor: ImageCompressor,
    reporter: Arc<dyn ErrorReporter>,
}

impl ImagePipeline {
    pub fn new(
        acquirer: SourceAcquirer,
        compressor: ImageCompressor,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            acquirer,
            compressor,
            reporter,
        }
    }

    pub fn acquirer(&self) -> &SourceAcquirer {
        &self.acquirer
    }

    /// Pick from `request.source` and compress the result.
    pub async fn pick_image(&self, request: &PickRequest) -> PickResult {
        let acquisition = self
            .acquirer
            .acquire(
                request.source,
                request.allow_multiple,
                request.selection_limit,
            )
            .await;
        self.finish(acquisition, request).await
    }

    /// Ask the user for a source, then pick and compress.
    ///
    /// `request.source` is ignored.
    pub async fn pick_image_with_choice(&self, request: &PickRequest) -> PickResult {
        let acquisition = self
            .acquirer
            .acquire_with_choice(request.allow_multiple, request.selection_limit)
            .await;
        self.finish(acquisition, request).await
    }

    /// Single image from the library, or `None`.
    pub async fn pick_single_image(&self, request: &PickRequest) -> Option<CompressedImage> {
        let request = request.with_source(Source::Gallery).single();
        self.pick_image(&request).await.images.into_iter().next()
    }

    /// Single photo from the camera, or `None`.
    pub async fn capture_image(&self, request: &PickRequest) -> Option<CompressedImage> {
        let request = request.with_source(Source::Camera).single();
        self.pick_image(&request).await.images.into_iter().next()
    }

    /// Several images from the library, or `None` if nothing came back.
    pub async fn pick_multiple_images(
        &self,
        request: &PickRequest,
    ) -> Option<Vec<CompressedImage>> {
        let request = request
            .with_source(Source::Gallery)
            .with_multiple(request.selection_limit);
        let result = self.pick_image(&request).await;
        (!result.images.is_empty()).then_some(result.images)
    }

    async fn finish(
        &self,
        acquisition: Result<Acquisition, PickerError>,
        request: &PickRequest,
    ) -> PickResult {
        match acquisition {
            Err(e) => {
                error!(error = %e, "image pick failed");
                self.reporter.report(&e);
                PickResult::failed()
            }
            Ok(Acquisition::Cancelled(reason)) => {
                debug!(?reason, "image pick cancelled");
                PickResult::cancelled()
            }
            Ok(Acquisition::Assets(assets)) => {
                let images = self.compress_all(&assets, request).await;
                info!(
                    picked = assets.len(),
                    compressed = images.len(),
                    "image pick complete"
                );
                PickResult::completed(images)
            }
        }
    }

    /// Compress sequentially so output order matches picker order.
    async fn compress_all(&self, assets: &[RawAsset], request: &PickRequest) -> Vec<CompressedImage> {
        let mut images = Vec::with_capacity(assets.len());
        for asset in assets {
            if asset.uri.is_empty() {
                debug!("skipping asset without uri");
                continue;
            }
            if let Some(image) = self
                .compressor
                .compress(asset, request.max_dimension, request.quality)
                .await
            {
                images.push(image);
            }
        }
        images
    }
}
