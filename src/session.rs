//! Per-instance picker host: the re-entrancy guard and the picked-image list.
//!
//! Each UI element that can open a picker owns one [`PickerSession`]. While a
//! pick is in flight (including while the camera-vs-gallery question is on
//! screen) further pick calls on the same session return
//! [`PickOutcome::Busy`] without touching the native picker, so a double tap
//! cannot open two pickers. Separate sessions never block each other.
//!
//! Successful picks are merged into the session's image list: appended when
//! the session allows multiple selection, replacing the list otherwise.
//! Cancelled and failed picks leave the list untouched.

use crate::config::PickerConfig;
use crate::pipeline::ImagePipeline;
use crate::types::{CompressedImage, PickResult, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// What a pick call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Another pick on this session was still in flight; nothing happened.
    Busy,
    /// The pick ran to completion (which may be a cancellation).
    Finished(PickResult),
}

/// Clears the in-flight flag when dropped, on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PickerSession {
    pipeline: Arc<ImagePipeline>,
    config: PickerConfig,
    in_flight: AtomicBool,
    images: Mutex<Vec<CompressedImage>>,
}

impl PickerSession {
    pub fn new(pipeline: Arc<ImagePipeline>, config: PickerConfig) -> Self {
        Self {
            pipeline,
            config,
            in_flight: AtomicBool::new(false),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Whether a pick is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn pick_from_gallery(&self) -> PickOutcome {
        self.run(Some(Source::Gallery)).await
    }

    pub async fn capture_from_camera(&self) -> PickOutcome {
        self.run(Some(Source::Camera)).await
    }

    /// Ask camera-or-gallery first, then pick.
    pub async fn pick_from_both(&self) -> PickOutcome {
        self.run(None).await
    }

    async fn run(&self, source: Option<Source>) -> PickOutcome {
        let Some(_guard) = InFlight::try_acquire(&self.in_flight) else {
            debug!("pick ignored: picker already open");
            return PickOutcome::Busy;
        };

        let request = self.config.request(source.unwrap_or(Source::Gallery));
        let result = match source {
            Some(_) => self.pipeline.pick_image(&request).await,
            None => self.pipeline.pick_image_with_choice(&request).await,
        };

        if result.is_success() {
            let mut images = self.lock_images();
            if self.config.multiple {
                images.extend(result.images.iter().cloned());
            } else {
                *images = result.images.clone();
            }
        }

        PickOutcome::Finished(result)
    }

    /// Snapshot of the current image list.
    pub fn images(&self) -> Vec<CompressedImage> {
        self.lock_images().clone()
    }

    /// Remove every image with this uri.
    pub fn remove_image(&self, uri: &str) {
        self.lock_images().retain(|img| img.uri != uri);
    }

    pub fn reset_images(&self) {
        self.lock_images().clear();
    }

    fn lock_images(&self) -> MutexGuard<'_, Vec<CompressedImage>> {
        self.images.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
