//! Shared test utilities for the image-intake test suite.
//!
//! Provides scripted platform doubles (picker, chooser, error reporter,
//! toast sink), a pipeline builder wired to a [`MockBackend`], and a
//! synthetic JPEG writer for tests that exercise the real backend.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let picker = Arc::new(ScriptedPicker::new(vec![Ok(Acquisition::Assets(vec![
//!     asset("/lib/a.jpg", 4000, 2000),
//! ]))]));
//! let (pipeline, reporter) = pipeline(picker, Arc::new(MockBackend::new()), FixedChooser::dismiss());
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::acquire::{
    Acquisition, ChoicePrompt, NativePicker, PickerError, PickerOptions, SourceAcquirer,
    SourceChooser,
};
use crate::imaging::ImageCompressor;
use crate::imaging::backend::tests::MockBackend;
use crate::notify::{ErrorReporter, Toast, ToastSink};
use crate::pipeline::ImagePipeline;
use crate::platform::Platform;
use crate::types::RawAsset;

// =========================================================================
// Fixtures
// =========================================================================

pub fn asset(uri: &str, width: u32, height: u32) -> RawAsset {
    RawAsset::new(uri, width, height)
}

/// Write a small valid JPEG with a gradient so the encoder has real content.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

// =========================================================================
// Platform doubles
// =========================================================================

/// Picker that replays queued responses and counts launches.
///
/// With a gate installed, every launch waits for `Notify::notify_one`
/// before answering, which keeps a pick in flight for re-entrancy tests.
#[derive(Default)]
pub struct ScriptedPicker {
    responses: Mutex<VecDeque<Result<Acquisition, PickerError>>>,
    camera_calls: AtomicUsize,
    library_calls: AtomicUsize,
    last_options: Mutex<Option<PickerOptions>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedPicker {
    pub fn new(responses: Vec<Result<Acquisition, PickerError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn camera_calls(&self) -> usize {
        self.camera_calls.load(Ordering::SeqCst)
    }

    pub fn library_calls(&self) -> usize {
        self.library_calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<PickerOptions> {
        *self.last_options.lock().unwrap()
    }

    async fn answer(&self, options: &PickerOptions) -> Result<Acquisition, PickerError> {
        *self.last_options.lock().unwrap() = Some(*options);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PickerError::Platform("no scripted response".into())))
    }
}

#[async_trait]
impl NativePicker for ScriptedPicker {
    async fn launch_camera(&self, options: &PickerOptions) -> Result<Acquisition, PickerError> {
        self.camera_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(options).await
    }

    async fn launch_library(&self, options: &PickerOptions) -> Result<Acquisition, PickerError> {
        self.library_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(options).await
    }
}

/// Chooser that always picks the same option (or dismisses).
pub struct FixedChooser(Option<usize>);

impl FixedChooser {
    pub fn pick(index: usize) -> Self {
        Self(Some(index))
    }

    pub fn dismiss() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SourceChooser for FixedChooser {
    async fn choose(&self, _prompt: &ChoicePrompt) -> Option<usize> {
        self.0
    }
}

/// Collects reported errors as display strings.
#[derive(Default)]
pub struct RecordingReporter {
    errors: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn reported(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &PickerError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

/// Toast sink whose clones share one list.
#[derive(Clone, Default)]
pub struct RecordingSink {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingSink {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl ToastSink for RecordingSink {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

// =========================================================================
// Pipeline wiring
// =========================================================================

/// Android pipeline writing to `/cache` through `backend`.
pub fn pipeline(
    picker: Arc<ScriptedPicker>,
    backend: Arc<MockBackend>,
    chooser: FixedChooser,
) -> (ImagePipeline, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let acquirer = SourceAcquirer::new(picker, Arc::new(chooser), Platform::Android);
    let compressor = ImageCompressor::new(backend, "/cache", Platform::Android);
    let pipeline = ImagePipeline::new(acquirer, compressor, reporter.clone());
    (pipeline, reporter)
}
