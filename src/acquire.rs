//! Source acquisition: camera capture, library selection, and the
//! camera-vs-gallery question.
//!
//! The OS pickers sit behind [`NativePicker`]; each launch is one suspension
//! point with three outcomes: assets, a cancellation, or an error. The
//! selector that asks the user which source to use sits behind
//! [`SourceChooser`] and is described by a [`ChoicePrompt`] built for the
//! platform.

use crate::platform::{ChooserStyle, Platform};
use crate::types::{RawAsset, Source};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Why an acquisition produced nothing without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user backed out of the picker or camera.
    UserCancelled,
    /// The user declined the camera or photo permission.
    PermissionDenied,
    /// The camera-vs-gallery selector was dismissed.
    SelectorDismissed,
}

/// What the native picker returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    Assets(Vec<RawAsset>),
    Cancelled(CancelReason),
}

/// Unexpected picker failures. Cancellation is not one of them.
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("camera is not available")]
    CameraUnavailable,
    #[error("photo access was revoked during the pick")]
    PermissionRevoked,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Platform(String),
}

/// Options passed to the native picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    /// Maximum number of photos the user may select; 0 means no limit.
    pub selection_limit: u32,
}

impl PickerOptions {
    /// Single-select unless multiple selection is allowed.
    pub fn new(allow_multiple: bool, selection_limit: u32) -> Self {
        Self {
            selection_limit: if allow_multiple { selection_limit } else { 1 },
        }
    }
}

/// Platform camera and photo-library primitives.
#[async_trait]
pub trait NativePicker: Send + Sync {
    /// Open the camera. Yields at most one asset.
    async fn launch_camera(&self, options: &PickerOptions) -> Result<Acquisition, PickerError>;

    /// Open the photo library.
    async fn launch_library(&self, options: &PickerOptions) -> Result<Acquisition, PickerError>;
}

/// One button/row of a [`ChoicePrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: &'static str,
    /// `None` for the cancel entry.
    pub source: Option<Source>,
}

/// Platform-idiomatic description of the camera-vs-gallery selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub style: ChooserStyle,
    pub title: Option<&'static str>,
    pub message: Option<&'static str>,
    pub options: Vec<ChoiceOption>,
}

impl ChoicePrompt {
    pub fn for_platform(platform: Platform) -> Self {
        let cancel = ChoiceOption {
            label: "Cancel",
            source: None,
        };
        let camera = ChoiceOption {
            label: "Camera",
            source: Some(Source::Camera),
        };
        let gallery = ChoiceOption {
            label: "Gallery",
            source: Some(Source::Gallery),
        };

        match platform.chooser_style() {
            ChooserStyle::ActionSheet => Self {
                style: ChooserStyle::ActionSheet,
                title: None,
                message: None,
                options: vec![cancel, camera, gallery],
            },
            ChooserStyle::Alert => Self {
                style: ChooserStyle::Alert,
                title: Some("Select Image"),
                message: Some("Choose option"),
                options: vec![camera, gallery, cancel],
            },
        }
    }

    /// Source behind the option at `index`; `None` for cancel or out of range.
    pub fn resolve(&self, index: usize) -> Option<Source> {
        self.options.get(index).and_then(|o| o.source)
    }
}

/// Presents a [`ChoicePrompt`] and reports the chosen option index.
#[async_trait]
pub trait SourceChooser: Send + Sync {
    /// Returns `None` if the prompt was dismissed without a choice.
    async fn choose(&self, prompt: &ChoicePrompt) -> Option<usize>;
}

/// Turns "camera", "gallery", or "ask the user" into a list of raw assets.
pub struct SourceAcquirer {
    picker: Arc<dyn NativePicker>,
    chooser: Arc<dyn SourceChooser>,
    platform: Platform,
}

impl SourceAcquirer {
    pub fn new(
        picker: Arc<dyn NativePicker>,
        chooser: Arc<dyn SourceChooser>,
        platform: Platform,
    ) -> Self {
        Self {
            picker,
            chooser,
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Launch the picker for `source`.
    ///
    /// A camera session yields exactly one photo, so `allow_multiple` is
    /// ignored for [`Source::Camera`].
    pub async fn acquire(
        &self,
        source: Source,
        allow_multiple: bool,
        selection_limit: u32,
    ) -> Result<Acquisition, PickerError> {
        let allow_multiple = allow_multiple && source == Source::Gallery;
        let options = PickerOptions::new(allow_multiple, selection_limit);
        debug!(?source, limit = options.selection_limit, "launching picker");

        match source {
            Source::Camera => self.picker.launch_camera(&options).await,
            Source::Gallery => self.picker.launch_library(&options).await,
        }
    }

    /// Ask the user for a source. `None` if they dismissed the selector.
    pub async fn choose_source(&self) -> Option<Source> {
        let prompt = ChoicePrompt::for_platform(self.platform);
        let index = self.chooser.choose(&prompt).await?;
        prompt.resolve(index)
    }

    /// Ask for a source, then [`acquire`](Self::acquire) from it.
    pub async fn acquire_with_choice(
        &self,
        allow_multiple: bool,
        selection_limit: u32,
    ) -> Result<Acquisition, PickerError> {
        match self.choose_source().await {
            Some(source) => self.acquire(source, allow_multiple, selection_limit).await,
            None => {
                debug!("source selector dismissed");
                Ok(Acquisition::Cancelled(CancelReason::SelectorDismissed))
            }
        }
    }
}
