//! Avatar editing: a single-image picker bound to the current avatar URI.

use crate::config::PickerConfig;
use crate::pipeline::ImagePipeline;
use crate::session::{PickOutcome, PickerSession};
use crate::types::DEFAULT_MAX_DIMENSION;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Which source the avatar's edit button opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Gallery,
    Camera,
    /// Ask the user each time.
    #[default]
    Both,
}

type ChangeCallback = Box<dyn Fn(&str) + Send + Sync>;

pub struct AvatarPicker {
    session: PickerSession,
    mode: SourceMode,
    uri: Mutex<Option<String>>,
    on_change: Option<ChangeCallback>,
}

impl AvatarPicker {
    /// Avatar picker with the avatar defaults: 256px bound, quality 80.
    pub fn new(pipeline: Arc<ImagePipeline>, mode: SourceMode, initial_uri: Option<String>) -> Self {
        let config = PickerConfig {
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: 80,
            multiple: false,
            selection_limit: 0,
        };
        Self::with_config(pipeline, mode, initial_uri, config)
    }

    /// Multiple selection in `config` is ignored; an avatar is one image.
    pub fn with_config(
        pipeline: Arc<ImagePipeline>,
        mode: SourceMode,
        initial_uri: Option<String>,
        config: PickerConfig,
    ) -> Self {
        let config = PickerConfig {
            multiple: false,
            ..config
        };
        Self {
            session: PickerSession::new(pipeline, config),
            mode,
            uri: Mutex::new(initial_uri),
            on_change: None,
        }
    }

    pub fn on_change(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Current avatar URI, if any.
    pub fn uri(&self) -> Option<String> {
        self.uri.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the URI from outside (e.g. a profile reload). Does not notify.
    pub fn set_uri(&self, uri: Option<String>) {
        *self.uri.lock().unwrap_or_else(PoisonError::into_inner) = uri;
    }

    /// Run the edit flow for the configured mode.
    ///
    /// Returns the new URI when the avatar changed, `None` when the pick was
    /// cancelled, failed, or ignored because one was already open.
    pub async fn edit(&self) -> Option<String> {
        let outcome = match self.mode {
            SourceMode::Gallery => self.session.pick_from_gallery().await,
            SourceMode::Camera => self.session.capture_from_camera().await,
            SourceMode::Both => self.session.pick_from_both().await,
        };

        let PickOutcome::Finished(result) = outcome else {
            return None;
        };
        let image = result.images.into_iter().next()?;

        self.set_uri(Some(image.uri.clone()));
        if let Some(callback) = &self.on_change {
            callback(&image.uri);
        }
        Some(image.uri)
    }
}
