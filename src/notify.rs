//! User-facing error reporting: error → message → toast.
//!
//! The pipeline never renders anything. When a pick fails outright it hands
//! the [`PickerError`] to an [`ErrorReporter`]; the stock
//! [`ToastErrorReporter`] translates it with [`user_message`] and shows an
//! error [`Toast`] through a [`ToastSink`] (the UI's toast host, or
//! [`LogSink`] on the command line).

use crate::acquire::PickerError;
use std::time::Duration;
use tracing::{debug, warn};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Receives top-level pipeline failures.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &PickerError);
}

/// Translate a picker failure into text suitable for a toast.
pub fn user_message(error: &PickerError) -> String {
    match error {
        PickerError::CameraUnavailable => "Camera is not available on this device.".to_string(),
        PickerError::PermissionRevoked => {
            "Permission denied. Enable access in Settings.".to_string()
        }
        PickerError::Io(e) => non_empty_or_generic(e.to_string()),
        PickerError::Platform(msg) => non_empty_or_generic(msg.clone()),
    }
}

fn non_empty_or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    Top,
    Bottom,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    pub position: ToastPosition,
    pub visibility: Duration,
    pub auto_hide: bool,
    pub top_offset: u32,
}

impl Toast {
    /// Build a toast, defaulting the title from `kind`.
    ///
    /// Returns `None` when there would be nothing to show.
    pub fn new(kind: ToastKind, title: Option<String>, message: Option<String>) -> Option<Self> {
        let title = title.unwrap_or_else(|| kind.default_title().to_string());
        let message = message.filter(|m| !m.is_empty());

        if title.is_empty() && message.is_none() {
            warn!("toast dropped: title or message should be provided");
            return None;
        }

        Some(Self {
            kind,
            title,
            message,
            position: ToastPosition::Top,
            visibility: Duration::from_millis(4000),
            auto_hide: true,
            top_offset: 50,
        })
    }

    /// Show at `position` instead of the top of the screen.
    pub fn at(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn success(message: impl Into<String>) -> Option<Self> {
        Self::new(ToastKind::Success, None, Some(message.into()))
    }

    pub fn error(message: impl Into<String>) -> Option<Self> {
        Self::new(ToastKind::Error, None, Some(message.into()))
    }

    pub fn info(message: impl Into<String>) -> Option<Self> {
        Self::new(ToastKind::Info, None, Some(message.into()))
    }
}

/// Displays toasts.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: Toast);
}

/// Writes toasts to the log. Used by the CLI.
#[derive(Debug, Default)]
pub struct LogSink;

impl ToastSink for LogSink {
    fn show(&self, toast: Toast) {
        let message = toast.message.as_deref().unwrap_or("");
        match toast.kind {
            ToastKind::Error => warn!(title = %toast.title, "{message}"),
            ToastKind::Success | ToastKind::Info => {
                tracing::info!(title = %toast.title, "{message}")
            }
        }
    }
}

/// Reports errors as error toasts.
pub struct ToastErrorReporter<S> {
    sink: S,
}

impl<S: ToastSink> ToastErrorReporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: ToastSink> ErrorReporter for ToastErrorReporter<S> {
    fn report(&self, error: &PickerError) {
        debug!(error = ?error, "reporting pick failure");
        if let Some(toast) = Toast::error(user_message(error)) {
            self.sink.show(toast);
        }
    }
}
