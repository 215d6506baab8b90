//! Desktop stand-ins for the phone's platform primitives.
//!
//! [`FsPicker`] treats a directory as the photo library and a single file as
//! the camera's capture. [`TerminalChooser`] asks the camera-vs-gallery
//! question on stderr and reads the answer from stdin. Together they let the
//! whole pipeline run from the CLI.

use crate::acquire::{
    Acquisition, ChoicePrompt, NativePicker, PickerError, PickerOptions, SourceChooser,
};
use crate::imaging::rust_backend::is_supported_image;
use crate::types::RawAsset;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem-backed picker.
///
/// The library is every supported image under `library`, in file-name
/// order; the selection limit keeps the first N. The camera "captures"
/// the file at `camera`.
#[derive(Debug, Clone, Default)]
pub struct FsPicker {
    library: Option<PathBuf>,
    camera: Option<PathBuf>,
}

impl FsPicker {
    pub fn new(library: Option<PathBuf>, camera: Option<PathBuf>) -> Self {
        Self { library, camera }
    }

    pub fn library(dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(dir.into()), None)
    }

    pub fn camera(file: impl Into<PathBuf>) -> Self {
        Self::new(None, Some(file.into()))
    }
}

/// Build a raw asset for `path`, reading dimensions from the header when possible.
fn asset_for(path: &Path) -> RawAsset {
    let uri = path.to_string_lossy().into_owned();
    match image::image_dimensions(path) {
        Ok((w, h)) => RawAsset::new(uri, w, h),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "dimensions unavailable");
            RawAsset::without_dimensions(uri)
        }
    }
}

/// Supported images under `dir`, sorted by file name.
fn library_files(dir: &Path) -> Result<Vec<PathBuf>, PickerError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PickerError::Platform(e.to_string()))?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[async_trait]
impl NativePicker for FsPicker {
    async fn launch_camera(&self, _options: &PickerOptions) -> Result<Acquisition, PickerError> {
        let path = self.camera.clone().ok_or(PickerError::CameraUnavailable)?;
        tokio::fs::metadata(&path).await?;
        let asset = tokio::task::spawn_blocking(move || asset_for(&path))
            .await
            .map_err(|e| PickerError::Platform(format!("camera read aborted: {e}")))?;
        Ok(Acquisition::Assets(vec![asset]))
    }

    async fn launch_library(&self, options: &PickerOptions) -> Result<Acquisition, PickerError> {
        let dir = self
            .library
            .clone()
            .ok_or_else(|| PickerError::Platform("no photo library configured".into()))?;

        let limit = options.selection_limit as usize;
        let assets = tokio::task::spawn_blocking(move || -> Result<Vec<RawAsset>, PickerError> {
            let files = library_files(&dir)?;
            let take = if limit == 0 { files.len() } else { limit };
            Ok(files.into_iter().take(take).map(|p| asset_for(&p)).collect())
        })
        .await
        .map_err(|e| PickerError::Platform(format!("library scan aborted: {e}")))??;

        if assets.is_empty() {
            warn!("photo library has no supported images");
        }
        Ok(Acquisition::Assets(assets))
    }
}

/// Render a prompt as terminal lines, options numbered from 1.
pub fn format_prompt(prompt: &ChoicePrompt) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = prompt.title {
        lines.push(title.to_string());
    }
    if let Some(message) = prompt.message {
        lines.push(message.to_string());
    }
    for (i, option) in prompt.options.iter().enumerate() {
        lines.push(format!("  {}) {}", i + 1, option.label));
    }
    lines
}

/// Parse a typed answer: an option number (1-based) or a label, case-insensitive.
///
/// Returns the 0-based option index, or `None` for empty or unrecognized input.
pub fn parse_choice(line: &str, prompt: &ChoicePrompt) -> Option<usize> {
    let answer = line.trim();
    if answer.is_empty() {
        return None;
    }
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=prompt.options.len()).contains(&n).then(|| n - 1);
    }
    prompt
        .options
        .iter()
        .position(|o| o.label.eq_ignore_ascii_case(answer))
}

/// Asks on stderr, reads one line from stdin. EOF counts as a dismissal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalChooser;

#[async_trait]
impl SourceChooser for TerminalChooser {
    async fn choose(&self, prompt: &ChoicePrompt) -> Option<usize> {
        for line in format_prompt(prompt) {
            eprintln!("{line}");
        }
        eprint!("> ");

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => parse_choice(&line, prompt),
            Err(e) => {
                warn!(error = %e, "could not read choice");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::test_helpers::create_test_jpeg;
    use tempfile::TempDir;

    fn opts(limit: u32) -> PickerOptions {
        PickerOptions::new(true, limit)
    }

    fn uris(acq: Acquisition) -> Vec<String> {
        match acq {
            Acquisition::Assets(a) => a.into_iter().map(|a| a.uri).collect(),
            other => panic!("expected assets, got {other:?}"),
        }
    }

    // =========================================================================
    // FsPicker
    // =========================================================================

    #[tokio::test]
    async fn library_lists_images_in_name_order() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("b.jpg"), 20, 10);
        create_test_jpeg(&tmp.path().join("a.jpg"), 30, 15);
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let picker = FsPicker::library(tmp.path());
        let found = uris(picker.launch_library(&opts(0)).await.unwrap());

        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("a.jpg"));
        assert!(found[1].ends_with("b.jpg"));
    }

    #[tokio::test]
    async fn library_reads_dimensions() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("a.jpg"), 64, 32);

        let picker = FsPicker::library(tmp.path());
        let Acquisition::Assets(assets) = picker.launch_library(&opts(0)).await.unwrap() else {
            panic!("expected assets");
        };
        assert_eq!(assets[0].width, Some(64));
        assert_eq!(assets[0].height, Some(32));
    }

    #[tokio::test]
    async fn library_respects_selection_limit() {
        let tmp = TempDir::new().unwrap();
        for name in ["1.jpg", "2.jpg", "3.jpg"] {
            create_test_jpeg(&tmp.path().join(name), 8, 8);
        }

        let picker = FsPicker::library(tmp.path());
        let found = uris(picker.launch_library(&opts(2)).await.unwrap());
        assert_eq!(found.len(), 2);
        assert!(found[1].ends_with("2.jpg"));
    }

    #[tokio::test]
    async fn empty_library_returns_no_assets() {
        let tmp = TempDir::new().unwrap();
        let picker = FsPicker::library(tmp.path());
        assert_eq!(
            picker.launch_library(&opts(0)).await.unwrap(),
            Acquisition::Assets(vec![])
        );
    }

    #[tokio::test]
    async fn missing_library_is_an_error() {
        let picker = FsPicker::default();
        assert!(matches!(
            picker.launch_library(&opts(0)).await,
            Err(PickerError::Platform(_))
        ));
    }

    #[tokio::test]
    async fn camera_without_capture_file_is_unavailable() {
        let picker = FsPicker::default();
        assert!(matches!(
            picker.launch_camera(&opts(1)).await,
            Err(PickerError::CameraUnavailable)
        ));
    }

    #[tokio::test]
    async fn camera_with_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let picker = FsPicker::camera(tmp.path().join("nope.jpg"));
        assert!(matches!(
            picker.launch_camera(&opts(1)).await,
            Err(PickerError::Io(_))
        ));
    }

    #[tokio::test]
    async fn camera_returns_single_capture() {
        let tmp = TempDir::new().unwrap();
        let shot = tmp.path().join("shot.jpg");
        create_test_jpeg(&shot, 40, 20);

        let picker = FsPicker::camera(&shot);
        let found = uris(picker.launch_camera(&opts(1)).await.unwrap());
        assert_eq!(found, vec![shot.to_string_lossy().into_owned()]);
    }

    #[tokio::test]
    async fn camera_capture_reports_dimensions() {
        let tmp = TempDir::new().unwrap();
        let shot = tmp.path().join("shot.jpg");
        create_test_jpeg(&shot, 48, 36);

        let picker = FsPicker::camera(&shot);
        let Acquisition::Assets(assets) = picker.launch_camera(&opts(1)).await.unwrap() else {
            panic!("expected assets");
        };
        assert_eq!((assets[0].width, assets[0].height), (Some(48), Some(36)));
    }

    #[tokio::test]
    async fn camera_file_without_image_header_has_no_dimensions() {
        let tmp = TempDir::new().unwrap();
        let shot = tmp.path().join("shot.jpg");
        std::fs::write(&shot, b"not a jpeg").unwrap();

        let picker = FsPicker::camera(&shot);
        let Acquisition::Assets(assets) = picker.launch_camera(&opts(1)).await.unwrap() else {
            panic!("expected assets");
        };
        assert_eq!((assets[0].width, assets[0].height), (None, None));
    }

    // =========================================================================
    // Terminal prompt
    // =========================================================================

    #[test]
    fn android_prompt_lines() {
        let prompt = ChoicePrompt::for_platform(Platform::Android);
        assert_eq!(
            format_prompt(&prompt),
            vec![
                "Select Image",
                "Choose option",
                "  1) Camera",
                "  2) Gallery",
                "  3) Cancel",
            ]
        );
    }

    #[test]
    fn ios_prompt_has_no_title() {
        let prompt = ChoicePrompt::for_platform(Platform::Ios);
        let lines = format_prompt(&prompt);
        assert_eq!(lines[0], "  1) Cancel");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn parse_choice_by_number_and_label() {
        let prompt = ChoicePrompt::for_platform(Platform::Android);
        assert_eq!(parse_choice("1\n", &prompt), Some(0));
        assert_eq!(parse_choice(" 2 ", &prompt), Some(1));
        assert_eq!(parse_choice("gallery", &prompt), Some(1));
        assert_eq!(parse_choice("CAMERA", &prompt), Some(0));
    }

    #[test]
    fn parse_choice_rejects_junk() {
        let prompt = ChoicePrompt::for_platform(Platform::Android);
        assert_eq!(parse_choice("", &prompt), None);
        assert_eq!(parse_choice("0", &prompt), None);
        assert_eq!(parse_choice("4", &prompt), None);
        assert_eq!(parse_choice("photos", &prompt), None);
    }
}
