//! CLI output formatting.
//!
//! Each result has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ```text
//! 001 256x128 file:///home/me/.image-intake/beach-3f2a9c01d4e7.jpg
//! 002 85x256 file:///home/me/.image-intake/tower-9b01c2aa7f30.jpg
//! 2 images
//! ```

use crate::types::{CompressedImage, PickResult};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn image_line(index: usize, image: &CompressedImage) -> String {
    format!(
        "{} {}x{} {}",
        format_index(index),
        image.width,
        image.height,
        image.uri
    )
}

fn count_line(n: usize) -> String {
    match n {
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    }
}

/// Lines for a list of compressed images plus a count footer.
pub fn format_images(images: &[CompressedImage]) -> Vec<String> {
    let mut lines: Vec<String> = images
        .iter()
        .enumerate()
        .map(|(i, img)| image_line(i + 1, img))
        .collect();
    lines.push(count_line(images.len()));
    lines
}

/// Lines for a pick outcome.
///
/// A cancellation prints a single `Cancelled` line; a non-cancelled result
/// with no images is reported as a failed pick.
pub fn format_pick_result(result: &PickResult) -> Vec<String> {
    if result.cancelled {
        return vec!["Cancelled".to_string()];
    }
    if result.images.is_empty() {
        return vec!["No images (pick failed)".to_string()];
    }
    format_images(&result.images)
}

pub fn print_pick_result(result: &PickResult) {
    for line in format_pick_result(result) {
        println!("{}", line);
    }
}

pub fn print_images(images: &[CompressedImage]) {
    for line in format_images(images) {
        println!("{}", line);
    }
}
