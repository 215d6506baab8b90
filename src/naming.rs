//! Output file naming for compressed images.
//!
//! A compressed file is named after its source plus a short digest of the
//! encoding inputs:
//!
//! ```text
//! IMG_0042.png  @ 256x128 q80  →  IMG_0042-3f9a1c02b7e4.jpg
//! ```
//!
//! The digest covers the source path, target size, and quality, so the same
//! asset compressed with the same policy always lands on the same file and a
//! policy change never overwrites an earlier result.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex characters of digest kept in file names.
const DIGEST_LEN: usize = 12;

/// Fallback stem when the source has no usable file name.
const FALLBACK_STEM: &str = "image";

/// SHA-256 of the inputs that determine a compressed file's content.
pub fn hash_compress_params(source: &Path, width: u32, height: u32, quality: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"compress\0");
    hasher.update(source.to_string_lossy().as_bytes());
    hasher.update(b"\0");
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    hasher.update(quality.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// File name for a compressed copy of `source`.
pub fn compressed_file_name(source: &Path, width: u32, height: u32, quality: u32) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_stem)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    let digest = hash_compress_params(source, width, height, quality);
    format!("{}-{}.jpg", stem, &digest[..DIGEST_LEN])
}

/// Keep names portable: anything outside `[A-Za-z0-9._-]` becomes `_`.
fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
