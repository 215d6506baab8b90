//! # Image Intake
//!
//! Acquire photos from the camera or the photo library and hand back small,
//! predictable JPEGs: every image is downscaled so its longer edge fits a
//! bound (aspect ratio kept, never upscaled) and re-encoded at a chosen
//! quality, in the order the user picked them.
//!
//! # Architecture: Acquire, then Compress
//!
//! ```text
//! PickRequest ─→ SourceAcquirer ─→ RawAsset[] ─→ ImageCompressor (per asset, in order)
//!                  │                                   │
//!                  │ camera | library | ask the user   │ bound, resize, re-encode, URI
//!                  ▼                                   ▼
//!            Cancelled / Error                    CompressedImage[] ─→ PickResult
//! ```
//!
//! The OS-facing pieces (camera, library, the camera-vs-gallery selector, the
//! resize engine, and toast display) are traits, so the pipeline logic is
//! tested against scripted doubles and runs unchanged on top of the
//! filesystem adapters in [`desktop`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Request/result records shared by every stage |
//! | [`acquire`] | Picker and chooser seams, platform prompts, [`acquire::SourceAcquirer`] |
//! | [`imaging`] | Bounded-size math, the resize backend trait, the `image`-crate backend, the per-asset compressor |
//! | [`pipeline`] | Acquire → compress-each → result, with the failure policy |
//! | [`session`] | Per-instance host: re-entrancy guard and picked-image list |
//! | [`avatar`] | Single-image picker bound to an avatar URI |
//! | [`notify`] | Error reporting, user messages, toasts |
//! | [`platform`] | Android/iOS differences: URI style, chooser style |
//! | [`naming`] | Deterministic output file names |
//! | [`config`] | `image-intake.toml` loading and validation |
//! | [`desktop`] | Filesystem picker and terminal chooser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Cancellation Is Not an Error
//!
//! Backing out of the picker, declining permission, or dismissing the
//! selector all produce `PickResult { cancelled: true }` and nothing is
//! reported to the user. Only unexpected picker failures reach the
//! [`notify::ErrorReporter`], and they come back as an empty result with
//! `cancelled: false` so callers can tell the two apart.
//!
//! ## Sequential Compression
//!
//! Assets are compressed one at a time. Output order must match pick order,
//! and on a phone the decode buffers of several large photos at once are
//! what runs the process out of memory. Each resize still runs on the
//! blocking pool so the async caller is never stalled.
//!
//! ## One Guard per Session
//!
//! The "picker already open" flag belongs to each [`session::PickerSession`],
//! not the process. Two avatar pickers on one screen do not block each
//! other; a double tap on the same one opens a single picker.

pub mod acquire;
pub mod avatar;
pub mod config;
pub mod desktop;
pub mod imaging;
pub mod naming;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
