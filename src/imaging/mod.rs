//! Image compression in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Bound** | [`calculate_bounded_dimensions`] (longer edge ≤ max, aspect kept) |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` at the requested quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a resize
//! - **Backend**: [`ResizeBackend`] trait + [`RustBackend`]
//! - **Compress**: [`ImageCompressor`], combining calculations + backend + URI style

pub mod backend;
mod calculations;
pub mod compress;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ResizeBackend};
pub use calculations::{calculate_bounded_dimensions, exceeds_bound, resolve_source_dimensions};
pub use compress::{CompressError, ImageCompressor};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
