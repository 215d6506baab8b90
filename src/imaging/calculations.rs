//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Resolve the dimensions the bounding math should work from.
///
/// Each side falls back to `max_dimension` when it is unknown. A reported
/// size of zero is treated as unknown.
pub fn resolve_source_dimensions(
    width: Option<u32>,
    height: Option<u32>,
    max_dimension: u32,
) -> (u32, u32) {
    let known = |v: Option<u32>| v.filter(|&v| v > 0).unwrap_or(max_dimension);
    (known(width), known(height))
}

/// Whether an image of `source` size exceeds the bound on either edge.
pub fn exceeds_bound(source: (u32, u32), max_dimension: u32) -> bool {
    source.0 > max_dimension || source.1 > max_dimension
}

/// Clamp the longer edge of `source` to `max_dimension`, preserving aspect ratio.
///
/// Images already inside the bound are returned unchanged (no upscaling).
/// Otherwise the width is tried as the binding edge first; if the scaled
/// height still overflows, the height becomes the binding edge instead.
/// Fractional results are rounded to the nearest pixel, never below 1.
///
/// # Examples
/// ```
/// # use image_intake::imaging::calculate_bounded_dimensions;
/// // Landscape: width binds
/// assert_eq!(calculate_bounded_dimensions((4000, 2000), 256), (256, 128));
///
/// // Portrait: width attempt overflows (256x768), height binds
/// assert_eq!(calculate_bounded_dimensions((1000, 3000), 256), (85, 256));
/// ```
pub fn calculate_bounded_dimensions(source: (u32, u32), max_dimension: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if !exceeds_bound(source, max_dimension) {
        return source;
    }

    let max = max_dimension as f64;

    // Width-bound attempt
    let mut ratio = max / src_w as f64;
    let mut width = max;
    let mut height = src_h as f64 * ratio;

    if height > max {
        // Height-bound fallback
        ratio = max / src_h as f64;
        height = max;
        width = src_w as f64 * ratio;
    }

    (round_px(width), round_px(height))
}

fn round_px(value: f64) -> u32 {
    (value.round() as u32).max(1)
}
