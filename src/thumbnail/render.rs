//! Thumbnail sizing and rendering.
//!
//! Decoded slices are floating-point intensities. Rendering maps them
//! linearly onto 8-bit gray (slice minimum to 0, maximum to 255) and then
//! shrinks the result to fit the requested box.
//!
//! # Design Decisions
//!
//! - **Width first**: an over-wide slice is fitted to the maximum width, then
//!   the height is checked against the maximum height.
//! - **Never upscale**: slices already inside the box are returned at their
//!   original size.

use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::error::ThumbnailError;
use crate::source::PixelArray;

/// Rendered 8-bit grayscale thumbnail.
///
/// Pixel data is shared, so clones are cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Row-major gray levels, `width * height` bytes
    pub pixels: Bytes,
}

impl Thumbnail {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Copy into an `image` buffer, e.g. for saving.
    pub fn to_gray_image(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width, self.height, self.pixels.to_vec())
    }
}

/// Size of a thumbnail of an `original` slice fitted into `max`.
pub fn thumbnail_size(original: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = max;
    let (mut x, mut y) = (u64::from(original.0), u64::from(original.1));

    if x > u64::from(max_w) {
        y = (y * u64::from(max_w) / x).max(1);
        x = u64::from(max_w);
    }
    if y > u64::from(max_h) {
        x = (x * u64::from(max_h) / y).max(1);
        y = u64::from(max_h);
    }

    // Both values are bounded by the originals, which were u32
    (x as u32, y as u32)
}

/// Render a 2D slice, optionally fitted into `target = (max_w, max_h)`.
pub fn render(
    slice: &PixelArray,
    target: Option<(u32, u32)>,
    label: &str,
) -> Result<Thumbnail, ThumbnailError> {
    if slice.is_empty() {
        return Err(ThumbnailError::EmptySlice(label.to_string()));
    }

    let width = slice.width() as u32;
    let height = slice.height() as u32;
    let gray = normalize(slice);

    let image = GrayImage::from_raw(width, height, gray)
        .ok_or_else(|| ThumbnailError::EmptySlice(label.to_string()))?;

    let image = match target {
        Some(max) => {
            let (w, h) = thumbnail_size((width, height), max);
            if (w, h) == (width, height) {
                image
            } else {
                imageops::resize(&image, w, h, FilterType::Triangle)
            }
        }
        None => image,
    };

    let (width, height) = image.dimensions();
    Ok(Thumbnail {
        width,
        height,
        pixels: Bytes::from(image.into_raw()),
    })
}

/// Map the first plane of `slice` onto 0..=255. Constant slices map to 0.
fn normalize(slice: &PixelArray) -> Vec<u8> {
    let (lo, hi) = slice.min_max().unwrap_or((0.0, 0.0));
    let range = hi - lo;

    slice
        .plane_values()
        .map(|v| {
            if !v.is_finite() || range <= 0.0 {
                0
            } else {
                (((v - lo) / range) * 255.0).round().clamp(0.0, 255.0) as u8
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
