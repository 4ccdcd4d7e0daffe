use image::imageops::{self, FilterType};
use sbci_format::{PixelSource, RgbImage};

use super::{from_buffer, to_buffer};
use crate::error::ConvertError;

/// Target dimensions for fitting `width` x `height` inside a `size` box.
///
/// The aspect ratio is kept and the longer side becomes `size`; neither side
/// drops below one pixel. A `size` of 0 keeps the source dimensions.
pub fn fit_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    if size == 0 || width == 0 || height == 0 {
        return (width, height);
    }
    let scale = (size as f64 / width as f64).min(size as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, size);
    let h = ((height as f64 * scale).round() as u32).clamp(1, size);
    (w, h)
}

/// Scale `image` to fit inside a `size` x `size` box.
///
/// Shrinking uses Lanczos3. Enlarging repeats source pixels so small
/// images keep hard edges.
pub fn fit_within(image: &RgbImage, size: u32) -> Result<RgbImage, ConvertError> {
    let (src_w, src_h) = (image.width(), image.height());
    let (dst_w, dst_h) = fit_dimensions(src_w, src_h, size);
    if (dst_w, dst_h) == (src_w, src_h) {
        return Ok(image.clone());
    }

    let filter = if dst_w < src_w {
        FilterType::Lanczos3
    } else {
        FilterType::Nearest
    };
    tracing::debug!(src_w, src_h, dst_w, dst_h, ?filter, "Resizing image");

    let resized = imageops::resize(&to_buffer(image)?, dst_w, dst_h, filter);
    from_buffer(&resized)
}
