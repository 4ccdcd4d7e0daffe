//! Color reduction with libimagequant
//!
//! Images with more distinct colors than the sbci palette has slots are
//! reduced before encoding. Floyd-Steinberg dithering is on by default.

use sbci_format::{Color, PaletteCollector, PixelSource, RgbImage};

use crate::error::ConvertError;

/// Colors available in an sbci image.
pub const MAX_COLORS: u32 = 16;

/// Reduce `image` to at most `max_colors` distinct colors.
///
/// Images already within the limit are returned unchanged.
pub fn quantize(
    image: &RgbImage,
    max_colors: u32,
    dither: bool,
) -> Result<RgbImage, ConvertError> {
    let distinct = image
        .pixels()
        .iter()
        .copied()
        .collect::<PaletteCollector>()
        .len();
    if distinct <= max_colors as usize {
        return Ok(image.clone());
    }

    let (width, height) = (image.width(), image.height());
    let rgba: Vec<imagequant::RGBA> = image
        .pixels()
        .iter()
        .map(|c| imagequant::RGBA::new(c.r, c.g, c.b, 255))
        .collect();

    let mut attr = imagequant::new();
    attr.set_max_colors(max_colors.clamp(2, 256))?;
    let mut liq_image = attr.new_image(rgba, width as usize, height as usize, 0.0)?;
    let mut result = attr.quantize(&mut liq_image)?;
    result.set_dithering_level(if dither { 1.0 } else { 0.0 })?;
    let (palette, indices) = result.remapped(&mut liq_image)?;

    tracing::debug!(distinct, reduced = palette.len(), dither, "Quantized image");

    let pixels = indices
        .iter()
        .map(|&i| {
            palette
                .get(i as usize)
                .map(|p| Color::new(p.r, p.g, p.b))
                .ok_or_else(|| ConvertError::Quantize(format!("palette index {i} out of range")))
        })
        .collect::<Result<Vec<Color>, _>>()?;

    Ok(RgbImage::new(width, height, pixels)?)
}
