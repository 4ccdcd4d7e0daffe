//! Raster helpers around the sbci encoder
//!
//! Loading an image, fitting it into the target box, reducing it to at most
//! 16 colors and writing the quantized preview back out as PNG.

pub mod decode;
pub mod preview;
pub mod quantize;
pub mod resize;

pub use decode::decode_image;
pub use preview::encode_preview;
pub use quantize::{quantize, MAX_COLORS};
pub use resize::fit_within;

use image::{ImageBuffer, Rgb};
use sbci_format::{Color, PixelSource, RgbImage};

use crate::error::ConvertError;

type RgbBuffer = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Fail on images without pixels.
pub fn ensure_dimensions<S: PixelSource>(image: &S) -> Result<(), ConvertError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ConvertError::UnsupportedDimensions {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

fn to_buffer(image: &RgbImage) -> Result<RgbBuffer, ConvertError> {
    let raw: Vec<u8> = image.pixels().iter().flat_map(|c| c.to_bytes()).collect();
    ImageBuffer::from_raw(image.width(), image.height(), raw).ok_or(
        ConvertError::UnsupportedDimensions {
            width: image.width(),
            height: image.height(),
        },
    )
}

fn from_buffer(buffer: &RgbBuffer) -> Result<RgbImage, ConvertError> {
    let pixels = buffer
        .pixels()
        .map(|Rgb([r, g, b])| Color::new(*r, *g, *b))
        .collect();
    Ok(RgbImage::new(buffer.width(), buffer.height(), pixels)?)
}
