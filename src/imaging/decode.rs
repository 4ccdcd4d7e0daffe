use std::io::Cursor;

use image::ImageReader;
use sbci_format::{Color, RgbImage};

use super::ensure_dimensions;
use crate::error::ConvertError;

/// Decode an image file into opaque RGB.
///
/// The format is detected from the data (PNG, JPEG, GIF, BMP). Transparency
/// is composited against white.
pub fn decode_image(data: &[u8]) -> Result<RgbImage, ConvertError> {
    let decoded = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Decoded image"
    );

    let rgba = decoded.into_rgba8();
    let pixels: Vec<Color> = rgba
        .pixels()
        .map(|p| composite_on_white(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();

    let image = RgbImage::new(rgba.width(), rgba.height(), pixels)?;
    ensure_dimensions(&image)?;
    Ok(image)
}

/// Alpha-composite one pixel against white.
fn composite_on_white(r: u8, g: u8, b: u8, a: u8) -> Color {
    match a {
        255 => Color::new(r, g, b),
        0 => Color::new(255, 255, 255),
        _ => {
            let af = a as u16;
            let blend = |v: u8| ((v as u16 * af + 255 * (255 - af)) / 255) as u8;
            Color::new(blend(r), blend(g), blend(b))
        }
    }
}
