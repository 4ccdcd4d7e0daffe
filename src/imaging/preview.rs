use std::io::Cursor;

use sbci_format::{PaletteCollector, PixelSource, RgbImage};

use super::ensure_dimensions;
use crate::error::ConvertError;

/// Encode the quantized image as a PNG preview.
///
/// Images with at most 16 colors are written as 4-bit indexed PNGs with the
/// image's own colors in the PLTE chunk; anything else falls back to 8-bit
/// RGB.
pub fn encode_preview(image: &RgbImage) -> Result<Vec<u8>, ConvertError> {
    ensure_dimensions(image)?;

    let colors = image
        .pixels()
        .iter()
        .copied()
        .collect::<PaletteCollector>()
        .into_colors();

    if colors.len() > 16 {
        let rgb: Vec<u8> = image.pixels().iter().flat_map(|c| c.to_bytes()).collect();
        return encode_png(
            image,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            &rgb,
        );
    }

    let plte: Vec<u8> = colors.iter().flat_map(|c| c.to_bytes()).collect();
    let indices: Vec<u8> = image
        .pixels()
        .iter()
        .map(|c| colors.iter().position(|p| p == c).unwrap_or(0) as u8)
        .collect();
    let packed = pack_nibbles(&indices, image.width());

    encode_png(
        image,
        png::ColorType::Indexed,
        png::BitDepth::Four,
        Some(&plte),
        &packed,
    )
}

fn encode_png(
    image: &RgbImage,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Pack 4-bit indices two per byte, high nibble first, rows padded to a byte.
fn pack_nibbles(indices: &[u8], width: u32) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let bytes_per_row = (width as usize).div_ceil(2);
    let mut packed = Vec::with_capacity(bytes_per_row * indices.len() / width as usize);

    for row in indices.chunks(width as usize) {
        for pair in row.chunks(2) {
            let hi = pair[0] & 0x0f;
            let lo = pair.get(1).map_or(0, |v| v & 0x0f);
            packed.push((hi << 4) | lo);
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::decode_image;
    use sbci_format::Color;

    #[test]
    fn test_pack_nibbles_odd_width() {
        assert_eq!(
            pack_nibbles(&[1, 2, 3, 4, 5, 6], 3),
            vec![0x12, 0x30, 0x45, 0x60]
        );
    }

    #[test]
    fn test_pack_nibbles_zero_width() {
        assert!(pack_nibbles(&[], 0).is_empty());
    }

    #[test]
    fn test_zero_width_preview_rejected() {
        let image = RgbImage::new(0, 3, Vec::new()).unwrap();
        assert!(matches!(
            encode_preview(&image),
            Err(ConvertError::UnsupportedDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_preview_is_indexed_and_decodes_back() {
        let pixels = vec![
            Color::new(240, 240, 240),
            Color::new(242, 178, 51),
            Color::new(17, 17, 17),
            Color::new(240, 240, 240),
            Color::new(17, 17, 17),
            Color::new(242, 178, 51),
        ];
        let image = RgbImage::new(3, 2, pixels).unwrap();
        let png_data = encode_preview(&image).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().color_type, png::ColorType::Indexed);
        assert_eq!(reader.info().bit_depth, png::BitDepth::Four);

        assert_eq!(decode_image(&png_data).unwrap(), image);
    }

    #[test]
    fn test_many_colors_fall_back_to_rgb() {
        let pixels = (0..20).map(|i| Color::new(i * 10, 0, 0)).collect();
        let image = RgbImage::new(20, 1, pixels).unwrap();
        let png_data = encode_preview(&image).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&png_data));
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().color_type, png::ColorType::Rgb);
        assert_eq!(decode_image(&png_data).unwrap(), image);
    }
}
