//! Nearest-color NFP writer.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::codec::PixelSource;
use crate::color::Color;
use crate::palette::{slot_blit, PaletteBuilder, PaletteCollector};

/// Writes images as NFP text: one blit character per pixel, one line per row.
///
/// ```
/// use sbci_format::{Color, NfpWriter, RgbImage};
///
/// let pixels = vec![
///     Color::new(250, 250, 250),
///     Color::new(0, 0, 0),
///     Color::new(200, 80, 70),
///     Color::new(130, 100, 80),
/// ];
/// let image = RgbImage::new(2, 2, pixels).unwrap();
///
/// assert_eq!(NfpWriter::default().encode(&image), "0f\nec\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NfpWriter {
    palette: PaletteBuilder,
}

impl NfpWriter {
    pub fn new(palette: PaletteBuilder) -> Self {
        Self { palette }
    }

    /// Render the whole image as NFP text.
    pub fn encode<S: PixelSource>(&self, source: &S) -> String {
        let translation = self.translation_map(source);

        let mut out = String::with_capacity((source.width() as usize + 1) * source.height() as usize);
        for y in 0..source.height() {
            for x in 0..source.width() {
                let color = source.pixel(x, y);
                out.push(translation.get(&color).copied().unwrap_or('0'));
            }
            out.push('\n');
        }
        out
    }

    /// Render and write to `sink`.
    pub fn write_to<W: Write, S: PixelSource>(&self, sink: &mut W, source: &S) -> io::Result<()> {
        let text = self.encode(source);
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }

    /// Blit character of the nearest reference color for every distinct color.
    fn translation_map<S: PixelSource>(&self, source: &S) -> HashMap<Color, char> {
        let collector: PaletteCollector = source.scan().collect();
        let map: HashMap<Color, char> = collector
            .into_colors()
            .into_iter()
            .map(|color| (color, slot_blit(self.palette.nearest_index(color))))
            .collect();
        tracing::debug!(colors = map.len(), "Built NFP translation map");
        map
    }
}
