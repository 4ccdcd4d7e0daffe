//! SnfpWriter -- encoder for sbci images.
//!
//! [`SnfpWriter`] runs the whole pipeline for one image: header, color
//! collection, slot assignment, palette table and pixel indices. The output
//! is assembled in memory and only handed to a sink once complete, so a
//! failed encode never leaves partial output behind.

use std::io::Write;

use super::error::EncodeError;
use super::header::{color_record, Header, COLOR_RECORD_LEN, HEADER_LEN};
use super::mode::{PaletteTable, SnfpMode};
use super::source::PixelSource;
use crate::assign::{SlotAssigner, SlotTable};
use crate::color::Color;
use crate::palette::{PaletteBuilder, PaletteCollector, REFERENCE_PALETTE_LEN};

/// Slot written for pixels whose color was dropped during assignment.
const FALLBACK_SLOT: u8 = 0;

/// Summary of one encode, for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    pub width: u32,
    pub height: u32,
    /// Distinct colors found in the image
    pub unique_colors: usize,
    /// Slots that received a representative color
    pub occupied_slots: usize,
    /// Colors without a slot; their pixels were written as slot 0
    pub dropped: Vec<Color>,
    /// Total encoded size in bytes
    pub bytes: usize,
}

/// Encoder for the sbci format.
///
/// # Design
///
/// - Constructor takes the [`SnfpMode`]; everything else has defaults
///   (built-in palette, sparse palette table, lenient overflow)
/// - Configuration methods consume and return `self`
/// - Encoding takes `&self`, so one writer can encode many images; no
///   state survives between calls
///
/// # Example
///
/// ```
/// use sbci_format::{Color, RgbImage, SnfpMode, SnfpWriter};
///
/// let pixels = vec![
///     Color::new(240, 240, 240),
///     Color::new(242, 178, 51),
///     Color::new(240, 240, 240),
///     Color::new(17, 17, 17),
/// ];
/// let image = RgbImage::new(2, 2, pixels).unwrap();
///
/// let bytes = SnfpWriter::new(SnfpMode::Binary).encode(&image).unwrap();
///
/// assert_eq!(&bytes[0..4], b"sbci");
/// assert_eq!(&bytes[bytes.len() - 4..], &[0, 1, 0, 15]);
/// ```
#[derive(Debug, Clone)]
pub struct SnfpWriter {
    mode: SnfpMode,
    palette: PaletteBuilder,
    palette_table: PaletteTable,
    strict: bool,
}

impl SnfpWriter {
    pub fn new(mode: SnfpMode) -> Self {
        Self {
            mode,
            palette: PaletteBuilder::cc_default(),
            palette_table: PaletteTable::default(),
            strict: false,
        }
    }

    /// Create a writer from a raw mode value.
    ///
    /// Fails with [`EncodeError::UnsupportedMode`] for unknown values.
    pub fn from_raw_mode(mode: u8) -> Result<Self, EncodeError> {
        Ok(Self::new(SnfpMode::try_from(mode)?))
    }

    /// Use a different reference palette.
    #[inline]
    pub fn palette(mut self, palette: PaletteBuilder) -> Self {
        self.palette = palette;
        self
    }

    /// Choose sparse or full palette table output.
    #[inline]
    pub fn palette_table(mut self, layout: PaletteTable) -> Self {
        self.palette_table = layout;
        self
    }

    /// Fail with [`EncodeError::PaletteOverflow`] instead of falling back to
    /// slot 0 when colors are dropped.
    #[inline]
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Encode an image into a byte buffer.
    pub fn encode<S: PixelSource>(&self, source: &S) -> Result<Vec<u8>, EncodeError> {
        self.encode_with_report(source).map(|(bytes, _)| bytes)
    }

    /// Encode an image and describe what happened.
    pub fn encode_with_report<S: PixelSource>(
        &self,
        source: &S,
    ) -> Result<(Vec<u8>, EncodeReport), EncodeError> {
        match self.mode {
            SnfpMode::Binary => self.encode_binary(source),
            SnfpMode::Ascii => Err(EncodeError::NotImplemented(SnfpMode::Ascii)),
        }
    }

    /// Encode an image and write it to `sink` in one ordered pass.
    ///
    /// Nothing is written if encoding fails.
    pub fn write_to<W: Write, S: PixelSource>(
        &self,
        sink: &mut W,
        source: &S,
    ) -> Result<EncodeReport, EncodeError> {
        let (bytes, report) = self.encode_with_report(source)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(report)
    }

    fn encode_binary<S: PixelSource>(
        &self,
        source: &S,
    ) -> Result<(Vec<u8>, EncodeReport), EncodeError> {
        let header = Header::new(source.width(), source.height());
        tracing::debug!(
            width = header.width,
            height = header.height,
            "Collecting color space"
        );

        // 1. Distinct colors in scan order
        let collector: PaletteCollector = source.scan().collect();
        let observed = collector.into_colors();

        // 2. Slot assignment
        let assignment = SlotAssigner::new(&self.palette).assign(&observed);
        if self.strict && assignment.has_overflow() {
            return Err(EncodeError::PaletteOverflow {
                dropped: assignment.dropped().to_vec(),
            });
        }
        let (table, dropped) = assignment.into_parts();

        // 3. Header and palette table
        let mut out = Vec::with_capacity(
            HEADER_LEN + REFERENCE_PALETTE_LEN * COLOR_RECORD_LEN + header.pixel_count(),
        );
        out.extend_from_slice(&header.to_bytes());
        self.write_palette_table(&mut out, &table);

        // 4. Pixel indices
        let lookup = table.lookup();
        out.extend(
            source
                .scan()
                .map(|color| lookup.get(&color).copied().unwrap_or(FALLBACK_SLOT)),
        );

        if !dropped.is_empty() {
            tracing::warn!(
                dropped = dropped.len(),
                "Some colors had no free slot and were encoded as slot 0"
            );
        }

        let report = EncodeReport {
            width: header.width,
            height: header.height,
            unique_colors: observed.len(),
            occupied_slots: table.occupied_count(),
            dropped,
            bytes: out.len(),
        };
        tracing::debug!(
            unique = report.unique_colors,
            slots = report.occupied_slots,
            bytes = report.bytes,
            "Encoded image"
        );

        Ok((out, report))
    }

    fn write_palette_table(&self, out: &mut Vec<u8>, table: &SlotTable) {
        match self.palette_table {
            PaletteTable::Sparse => {
                for (slot, color) in table.occupied() {
                    out.extend_from_slice(&color_record(slot as u8, color));
                }
            }
            PaletteTable::Full => {
                for slot in 0..REFERENCE_PALETTE_LEN {
                    let color = table.get(slot).unwrap_or(Color::new(0, 0, 0));
                    out.extend_from_slice(&color_record(slot as u8, color));
                }
            }
        }
    }
}

impl Default for SnfpWriter {
    fn default() -> Self {
        Self::new(SnfpMode::Binary)
    }
}
