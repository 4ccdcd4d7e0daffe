//! Reader for sbci images.

use super::error::DecodeError;
use super::header::{Header, COLOR_RECORD_LEN, HEADER_LEN};
use crate::assign::SlotTable;
use crate::color::Color;
use crate::palette::REFERENCE_PALETTE_LEN;

/// A decoded sbci image: dimensions, slot table and pixel indices.
///
/// # Example
///
/// ```
/// use sbci_format::{Color, RgbImage, SbciImage, SnfpWriter};
///
/// let pixels = vec![Color::new(240, 240, 240), Color::new(17, 17, 17)];
/// let image = RgbImage::new(2, 1, pixels.clone()).unwrap();
/// let bytes = SnfpWriter::default().encode(&image).unwrap();
///
/// let decoded = SbciImage::decode(&bytes).unwrap();
/// assert_eq!(decoded.indices(), &[0, 15]);
/// assert_eq!(decoded.to_colors().unwrap(), pixels);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbciImage {
    header: Header,
    palette: SlotTable,
    indices: Vec<u8>,
}

impl SbciImage {
    /// Parse an encoded image.
    ///
    /// The number of palette records is derived from the input length:
    /// whatever lies between the header and the `width * height` pixel bytes
    /// must be a whole number of records, at most 16.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let header = Header::parse(data)?;
        let pixel_count = header.pixel_count();
        let needed = HEADER_LEN.saturating_add(pixel_count);
        if data.len() < needed {
            return Err(DecodeError::Truncated {
                needed,
                actual: data.len(),
            });
        }

        let table_len = data.len() - needed;
        if table_len % COLOR_RECORD_LEN != 0
            || table_len / COLOR_RECORD_LEN > REFERENCE_PALETTE_LEN
        {
            return Err(DecodeError::InvalidPaletteTable(table_len));
        }

        let table_end = HEADER_LEN + table_len;
        let mut slots = [None; REFERENCE_PALETTE_LEN];
        let mut previous: Option<u8> = None;
        for record in data[HEADER_LEN..table_end].chunks_exact(COLOR_RECORD_LEN) {
            let slot = record[0];
            let ascending = previous.map_or(true, |p| slot > p);
            if slot as usize >= REFERENCE_PALETTE_LEN || !ascending {
                return Err(DecodeError::InvalidSlot {
                    slot,
                    context: "palette table",
                });
            }
            slots[slot as usize] = Some(Color::new(record[1], record[2], record[3]));
            previous = Some(slot);
        }

        let indices = data[table_end..].to_vec();
        if let Some(&slot) = indices
            .iter()
            .find(|&&s| s as usize >= REFERENCE_PALETTE_LEN)
        {
            return Err(DecodeError::InvalidSlot {
                slot,
                context: "pixel data",
            });
        }

        Ok(Self {
            header,
            palette: SlotTable::from_slots(slots),
            indices,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.header.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Slot table read from the palette records.
    #[inline]
    pub fn palette(&self) -> &SlotTable {
        &self.palette
    }

    /// One slot index per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Resolve every pixel to its slot color.
    ///
    /// Fails with [`DecodeError::InvalidSlot`] if a pixel references a slot
    /// without a palette record.
    pub fn to_colors(&self) -> Result<Vec<Color>, DecodeError> {
        self.indices
            .iter()
            .map(|&slot| {
                self.palette
                    .get(slot as usize)
                    .ok_or(DecodeError::InvalidSlot {
                        slot,
                        context: "pixel data (empty slot)",
                    })
            })
            .collect()
    }

    /// Resolve every pixel to packed `[R, G, B, ...]` bytes.
    pub fn to_rgb(&self) -> Result<Vec<u8>, DecodeError> {
        Ok(self
            .to_colors()?
            .into_iter()
            .flat_map(Color::to_bytes)
            .collect())
    }
}
