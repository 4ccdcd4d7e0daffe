//! Fixed-size header and palette record encoding.

use super::error::DecodeError;
use crate::color::Color;

/// File magic.
pub const MAGIC: [u8; 4] = *b"sbci";

/// Header size: magic plus two u32 dimensions.
pub const HEADER_LEN: usize = 4 + 4 * 2;

/// Size of one `[slot, r, g, b]` palette record.
pub const COLOR_RECORD_LEN: usize = 4;

/// Image dimensions as stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
}

impl Header {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels, which is also the size of the pixel section.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4..8].copy_from_slice(&self.width.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_le_bytes());
        bytes
    }

    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < HEADER_LEN {
            return Err(DecodeError::Truncated {
                needed: HEADER_LEN,
                actual: data.len(),
            });
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }

        let width = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        let height = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        Ok(Self { width, height })
    }
}

/// Encode one palette record.
///
/// ```
/// use sbci_format::{color_record, Color};
///
/// assert_eq!(color_record(15, Color::new(17, 17, 17)), [15, 17, 17, 17]);
/// ```
#[inline]
pub fn color_record(slot: u8, color: Color) -> [u8; COLOR_RECORD_LEN] {
    [slot, color.r, color.g, color.b]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let bytes = Header::new(2, 0x0102_0304).to_bytes();
        assert_eq!(&bytes[0..4], b"sbci");
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[4, 3, 2, 1]);
    }

    #[test]
    fn test_parse_header() {
        let bytes = Header::new(40, 30).to_bytes();
        assert_eq!(Header::parse(&bytes), Ok(Header::new(40, 30)));
    }

    #[test]
    fn test_parse_short_input() {
        assert_eq!(
            Header::parse(b"sbci"),
            Err(DecodeError::Truncated {
                needed: 12,
                actual: 4
            })
        );
    }

    #[test]
    fn test_parse_bad_magic() {
        let mut bytes = Header::new(1, 1).to_bytes();
        bytes[0] = b'S';
        assert_eq!(Header::parse(&bytes), Err(DecodeError::BadMagic(*b"Sbci")));
    }

    #[test]
    fn test_pixel_count_no_overflow() {
        let header = Header::new(u32::MAX, 2);
        assert_eq!(header.pixel_count(), u32::MAX as usize * 2);
    }
}
