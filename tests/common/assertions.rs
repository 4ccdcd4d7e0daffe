//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use sbci_format::SbciImage;

/// Assert data starts with the sbci magic and has the given dimensions
pub fn assert_sbci_header(data: &[u8], width: u32, height: u32) {
    assert!(
        data.len() >= 12,
        "Expected at least a 12 byte header, got {} bytes",
        data.len()
    );
    assert_eq!(&data[0..4], b"sbci", "Bad magic");
    assert_eq!(u32::from_le_bytes([data[4], data[5], data[6], data[7]]), width);
    assert_eq!(u32::from_le_bytes([data[8], data[9], data[10], data[11]]), height);
}

/// Assert data is a PNG
pub fn assert_png(data: &[u8]) {
    assert!(
        data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        data.len(),
        &data[..8.min(data.len())]
    );
}

/// Columns of a decoded image whose slots are not all the same
pub fn mixed_columns(image: &SbciImage) -> usize {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let indices = image.indices();
    (0..width)
        .filter(|&x| (1..height).any(|y| indices[y * width + x] != indices[x]))
        .count()
}
