//! Test fixtures and constants.

use sbci_format::Color;

/// Colors of the built-in reference palette used by the fixtures
pub mod colors {
    use sbci_format::Color;

    pub const WHITE: Color = Color::new(240, 240, 240);
    pub const ORANGE: Color = Color::new(242, 178, 51);
    pub const BLACK: Color = Color::new(17, 17, 17);
    pub const GREEN: Color = Color::new(87, 166, 78);
}

/// The 2x2 reference scenario: white, orange / white, black
pub fn scenario_pixels() -> Vec<Color> {
    vec![colors::WHITE, colors::ORANGE, colors::WHITE, colors::BLACK]
}

/// Expected sbci bytes for [`scenario_pixels`] with the sparse table
pub fn scenario_bytes() -> Vec<u8> {
    let mut bytes = b"sbci".to_vec();
    bytes.extend_from_slice(&2u32.to_le_bytes());
    bytes.extend_from_slice(&2u32.to_le_bytes());
    bytes.extend_from_slice(&[0, 240, 240, 240]);
    bytes.extend_from_slice(&[1, 242, 178, 51]);
    bytes.extend_from_slice(&[15, 17, 17, 17]);
    bytes.extend_from_slice(&[0, 1, 0, 15]);
    bytes
}

/// Horizontal stripes with `count` distinct shades of gray, one per row
pub fn gray_stripes(width: u32, count: u32) -> Vec<Color> {
    (0..count)
        .flat_map(|row| {
            let v = (row * 255 / count.max(1)) as u8;
            std::iter::repeat(Color::new(v, v, v)).take(width as usize)
        })
        .collect()
}

/// Horizontal gray ramp, one shade per column, `height` identical rows
pub fn gray_ramp(width: u32, height: u32) -> Vec<Color> {
    (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| {
                let v = (x * 255 / (width - 1).max(1)) as u8;
                Color::new(v, v, v)
            })
        })
        .collect()
}
