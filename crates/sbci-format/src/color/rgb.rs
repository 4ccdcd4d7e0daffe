//! 8-bit RGB color
//!
//! [`Color`] is the only color representation used by the slot assignment
//! and the encoders. Equality, hashing and the hex key all agree: two colors
//! are interchangeable exactly when their three channels match.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An immutable 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Euclidean distance in raw RGB space.
    ///
    /// No color space conversion takes place: this is
    /// `sqrt(dr² + dg² + db²)` over the channel bytes.
    ///
    /// ```
    /// use sbci_format::Color;
    ///
    /// let a = Color::new(0, 0, 0);
    /// let b = Color::new(3, 4, 0);
    /// assert_eq!(a.distance(b), 5.0);
    /// assert_eq!(a.distance(b), b.distance(a));
    /// ```
    #[inline]
    pub fn distance(self, other: Color) -> f64 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        ((dr * dr + dg * dg + db * db) as f64).sqrt()
    }

    /// Pack the channels into an integer, red in the lowest byte.
    ///
    /// ```
    /// use sbci_format::Color;
    ///
    /// assert_eq!(Color::new(0x12, 0x34, 0x56).to_packed_int(), 0x56_34_12);
    /// ```
    #[inline]
    pub const fn to_packed_int(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    /// Six lowercase hex digits, two per channel, zero padded.
    ///
    /// Distinct colors always produce distinct keys.
    ///
    /// ```
    /// use sbci_format::Color;
    ///
    /// assert_eq!(Color::new(242, 178, 51).to_hex_key(), "f2b233");
    /// assert_eq!(Color::new(0, 10, 255).to_hex_key(), "000aff");
    /// ```
    pub fn to_hex_key(self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex_key())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace trimmed. The shorthand form expands each digit
    /// (`#f80` is `#ff8800`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let mut bytes = [0u8; 3];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self::from_bytes(bytes))
            }
            _ => Err(ParseColorError::InvalidLength(s.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let c = Color::new(87, 166, 78);
        assert_eq!(c.distance(c), 0.0);
    }

    #[test]
    fn test_distance_extremes() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        let expected = (3.0f64 * 255.0 * 255.0).sqrt();
        assert!((black.distance(white) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_packed_int_channel_order() {
        assert_eq!(Color::new(255, 0, 0).to_packed_int(), 0x0000ff);
        assert_eq!(Color::new(0, 255, 0).to_packed_int(), 0x00ff00);
        assert_eq!(Color::new(0, 0, 255).to_packed_int(), 0xff0000);
    }

    #[test]
    fn test_hex_key_zero_padded_lowercase() {
        assert_eq!(Color::new(1, 2, 3).to_hex_key(), "010203");
        assert_eq!(Color::new(0xAB, 0xCD, 0xEF).to_hex_key(), "abcdef");
    }

    #[test]
    fn test_equal_colors_equal_keys() {
        let a = Color::new(17, 17, 17);
        let b = Color::from_bytes([17, 17, 17]);
        assert_eq!(a, b);
        assert_eq!(a.to_hex_key(), b.to_hex_key());
    }

    #[test]
    fn test_display_has_hash_prefix() {
        assert_eq!(Color::new(240, 240, 240).to_string(), "#f0f0f0");
    }

    #[test]
    fn test_parse_long_form() {
        let c: Color = "#F2B233".parse().unwrap();
        assert_eq!(c, Color::new(242, 178, 51));
        let c: Color = " 4c4c4c ".parse().unwrap();
        assert_eq!(c, Color::new(76, 76, 76));
    }

    #[test]
    fn test_parse_shorthand() {
        let c: Color = "#f80".parse().unwrap();
        assert_eq!(c, Color::new(255, 136, 0));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(
            "#12345".parse::<Color>(),
            Err(ParseColorError::InvalidLength(5))
        );
    }

    #[test]
    fn test_parse_rejects_bad_digits() {
        assert!(matches!(
            "#zz0000".parse::<Color>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#g00".parse::<Color>(),
            Err(ParseColorError::InvalidHex(_))
        ));
    }
}
