//! RGB color type
//!
//! Everything in this crate works on raw 8-bit RGB triples. There is no
//! gamma handling or perceptual color space: the distance between two colors
//! is the plain Euclidean distance of their channel bytes.
//!
//! # Example
//!
//! ```
//! use sbci_format::Color;
//!
//! let white = Color::new(240, 240, 240);
//! let black: Color = "#111111".parse().unwrap();
//!
//! assert_eq!(white.to_hex_key(), "f0f0f0");
//! assert!(white.distance(black) > 380.0);
//! ```

mod rgb;

pub use rgb::Color;
