//! sbci-format: 16-slot palette assignment and the sbci image format
//!
//! This library turns an RGB image into the compact sbci format used by
//! 16-color terminal renderers: every pixel becomes one byte naming one of
//! 16 palette slots, and each occupied slot carries the exact RGB color it
//! stands for.
//!
//! # Quick Start
//!
//! The [`SnfpWriter`] builder is the primary entry point:
//!
//! ```
//! use sbci_format::{Color, RgbImage, SbciImage, SnfpMode, SnfpWriter};
//!
//! let pixels = vec![
//!     Color::new(240, 240, 240),
//!     Color::new(242, 178, 51),
//!     Color::new(240, 240, 240),
//!     Color::new(17, 17, 17),
//! ];
//! let image = RgbImage::new(2, 2, pixels.clone()).unwrap();
//!
//! let bytes = SnfpWriter::new(SnfpMode::Binary).encode(&image).unwrap();
//! let decoded = SbciImage::decode(&bytes).unwrap();
//!
//! assert_eq!(decoded.indices(), &[0, 1, 0, 15]);
//! assert_eq!(decoded.to_colors().unwrap(), pixels);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! pixels (row-major)
//!     |
//!     v
//! PaletteCollector        distinct colors, first-seen order
//!     |
//!     v
//! SlotAssigner            A: bucket by nearest template color
//!     |                   B: evict extras (LIFO) into nearest empty slot
//!     |                   C: first color of each bucket owns the slot
//!     v
//! SnfpWriter              header | palette records | pixel indices
//! ```
//!
//! # Slots and the reference palette
//!
//! The reference palette ([`PaletteBuilder`]) is a fixed list of 16 template
//! colors. Templates only steer *where* a color lands; the color stored in
//! a slot is always a color that actually occurs in the image. As long as an
//! image has at most 16 distinct colors, every one of them gets its own slot
//! and decoding reproduces the image exactly.
//!
//! With more than 16 distinct colors, the colors that find no empty slot are
//! dropped: they are listed in [`EncodeReport::dropped`] and their pixels
//! are written as slot 0. [`SnfpWriter::strict`] turns this into an
//! [`EncodeError::PaletteOverflow`] instead.
//!
//! # Distance
//!
//! Matching uses plain Euclidean distance over the 8-bit channels
//! ([`Color::distance`]). Ties always go to the template color that comes
//! first in palette order.

pub mod assign;
pub mod codec;
pub mod color;
pub mod legacy;
pub mod palette;


pub use assign::{SlotAssigner, SlotAssignment, SlotTable};
pub use codec::{
    color_record, DecodeError, EncodeError, EncodeReport, Header, PaletteTable, PixelSource,
    RgbImage, SbciImage, SnfpMode, SnfpWriter,
};
pub use color::Color;
pub use legacy::NfpWriter;
pub use palette::{
    slot_blit, PaletteBuilder, PaletteCollector, PaletteError, ParseColorError, CC_PALETTE,
    REFERENCE_PALETTE_LEN,
};
