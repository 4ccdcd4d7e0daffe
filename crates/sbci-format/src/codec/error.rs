//! Error types for encoding and decoding sbci images

use std::io;

use thiserror::Error;

use super::mode::SnfpMode;
use crate::color::Color;

/// Errors raised while encoding.
///
/// Every variant is raised before the first byte reaches the output sink,
/// except [`EncodeError::Io`].
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Mode not supported: {0}")]
    UnsupportedMode(String),

    #[error("{0} encoding is not implemented")]
    NotImplemented(SnfpMode),

    #[error("Palette overflow: {} colors found no free slot", .dropped.len())]
    PaletteOverflow { dropped: Vec<Color> },

    #[error("Pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Bad magic: expected \"sbci\", found {0:?}")]
    BadMagic([u8; 4]),

    #[error("Truncated data: need at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("Invalid palette table: {0} trailing bytes do not form 0..=16 color records")]
    InvalidPaletteTable(usize),

    #[error("Invalid slot {slot} in {context}")]
    InvalidSlot { slot: u8, context: &'static str },
}
