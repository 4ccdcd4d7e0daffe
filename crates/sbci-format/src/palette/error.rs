//! Error types for palette operations

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length {0} (expected 3 or 6 characters)")]
    InvalidLength(usize),

    /// Invalid hexadecimal character encountered
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err.to_string())
    }
}

impl From<hex::FromHexError> for ParseColorError {
    fn from(err: hex::FromHexError) -> Self {
        ParseColorError::InvalidHex(err.to_string())
    }
}

/// Error type for reference palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The reference palette does not hold exactly 16 colors
    #[error("reference palette must have 16 colors, got {actual}")]
    WrongLength {
        /// Number of colors supplied
        actual: usize,
    },

    /// The same color appears twice, which would make slot lookup ambiguous
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },

    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
