//! Encoding mode and palette table layout.

use std::fmt;
use std::str::FromStr;

use super::error::EncodeError;

/// Output encoding.
///
/// Only [`SnfpMode::Binary`] produces output. [`SnfpMode::Ascii`] is a
/// recognised mode that is rejected with [`EncodeError::NotImplemented`]
/// before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnfpMode {
    #[default]
    Binary,
    Ascii,
}

impl fmt::Display for SnfpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnfpMode::Binary => write!(f, "BINARY"),
            SnfpMode::Ascii => write!(f, "ASCII"),
        }
    }
}

impl TryFrom<u8> for SnfpMode {
    type Error = EncodeError;

    /// Convert a raw mode value (`0` binary, `1` ASCII).
    ///
    /// ```
    /// use sbci_format::{EncodeError, SnfpMode};
    ///
    /// assert_eq!(SnfpMode::try_from(0).unwrap(), SnfpMode::Binary);
    /// assert!(matches!(SnfpMode::try_from(9), Err(EncodeError::UnsupportedMode(_))));
    /// ```
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SnfpMode::Binary),
            1 => Ok(SnfpMode::Ascii),
            other => Err(EncodeError::UnsupportedMode(other.to_string())),
        }
    }
}

impl FromStr for SnfpMode {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("binary") => Ok(SnfpMode::Binary),
            s if s.eq_ignore_ascii_case("ascii") => Ok(SnfpMode::Ascii),
            other => Err(EncodeError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Which palette records the binary encoder writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteTable {
    /// One record per occupied slot.
    #[default]
    Sparse,
    /// All 16 records; unused slots are written as black.
    Full,
}

impl FromStr for PaletteTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("sparse") => Ok(PaletteTable::Sparse),
            s if s.eq_ignore_ascii_case("full") => Ok(PaletteTable::Full),
            other => Err(format!("unknown palette table layout: {other}")),
        }
    }
}
