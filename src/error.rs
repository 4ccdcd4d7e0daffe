use sbci_format::{EncodeError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Quantization failed: {0}")]
    Quantize(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Conversion task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        ConvertError::ImageDecode(e.to_string())
    }
}

impl From<imagequant::Error> for ConvertError {
    fn from(e: imagequant::Error) -> Self {
        ConvertError::Quantize(e.to_string())
    }
}

impl From<png::EncodingError> for ConvertError {
    fn from(e: png::EncodingError) -> Self {
        ConvertError::PngEncode(e.to_string())
    }
}
