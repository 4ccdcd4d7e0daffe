pub mod converter;

pub use converter::{Conversion, ConvertReport, Converter};
