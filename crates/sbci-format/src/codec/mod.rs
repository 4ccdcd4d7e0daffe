//! The sbci binary image format.
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! | Offset   | Field           | Size                 |
//! |----------|-----------------|----------------------|
//! | 0        | magic `"sbci"`  | 4 bytes              |
//! | 4        | width           | u32                  |
//! | 8        | height          | u32                  |
//! | 12       | palette records | 4 bytes × k, k ≤ 16  |
//! | 12 + 4k  | pixel indices   | width × height bytes |
//!
//! A palette record is `[slot, r, g, b]`. Records appear in ascending slot
//! order. The record count is not stored; a reader recovers it from the
//! total length because the pixel section size is fixed by the header.

mod decoder;
mod error;
mod header;
mod mode;
mod source;
mod writer;

pub use decoder::SbciImage;
pub use error::{DecodeError, EncodeError};
pub use header::{color_record, Header, COLOR_RECORD_LEN, HEADER_LEN, MAGIC};
pub use mode::{PaletteTable, SnfpMode};
pub use source::{PixelSource, RgbImage, ScanIter};
pub use writer::{EncodeReport, SnfpWriter};
