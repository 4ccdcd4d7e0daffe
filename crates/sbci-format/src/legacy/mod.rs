//! Deprecated NFP ("paint") text format.
//!
//! NFP maps every pixel straight to the nearest reference color and writes
//! its blit character. There is no slot assignment and no palette table;
//! it exists so older consumers keep working.

mod nfp;

pub use nfp::NfpWriter;
