//! Palette types: the fixed reference palette and the observed color set
//!
//! [`PaletteBuilder`] holds the 16 template colors that define the output
//! slots. [`PaletteCollector`] gathers the distinct colors of one image.

mod builder;
mod collector;
mod error;

pub use builder::{slot_blit, PaletteBuilder, CC_PALETTE, REFERENCE_PALETTE_LEN};
pub use collector::PaletteCollector;
pub use error::{PaletteError, ParseColorError};
