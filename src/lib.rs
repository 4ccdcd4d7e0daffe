//! sbci - convert PNG images to the 16-color sbci format
//!
//! The encoding itself lives in the `sbci-format` crate. This crate adds the
//! file pipeline around it: image decoding, resizing, color reduction, preview
//! output and configuration. The modules are public for integration testing.

pub mod error;
pub mod imaging;
pub mod models;
pub mod services;
