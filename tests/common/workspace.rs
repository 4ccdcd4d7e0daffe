//! Scratch directory with helpers for writing input PNGs.

use std::path::{Path, PathBuf};

use sbci_format::Color;
use tempfile::TempDir;

/// A temporary directory holding test inputs and outputs
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `name` inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).unwrap_or_else(|e| panic!("Failed to read {name}: {e}"))
    }

    /// Write an 8-bit RGB PNG from row-major pixels
    pub fn write_png(&self, name: &str, width: u32, height: u32, pixels: &[Color]) -> PathBuf {
        let rgb: Vec<u8> = pixels.iter().flat_map(|c| c.to_bytes()).collect();
        self.write_raw_png(name, width, height, png::ColorType::Rgb, &rgb)
    }

    /// Write a PNG with arbitrary 8-bit sample data
    pub fn write_raw_png(
        &self,
        name: &str,
        width: u32,
        height: u32,
        color_type: png::ColorType,
        data: &[u8],
    ) -> PathBuf {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().expect("PNG header");
            writer.write_image_data(data).expect("PNG data");
        }
        let path = self.path(name);
        std::fs::write(&path, buf).expect("Failed to write PNG");
        path
    }

    /// Names of all files currently in the workspace, sorted
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root())
            .expect("Failed to list workspace")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
