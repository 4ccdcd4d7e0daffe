//! Pixel sources consumed by the encoders.

use super::error::EncodeError;
use crate::color::Color;

/// Random-access view of an RGB image.
///
/// Encoders read every pixel in row-major order (y outer, x inner), once
/// while collecting colors and again while writing indices.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Color at `(x, y)` with `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Color;

    /// All pixels in scan order.
    fn scan(&self) -> ScanIter<'_, Self>
    where
        Self: Sized,
    {
        ScanIter {
            source: self,
            x: 0,
            y: 0,
        }
    }
}

/// Row-major pixel iterator returned by [`PixelSource::scan`].
pub struct ScanIter<'a, S> {
    source: &'a S,
    x: u32,
    y: u32,
}

impl<S: PixelSource> Iterator for ScanIter<'_, S> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.source.width() == 0 || self.y >= self.source.height() {
            return None;
        }
        let color = self.source.pixel(self.x, self.y);
        self.x += 1;
        if self.x == self.source.width() {
            self.x = 0;
            self.y += 1;
        }
        Some(color)
    }
}

/// Owned row-major RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl RgbImage {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`EncodeError::DimensionMismatch`] unless
    /// `pixels.len() == width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, EncodeError> {
        if pixels.len() != width as usize * height as usize {
            return Err(EncodeError::DimensionMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, rgb: &[u8]) -> Result<Self, EncodeError> {
        if rgb.len() % 3 != 0 {
            return Err(EncodeError::DimensionMismatch {
                len: rgb.len() / 3,
                width,
                height,
            });
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|p| Color::new(p[0], p[1], p[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

impl PixelSource for RgbImage {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}
