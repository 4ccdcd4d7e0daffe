//! Reference palette with nearest-color matching.
//!
//! The reference palette is an ordered list of exactly
//! [`REFERENCE_PALETTE_LEN`] distinct template colors. A color's position is
//! its slot index in the encoded image, so the order is part of the format.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Color;

/// Number of template colors, and therefore of output slots.
pub const REFERENCE_PALETTE_LEN: usize = 16;

/// The built-in reference palette (ComputerCraft terminal colors).
pub const CC_PALETTE: [Color; REFERENCE_PALETTE_LEN] = [
    Color::new(240, 240, 240),
    Color::new(242, 178, 51),
    Color::new(229, 127, 216),
    Color::new(153, 178, 242),
    Color::new(222, 222, 108),
    Color::new(127, 204, 25),
    Color::new(242, 178, 204),
    Color::new(76, 76, 76),
    Color::new(153, 153, 153),
    Color::new(76, 153, 178),
    Color::new(178, 102, 229),
    Color::new(51, 102, 204),
    Color::new(127, 102, 76),
    Color::new(87, 166, 78),
    Color::new(204, 76, 76),
    Color::new(17, 17, 17),
];

/// Blit character of a slot: its lowercase hex digit.
///
/// # Panics
///
/// Panics if `slot >= 16`.
///
/// ```
/// use sbci_format::slot_blit;
///
/// assert_eq!(slot_blit(0), '0');
/// assert_eq!(slot_blit(10), 'a');
/// assert_eq!(slot_blit(15), 'f');
/// ```
pub fn slot_blit(slot: usize) -> char {
    assert!(slot < REFERENCE_PALETTE_LEN, "slot {slot} out of range");
    char::from_digit(slot as u32, 16).unwrap_or('?')
}

/// Fixed 16-color reference palette.
///
/// Never mutated after construction. Lookups are linear scans; whenever two
/// template colors are equally close, the one earlier in palette order wins.
///
/// # Example
///
/// ```
/// use sbci_format::{Color, PaletteBuilder};
///
/// let palette = PaletteBuilder::cc_default();
/// let nearest = palette.nearest(Color::new(250, 250, 250));
///
/// assert_eq!(nearest, Color::new(240, 240, 240));
/// assert_eq!(palette.index_of(nearest), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteBuilder {
    colors: [Color; REFERENCE_PALETTE_LEN],
}

impl PaletteBuilder {
    /// Create a reference palette from exactly 16 distinct colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::WrongLength`] unless `colors.len() == 16`
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(colors: &[Color]) -> Result<Self, PaletteError> {
        let colors: [Color; REFERENCE_PALETTE_LEN] =
            colors.try_into().map_err(|_| PaletteError::WrongLength {
                actual: colors.len(),
            })?;

        let mut seen = HashSet::with_capacity(REFERENCE_PALETTE_LEN);
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }

        Ok(Self { colors })
    }

    /// Create a reference palette from hex strings.
    ///
    /// ```
    /// use sbci_format::{PaletteBuilder, CC_PALETTE};
    ///
    /// let hex: Vec<String> = CC_PALETTE.iter().map(|c| c.to_string()).collect();
    /// let hex: Vec<&str> = hex.iter().map(String::as_str).collect();
    /// let palette = PaletteBuilder::from_hex(&hex).unwrap();
    ///
    /// assert_eq!(palette, PaletteBuilder::cc_default());
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// The built-in ComputerCraft palette.
    pub fn cc_default() -> Self {
        Self {
            colors: CC_PALETTE,
        }
    }

    /// Template colors in slot order.
    #[inline]
    pub fn colors(&self) -> &[Color; REFERENCE_PALETTE_LEN] {
        &self.colors
    }

    /// Template color of a slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= 16`.
    #[inline]
    pub fn color(&self, slot: usize) -> Color {
        self.colors[slot]
    }

    /// Always 16.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Template color closest to `color`.
    ///
    /// Only a strictly smaller distance replaces the current best, so ties
    /// resolve to the earliest template color.
    pub fn nearest(&self, color: Color) -> Color {
        self.colors[self.nearest_index(color)]
    }

    /// Slot index of the template color closest to `color`.
    pub fn nearest_index(&self, color: Color) -> usize {
        let mut best = 0;
        let mut best_dist = color.distance(self.colors[0]);
        for (i, &candidate) in self.colors.iter().enumerate().skip(1) {
            let dist = color.distance(candidate);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// All template colors ordered by ascending distance to `color`.
    ///
    /// The sort is stable, so equally distant template colors keep their
    /// palette order.
    pub fn distance_sorted_to(&self, color: Color) -> Vec<Color> {
        let mut ranked: Vec<(Color, f64)> = self
            .colors
            .iter()
            .map(|&c| (c, c.distance(color)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.into_iter().map(|(c, _)| c).collect()
    }

    /// Slot index of the template color equal to `color`.
    ///
    /// Returns `None` if `color` is not part of the reference palette. Only
    /// colors obtained from [`nearest`](Self::nearest),
    /// [`distance_sorted_to`](Self::distance_sorted_to) or the palette itself
    /// are guaranteed to be found.
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::cc_default()
    }
}
