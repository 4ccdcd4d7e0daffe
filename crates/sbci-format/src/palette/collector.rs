//! Distinct color collection for one image.

use std::collections::HashSet;

use crate::color::Color;

/// Gathers the distinct colors observed in an image.
///
/// Adding a color that was already seen is a no-op. Colors come back in
/// order of first insertion, which keeps slot assignment reproducible for
/// a given scan order.
///
/// ```
/// use sbci_format::{Color, PaletteCollector};
///
/// let mut collector = PaletteCollector::new();
/// collector.add(Color::new(1, 1, 1));
/// collector.add(Color::new(2, 2, 2));
/// collector.add(Color::new(1, 1, 1));
///
/// assert_eq!(
///     collector.collect(),
///     vec![Color::new(1, 1, 1), Color::new(2, 2, 2)]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaletteCollector {
    seen: HashSet<Color>,
    order: Vec<Color>,
}

impl PaletteCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a color. Returns `true` if it had not been seen before.
    pub fn add(&mut self, color: Color) -> bool {
        let fresh = self.seen.insert(color);
        if fresh {
            self.order.push(color);
        }
        fresh
    }

    /// Distinct colors in first-insertion order.
    pub fn collect(&self) -> Vec<Color> {
        self.order.clone()
    }

    /// Consume the collector, returning the distinct colors.
    pub fn into_colors(self) -> Vec<Color> {
        self.order
    }

    pub fn contains(&self, color: Color) -> bool {
        self.seen.contains(&color)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Extend<Color> for PaletteCollector {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, iter: I) {
        for color in iter {
            self.add(color);
        }
    }
}

impl FromIterator<Color> for PaletteCollector {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut collector = Self::new();
        collector.extend(iter);
        collector
    }
}
