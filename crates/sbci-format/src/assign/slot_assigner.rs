//! Bucket classification and LIFO redistribution.

use std::collections::HashMap;

use crate::color::Color;
use crate::palette::{PaletteBuilder, REFERENCE_PALETTE_LEN};

/// Final slot to color mapping written to the palette table.
///
/// Each slot holds at most one color. Empty slots never appear in the pixel
/// stream produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotTable {
    slots: [Option<Color>; REFERENCE_PALETTE_LEN],
}

impl SlotTable {
    /// Build a table from explicit slot contents.
    pub fn from_slots(slots: [Option<Color>; REFERENCE_PALETTE_LEN]) -> Self {
        Self { slots }
    }

    /// Representative color of `slot`, if any.
    ///
    /// Returns `None` for empty slots and for `slot >= 16`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<Color> {
        self.slots.get(slot).copied().flatten()
    }

    /// Occupied slots in ascending slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, color)| color.map(|c| (slot, c)))
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Slot that owns `color`.
    pub fn slot_of(&self, color: Color) -> Option<usize> {
        self.slots.iter().position(|&s| s == Some(color))
    }

    /// Color to slot lookup used when writing the pixel stream.
    pub fn lookup(&self) -> HashMap<Color, u8> {
        self.occupied()
            .map(|(slot, color)| (color, slot as u8))
            .collect()
    }
}

/// Outcome of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    table: SlotTable,
    dropped: Vec<Color>,
}

impl SlotAssignment {
    /// The finalized slot table.
    #[inline]
    pub fn table(&self) -> &SlotTable {
        &self.table
    }

    /// Colors that found no empty slot, in the order they were evicted.
    ///
    /// Pixels of these colors have no exact representative.
    #[inline]
    pub fn dropped(&self) -> &[Color] {
        &self.dropped
    }

    /// Whether any color was dropped.
    #[inline]
    pub fn has_overflow(&self) -> bool {
        !self.dropped.is_empty()
    }

    pub fn into_parts(self) -> (SlotTable, Vec<Color>) {
        (self.table, self.dropped)
    }
}

/// Assigns observed colors to the slots of a reference palette.
///
/// The assigner holds no state between runs: every call to
/// [`assign`](Self::assign) builds its buckets from scratch.
///
/// # Example
///
/// ```
/// use sbci_format::{Color, PaletteBuilder, SlotAssigner};
///
/// let palette = PaletteBuilder::cc_default();
/// let observed = [
///     Color::new(240, 240, 240),
///     Color::new(242, 178, 51),
///     Color::new(17, 17, 17),
/// ];
///
/// let assignment = SlotAssigner::new(&palette).assign(&observed);
/// let table = assignment.table();
///
/// assert_eq!(table.get(0), Some(Color::new(240, 240, 240)));
/// assert_eq!(table.get(1), Some(Color::new(242, 178, 51)));
/// assert_eq!(table.get(15), Some(Color::new(17, 17, 17)));
/// assert_eq!(table.occupied_count(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SlotAssigner<'a> {
    palette: &'a PaletteBuilder,
}

impl<'a> SlotAssigner<'a> {
    pub fn new(palette: &'a PaletteBuilder) -> Self {
        Self { palette }
    }

    /// Run classification, redistribution and finalization.
    ///
    /// `observed` must hold distinct colors; its order decides which colors
    /// keep their nearest slot when several compete for it (earlier colors
    /// win, because eviction takes the most recently added one first).
    pub fn assign(&self, observed: &[Color]) -> SlotAssignment {
        let mut buckets: [Vec<Color>; REFERENCE_PALETTE_LEN] = Default::default();

        // Stage A: classification
        for &color in observed {
            let nearest = self.palette.nearest(color);
            let Some(slot) = self.palette.index_of(nearest) else {
                continue;
            };
            buckets[slot].push(color);
        }

        tracing::debug!(
            colors = observed.len(),
            sizes = ?buckets.iter().map(Vec::len).collect::<Vec<_>>(),
            "Classified colors into buckets"
        );

        // Stage B: redistribution
        let mut dropped = Vec::new();
        for slot in 0..REFERENCE_PALETTE_LEN {
            while buckets[slot].len() > 1 {
                let Some(top) = buckets[slot].pop() else {
                    break;
                };

                let target = self
                    .palette
                    .distance_sorted_to(top)
                    .into_iter()
                    .filter_map(|near| self.palette.index_of(near))
                    .find(|&candidate| candidate != slot && buckets[candidate].is_empty());

                match target {
                    Some(candidate) => {
                        tracing::trace!(color = %top, from = slot, to = candidate, "Moved color");
                        buckets[candidate].push(top);
                    }
                    None => {
                        tracing::warn!(color = %top, slot, "No empty slot left, dropping color");
                        dropped.push(top);
                    }
                }
            }
        }

        // Stage C: finalization
        let mut slots = [None; REFERENCE_PALETTE_LEN];
        for (slot, bucket) in buckets.iter().enumerate() {
            slots[slot] = bucket.first().copied();
        }
        let table = SlotTable::from_slots(slots);

        tracing::debug!(
            occupied = table.occupied_count(),
            dropped = dropped.len(),
            "Finalized slot table"
        );

        SlotAssignment { table, dropped }
    }
}
