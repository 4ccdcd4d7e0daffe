//! Slot assignment: observed colors onto the 16 output slots.
//!
//! Assignment runs in three stages:
//!
//! 1. **Classification**: every observed color joins the bucket of its
//!    nearest template color.
//! 2. **Redistribution**: buckets holding more than one color evict their
//!    most recently added colors (LIFO) into the nearest slot that is still
//!    empty. A color with nowhere to go is dropped and reported.
//! 3. **Finalization**: the first color left in each bucket becomes that
//!    slot's representative.
//!
//! Both the eviction order and the "first empty slot in distance order" rule
//! determine the output bytes; changing either is a format change.

mod slot_assigner;

pub use slot_assigner::{SlotAssigner, SlotAssignment, SlotTable};
