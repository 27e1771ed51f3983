//! # Availability
//!
//! Turns a snapshot of existing appointments into the dates and times a
//! patient can still book.
//!
//! 1. [`generate_slots`] expands the daily window into [`TimeSlot`]s.
//! 2. [`BookedIndex::build`] maps each non-cancelled appointment to its local
//!    date and time of day.
//! 3. [`AvailabilityCalculator`] filters the window against the index and the
//!    current instant, per date or across the booking horizon.

mod calculator;
mod index;
mod slot;

pub use calculator::{AvailabilityCalculator, parse_selected_date};
pub use index::BookedIndex;
pub use slot::{TimeSlot, generate_slots};
