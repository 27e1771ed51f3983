use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::TimeSlot;
use crate::models::appointment::BookingRecord;

/// Slots already taken, keyed by local calendar date.
///
/// An index is built once per snapshot and never edited afterwards. A newer
/// snapshot produces a new index that replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedIndex {
    booked: BTreeMap<NaiveDate, BTreeSet<TimeSlot>>,
}

impl BookedIndex {
    /// Builds the index for `records` as seen from the clinic timezone `tz`.
    ///
    /// Cancelled records are ignored. A record whose instant is missing or
    /// cannot be parsed is skipped with a warning; the rest of the snapshot
    /// still contributes.
    pub fn build<Tz: TimeZone>(records: &[BookingRecord], tz: &Tz) -> Self {
        let mut booked: BTreeMap<NaiveDate, BTreeSet<TimeSlot>> = BTreeMap::new();

        for (position, record) in records.iter().enumerate() {
            if !record.status.holds_slot() {
                continue;
            }

            let Some(raw) = record.preferred_date_time.as_deref() else {
                warn!(position, "Skipping appointment without preferredDateTime");
                continue;
            };

            let instant = match DateTime::parse_from_rfc3339(raw.trim()) {
                Ok(instant) => instant,
                Err(err) => {
                    warn!(position, value = raw, error = %err, "Skipping appointment with unparseable preferredDateTime");
                    continue;
                }
            };

            let local = instant.with_timezone(tz).naive_local();
            booked
                .entry(local.date())
                .or_default()
                .insert(TimeSlot::from_time(local.time()));
        }

        Self { booked }
    }

    pub fn is_booked(&self, date: NaiveDate, slot: TimeSlot) -> bool {
        self.booked
            .get(&date)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Taken slots on `date`, in ascending order.
    pub fn booked_on(&self, date: NaiveDate) -> impl Iterator<Item = TimeSlot> + '_ {
        self.booked.get(&date).into_iter().flatten().copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.booked.keys().copied()
    }

    /// Number of distinct (date, slot) pairs taken.
    pub fn len(&self) -> usize {
        self.booked.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.booked.is_empty()
    }
}
