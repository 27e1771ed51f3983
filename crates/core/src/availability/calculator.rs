use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use super::{BookedIndex, TimeSlot, generate_slots};
use crate::config::ScheduleConfig;
use crate::errors::ClinicResult;

/// Derives bookable dates and times from a [`BookedIndex`].
///
/// The calculator holds only the slot window and the horizon. The index and
/// the current instant are passed to every call, so identical inputs always
/// give identical outputs.
///
/// A slot is open on a date when it is not booked and its local wall-clock
/// instant is strictly later than `now`. For future dates the second part
/// always holds, for today it drops elapsed slots (a slot equal to `now` is
/// gone), and for past dates nothing is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCalculator {
    slots: Vec<TimeSlot>,
    horizon_days: u32,
}

impl AvailabilityCalculator {
    pub fn new(config: &ScheduleConfig) -> ClinicResult<Self> {
        config.validate()?;
        let slots = generate_slots(config.start_time, config.end_time, config.step_minutes)?;

        Ok(Self {
            slots,
            horizon_days: config.horizon_days,
        })
    }

    /// Every slot the clinic offers in a day.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    fn is_open(&self, index: &BookedIndex, date: NaiveDate, slot: TimeSlot, now: NaiveDateTime) -> bool {
        !index.is_booked(date, slot) && date.and_time(slot.to_time()) > now
    }

    /// Open slots on `date`, with `now` expressed in the clinic timezone.
    pub fn available_times<Tz: TimeZone>(
        &self,
        index: &BookedIndex,
        date: NaiveDate,
        now: &DateTime<Tz>,
    ) -> Vec<TimeSlot> {
        let now = now.naive_local();
        self.slots
            .iter()
            .copied()
            .filter(|slot| self.is_open(index, date, *slot, now))
            .collect()
    }

    /// Same as [`available_times`](Self::available_times) for a raw
    /// `YYYY-MM-DD` form value. Empty or unparseable input means no date is
    /// selected and yields no times.
    pub fn available_times_for_input<Tz: TimeZone>(
        &self,
        index: &BookedIndex,
        input: &str,
        now: &DateTime<Tz>,
    ) -> Vec<TimeSlot> {
        match parse_selected_date(input) {
            Some(date) => self.available_times(index, date, now),
            None => Vec::new(),
        }
    }

    /// Dates within the horizon, starting today, that still have an open slot.
    pub fn available_dates<Tz: TimeZone>(&self, index: &BookedIndex, now: &DateTime<Tz>) -> Vec<NaiveDate> {
        let now = now.naive_local();
        now.date()
            .iter_days()
            .take(self.horizon_days as usize)
            .filter(|date| {
                self.slots
                    .iter()
                    .any(|slot| self.is_open(index, *date, *slot, now))
            })
            .collect()
    }
}

/// Parses a `YYYY-MM-DD` date picker value.
pub fn parse_selected_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
