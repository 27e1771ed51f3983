use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ClinicError, ClinicResult};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day at minute precision, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// Builds a slot from components already known to be in range.
    pub(crate) const fn at(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Truncates seconds and sub-seconds.
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        Self::new((minutes / 60) as u8, (minutes % 60) as u8)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    pub fn to_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeSlot {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClinicError::Validation(format!("Invalid time of day: {:?}", s));
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        TimeSlot::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ClinicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Generates the clinic's daily slot window.
///
/// Slots start at `start` and advance by `step_minutes`. `end` is included
/// only when it falls exactly on a step boundary.
///
/// # Errors
///
/// * `ClinicError::Validation` - `step_minutes` is zero or `end` precedes `start`
pub fn generate_slots(start: TimeSlot, end: TimeSlot, step_minutes: u32) -> ClinicResult<Vec<TimeSlot>> {
    if step_minutes == 0 {
        return Err(ClinicError::Validation(
            "Slot step must be at least one minute".to_string(),
        ));
    }
    if end < start {
        return Err(ClinicError::Validation(format!(
            "Slot window end {} precedes start {}",
            end, start
        )));
    }

    let slots = (start.minutes_since_midnight()..=end.minutes_since_midnight())
        .step_by(step_minutes as usize)
        .filter_map(TimeSlot::from_minutes)
        .collect();

    Ok(slots)
}
