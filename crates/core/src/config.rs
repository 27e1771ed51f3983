//! # Clinic Schedule Configuration
//!
//! The daily slot window and look-ahead horizon the clinic offers. Values are
//! normally loaded by the API configuration from `CLINIC_*` environment
//! variables, and can also be deserialized from the camelCase shape
//! `{ startTime, endTime, stepMinutes, horizonDays }`.

use serde::{Deserialize, Serialize};

use crate::availability::{TimeSlot, generate_slots};
use crate::errors::{ClinicError, ClinicResult};

/// Default IANA timezone of the clinic
pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";

/// Longest booking horizon accepted, two years
pub const MAX_HORIZON_DAYS: u32 = 730;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    /// First slot of the day
    pub start_time: TimeSlot,

    /// Last possible slot of the day, included when on a step boundary
    pub end_time: TimeSlot,

    /// Slot granularity in minutes
    pub step_minutes: u32,

    /// Number of days, starting today, offered for booking
    pub horizon_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_time: TimeSlot::at(16, 30),
            end_time: TimeSlot::at(20, 0),
            step_minutes: 30,
            horizon_days: 60,
        }
    }
}

impl ScheduleConfig {
    /// Checks the window can produce at least one slot and the horizon lies
    /// within `1..=MAX_HORIZON_DAYS`.
    pub fn validate(&self) -> ClinicResult<()> {
        if self.horizon_days == 0 {
            return Err(ClinicError::Validation(
                "Booking horizon must be at least one day".to_string(),
            ));
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ClinicError::Validation(format!(
                "Booking horizon must be at most {} days",
                MAX_HORIZON_DAYS
            )));
        }
        generate_slots(self.start_time, self.end_time, self.step_minutes).map(|_| ())
    }
}
