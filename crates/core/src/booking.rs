//! # Booking Form
//!
//! Validation of the patient booking form and conversion of the chosen local
//! date and time into the absolute instant stored by the backend.

use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::availability::{TimeSlot, parse_selected_date};
use crate::errors::{ClinicError, ClinicResult};
use crate::models::appointment::{AppointmentStatus, NewAppointment};

pub const PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Raw values submitted by the booking form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: String,
    pub reason: String,
    pub preferred_date: String,
    pub preferred_time: String,
}

/// Keeps only the digits of a phone number.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a phone number as `XXX-XXX-XXXX`.
///
/// Anything that is not exactly ten digits is returned as its bare digits, so
/// partially typed numbers are left alone.
pub fn format_phone_number(value: &str) -> String {
    let digits = phone_digits(value);
    if digits.len() != PHONE_DIGITS {
        return digits;
    }
    format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

impl BookingForm {
    /// Checks every field and returns the selected local date and slot.
    ///
    /// All problems are reported together, separated by `", "`.
    pub fn validate(&self) -> ClinicResult<(NaiveDate, TimeSlot)> {
        let mut problems = Vec::new();

        if self.patient_name.trim().is_empty() {
            problems.push("patientName is required".to_string());
        }
        if phone_digits(&self.patient_phone).len() != PHONE_DIGITS {
            problems.push(format!("patientPhone must have {} digits", PHONE_DIGITS));
        }
        if !is_valid_email(&self.patient_email) {
            problems.push("patientEmail must be a valid email".to_string());
        }
        if self.reason.trim().is_empty() {
            problems.push("reason is required".to_string());
        }

        let date = parse_selected_date(&self.preferred_date);
        if date.is_none() {
            problems.push("preferredDate must be YYYY-MM-DD".to_string());
        }
        let time = self.preferred_time.parse::<TimeSlot>().ok();
        if time.is_none() {
            problems.push("preferredTime must be HH:MM".to_string());
        }

        match (date, time) {
            (Some(date), Some(time)) if problems.is_empty() => Ok((date, time)),
            _ => Err(ClinicError::Validation(problems.join(", "))),
        }
    }

    /// Builds the backend payload, reading the selected date and time as wall
    /// clock values in `tz`.
    ///
    /// An ambiguous local time (clocks turned back) resolves to the earlier
    /// instant. A local time skipped by a clock change is rejected.
    pub fn to_new_appointment<Tz: TimeZone>(&self, tz: &Tz) -> ClinicResult<NewAppointment> {
        let (date, time) = self.validate()?;
        let preferred_date_time = tz
            .from_local_datetime(&date.and_time(time.to_time()))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                ClinicError::Validation(format!(
                    "{} {} does not exist in the clinic timezone",
                    date, time
                ))
            })?;

        Ok(NewAppointment {
            patient_name: self.patient_name.trim().to_string(),
            patient_phone: phone_digits(&self.patient_phone),
            patient_email: self.patient_email.trim().to_string(),
            reason: self.reason.trim().to_string(),
            preferred_date_time,
            scheduled_date_time: preferred_date_time,
            status: AppointmentStatus::Pending,
        })
    }
}
