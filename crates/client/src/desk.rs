//! # Booking Desk
//!
//! The booking desk holds the one piece of state behind the booking form: the
//! booked index built from the latest snapshot. Each refresh builds a new
//! index and swaps it in whole; readers clone the `Arc` and never see a
//! partially built index. Overlapping refreshes are ordered by
//! [`RequestSequencer`], so a slow, stale fetch cannot overwrite a newer one.

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate};
use chrono_tz::Tz;
use clinicbook_core::{
    availability::{AvailabilityCalculator, BookedIndex, TimeSlot},
    booking::BookingForm,
    clock::Clock,
    errors::{ClinicError, ClinicResult},
    models::appointment::{Appointment, BookingRecord},
    sequence::{RequestSequencer, RequestToken},
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::source::AppointmentSource;

pub struct BookingDesk {
    source: Arc<dyn AppointmentSource>,
    calculator: AvailabilityCalculator,
    timezone: Tz,
    clock: Arc<dyn Clock>,
    sequencer: RequestSequencer,
    index: RwLock<Arc<BookedIndex>>,
}

impl BookingDesk {
    /// Creates a desk with an empty index. Call [`refresh`](Self::refresh) to
    /// load the first snapshot.
    pub fn new(
        source: Arc<dyn AppointmentSource>,
        calculator: AvailabilityCalculator,
        timezone: Tz,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            calculator,
            timezone,
            clock,
            sequencer: RequestSequencer::new(),
            index: RwLock::new(Arc::new(BookedIndex::default())),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn calculator(&self) -> &AvailabilityCalculator {
        &self.calculator
    }

    /// Current instant in the clinic timezone.
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }

    /// The index currently in effect.
    pub async fn index(&self) -> Arc<BookedIndex> {
        self.index.read().await.clone()
    }

    /// Reserves a token for a fetch performed outside [`refresh`](Self::refresh).
    pub fn begin_refresh(&self) -> RequestToken {
        self.sequencer.issue()
    }

    /// Fetches a fresh snapshot and swaps in its index.
    ///
    /// On failure the previous index stays in effect and the error is returned
    /// so the caller can offer a retry.
    pub async fn refresh(&self) -> ClinicResult<Arc<BookedIndex>> {
        let token = self.begin_refresh();
        let records = self
            .source
            .fetch_upcoming_appointments()
            .await
            .map_err(|err| {
                warn!(token = token.value(), error = %err, "Failed to fetch appointment snapshot");
                ClinicError::Backend(err)
            })?;

        self.apply_snapshot(token, &records).await;
        Ok(self.index().await)
    }

    /// Builds an index from `records` and installs it unless a result from a
    /// newer token is already in place. Returns whether it was installed.
    pub async fn apply_snapshot(&self, token: RequestToken, records: &[BookingRecord]) -> bool {
        let index = Arc::new(BookedIndex::build(records, &self.timezone));

        let mut current = self.index.write().await;
        if !self.sequencer.try_apply(token) {
            debug!(
                token = token.value(),
                applied = ?self.sequencer.last_applied().map(|applied| applied.value()),
                "Discarding stale appointment snapshot"
            );
            return false;
        }

        info!(
            token = token.value(),
            records = records.len(),
            booked = index.len(),
            "Installed booked index"
        );
        *current = index;
        true
    }

    /// Bookable dates from today across the horizon.
    pub async fn available_dates(&self) -> Vec<NaiveDate> {
        let index = self.index().await;
        self.calculator.available_dates(&index, &self.now())
    }

    /// Bookable times for a raw `YYYY-MM-DD` selection. An empty or invalid
    /// selection yields no times.
    pub async fn available_times(&self, selected_date: &str) -> Vec<TimeSlot> {
        let index = self.index().await;
        self.calculator
            .available_times_for_input(&index, selected_date, &self.now())
    }

    fn within_horizon(&self, date: NaiveDate, now: &DateTime<Tz>) -> bool {
        let today = now.date_naive();
        today
            .checked_add_days(Days::new(self.calculator.horizon_days().into()))
            .is_some_and(|end| date >= today && date < end)
    }

    /// Validates `form`, checks the slot is still offered, submits it and
    /// reloads the snapshot.
    ///
    /// # Errors
    ///
    /// * `ClinicError::Validation` - the form is incomplete or malformed
    /// * `ClinicError::Conflict` - the slot is booked, elapsed or outside the horizon
    /// * `ClinicError::Backend` - the backend rejected or could not take the booking
    pub async fn book(&self, form: &BookingForm) -> ClinicResult<Appointment> {
        let (date, time) = form.validate()?;
        let now = self.now();
        let index = self.index().await;

        let offered = self.within_horizon(date, &now)
            && self
                .calculator
                .available_times(&index, date, &now)
                .contains(&time);
        if !offered {
            return Err(ClinicError::Conflict(format!(
                "{} {} is not available",
                date, time
            )));
        }

        let payload = form.to_new_appointment(&self.timezone)?;
        let appointment = self
            .source
            .submit_appointment(&payload)
            .await
            .map_err(ClinicError::Backend)?;
        info!(appointment_id = %appointment.id, %date, %time, "Appointment booked");

        if let Err(err) = self.refresh().await {
            warn!(error = %err, "Booked appointment but could not reload availability");
        }

        Ok(appointment)
    }
}
