use async_trait::async_trait;
use clinicbook_core::models::appointment::{Appointment, BookingRecord, NewAppointment};
use eyre::Result;

use crate::{BackendClient, repositories};

/// Where the booking desk reads its snapshot and sends new bookings.
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    /// Upcoming appointments, cancelled ones included. Must carry status.
    async fn fetch_upcoming_appointments(&self) -> Result<Vec<BookingRecord>>;

    async fn submit_appointment(&self, appointment: &NewAppointment) -> Result<Appointment>;
}

#[async_trait]
impl AppointmentSource for BackendClient {
    async fn fetch_upcoming_appointments(&self) -> Result<Vec<BookingRecord>> {
        repositories::appointment::get_future_appointments(self).await
    }

    async fn submit_appointment(&self, appointment: &NewAppointment) -> Result<Appointment> {
        repositories::appointment::create_appointment(self, appointment).await
    }
}
