use async_trait::async_trait;
use clinicbook_core::models::appointment::{Appointment, BookingRecord, NewAppointment};
use mockall::mock;

use crate::source::AppointmentSource;

// Mock backend for testing
mock! {
    pub AppointmentSource {}

    #[async_trait]
    impl AppointmentSource for AppointmentSource {
        async fn fetch_upcoming_appointments(&self) -> eyre::Result<Vec<BookingRecord>>;

        async fn submit_appointment(
            &self,
            appointment: &NewAppointment,
        ) -> eyre::Result<Appointment>;
    }
}
