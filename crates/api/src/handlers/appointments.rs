use axum::{extract::State, http::StatusCode, Json};
use clinicbook_core::{booking::BookingForm, models::appointment::Appointment};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Books an appointment from the patient form.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// # Errors
///
/// * `ClinicError::Validation` - a form field is missing or malformed
/// * `ClinicError::Conflict` - the chosen slot is no longer offered
/// * `ClinicError::Backend` - the backend rejected the booking
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = state.desk.book(&form).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
