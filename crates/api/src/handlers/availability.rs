//! # Availability Handlers
//!
//! Read-only views of the booking desk used by the patient booking form. The
//! form asks for the bookable dates once, then asks for the times of each
//! date the patient selects.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use clinicbook_core::availability::TimeSlot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    /// Dates with at least one open slot, ascending
    pub dates: Vec<NaiveDate>,

    /// Every slot the clinic offers in a day
    pub slots: Vec<TimeSlot>,

    /// IANA timezone the dates and slots are expressed in
    pub timezone: String,
}

#[derive(Debug, Deserialize)]
pub struct TimesQuery {
    /// Selected date as `YYYY-MM-DD`; missing or malformed means none selected
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub date: String,
    pub times: Vec<TimeSlot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Number of taken (date, time) pairs in the new snapshot
    pub booked: usize,
}

/// Lists the bookable dates across the horizon.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability
/// ```
pub async fn get_available_dates(State(state): State<Arc<ApiState>>) -> Json<AvailableDatesResponse> {
    let dates = state.desk.available_dates().await;

    Json(AvailableDatesResponse {
        dates,
        slots: state.desk.calculator().slots().to_vec(),
        timezone: state.desk.timezone().name().to_string(),
    })
}

/// Lists the bookable times of one date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/times?date=2025-03-10
/// ```
///
/// A missing or unparseable date yields an empty list rather than an error;
/// the form treats it as "no date selected".
pub async fn get_available_times(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TimesQuery>,
) -> Json<AvailableTimesResponse> {
    let date = query.date.unwrap_or_default();
    let times = state.desk.available_times(&date).await;

    Json(AvailableTimesResponse { date, times })
}

/// Reloads the appointment snapshot from the backend.
///
/// # Endpoint
///
/// ```text
/// POST /api/availability/refresh
/// ```
///
/// # Errors
///
/// * `ClinicError::Backend` - the backend could not be reached; the previous
///   availability stays in effect
pub async fn refresh_availability(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<RefreshResponse>, AppError> {
    let index = state.desk.refresh().await?;

    Ok(Json(RefreshResponse { booked: index.len() }))
}
