//! # Admin Handlers
//!
//! Appointment and staff management for the admin panel. Appointment listing
//! is filtered and paged by the backend; the staff list is fetched whole and
//! filtered and paged here. Changes to appointments reload the booking desk so
//! the public form reflects them immediately.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use clinicbook_client::repositories;
use clinicbook_core::{
    errors::ClinicError,
    listing::{AppointmentListQuery, DEFAULT_PER_PAGE, Page, PageRequest, UserFilter, filter_users, paginate, total_pages},
    models::{
        appointment::{Appointment, AppointmentsSummary, UpdateAppointmentRequest},
        user::{CreateUserRequest, UpdateUserRequest, User},
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl UserListQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

/// Reloads the desk after an admin change. The change itself already
/// succeeded, so a failed reload is only logged.
async fn reload_availability(state: &ApiState) {
    if let Err(err) = state.desk.refresh().await {
        warn!(error = %err, "Could not reload availability after admin change");
    }
}

pub async fn get_summary(State(state): State<Arc<ApiState>>) -> Result<Json<AppointmentsSummary>, AppError> {
    let summary = repositories::appointment::get_appointments_summary(&state.backend).await?;

    Ok(Json(summary))
}

/// # Endpoint
///
/// ```text
/// GET /api/admin/appointments?page=1&limit=10&patientName=ana&status=pending&dateFrom=2025-03-01&dateTo=2025-03-31
/// ```
///
/// `dateFrom` and `dateTo` are clinic-local days; the whole of both days is
/// included.
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Page<Appointment>>, AppError> {
    let params = query.to_params(&state.desk.timezone())?;
    let response = repositories::appointment::list_appointments(&state.backend, &params).await?;

    Ok(Json(Page {
        total_pages: total_pages(response.total, response.limit),
        items: response.data,
        total: response.total,
        page: response.page,
        per_page: response.limit,
    }))
}

pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = repositories::appointment::get_appointment_by_id(&state.backend, &id)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = repositories::appointment::update_appointment(&state.backend, &id, &payload).await?;
    info!(appointment_id = %id, status = %appointment.status, "Appointment updated");
    reload_availability(&state).await;

    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    repositories::appointment::delete_appointment(&state.backend, &id).await?;
    info!(appointment_id = %id, "Appointment deleted");
    reload_availability(&state).await;

    Ok(StatusCode::NO_CONTENT)
}

/// # Endpoint
///
/// ```text
/// GET /api/admin/users?email=clinic.mx&name=mart&role=secretary&page=1&perPage=10
/// ```
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Page<User>>, AppError> {
    let users = repositories::user::list_users(&state.backend).await?;
    let filtered = filter_users(&users, &query.filter());

    Ok(Json(paginate(filtered, query.page_request())))
}

pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = repositories::user::get_user_by_id(&state.backend, &id)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("User with ID {} not found", id)))?;

    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = repositories::user::create_user(&state.backend, &payload).await?;
    info!(user_id = %user.id, role = %user.role, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = repositories::user::update_user(&state.backend, &id, &payload).await?;

    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    repositories::user::soft_delete_user(&state.backend, &id).await?;
    info!(user_id = %id, "User soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}
