//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use clinicbook_core::errors::ClinicError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicbook_api::middleware::error_handling::AppError;
/// use clinicbook_core::errors::ClinicError;
///
/// async fn handler(id: String) -> Result<Json<String>, AppError> {
///     if id.is_empty() {
///         return Err(AppError(ClinicError::Validation("id is required".to_string())));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::Conflict(_) => StatusCode::CONFLICT,
            ClinicError::Backend(_) => StatusCode::BAD_GATEWAY,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
    
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(%status, error = %message, "Request failed");
        }
        let body = Json(json!({ "error": message }));
    
        (status, body).into_response()
    }
}

impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Errors from backend calls surface as `502 Bad Gateway`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Backend(err))
    }
}

/// Maps a ClinicError to an HTTP response
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}
