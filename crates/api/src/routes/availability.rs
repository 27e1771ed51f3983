use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            get(handlers::availability::get_available_dates),
        )
        .route(
            "/api/availability/times",
            get(handlers::availability::get_available_times),
        )
        .route(
            "/api/availability/refresh",
            post(handlers::availability::refresh_availability),
        )
}
