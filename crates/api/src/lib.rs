//! # ClinicBook API
//!
//! The web service behind the clinic's booking form and admin panel.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into booking desk and backend calls
//! - **Middleware**: Error mapping shared by every endpoint
//! - **Config**: Environment and clinic schedule configuration
//!
//! Availability is answered from the in-memory booking desk; everything else
//! is forwarded to the clinic REST backend.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use clinicbook_client::{BackendClient, create_client, desk::BookingDesk};
use clinicbook_core::{availability::AvailabilityCalculator, clock::SystemClock};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Current availability and the booking flow
    pub desk: Arc<BookingDesk>,

    /// Client for admin calls forwarded to the backend
    pub backend: BackendClient,
}

/// Builds the application router with all routes
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Patient booking form endpoints
        .merge(routes::availability::routes())
        .merge(routes::appointments::routes())
        // Admin panel endpoints
        .merge(routes::admin::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration
///
/// Loads the first appointment snapshot before listening. If the backend is
/// unreachable at that point the server still starts with every slot open and
/// the next refresh or booking retries the fetch.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let timeout = Duration::from_secs(config.request_timeout);
    let backend = create_client(&config.backend_url, config.backend_token.clone(), timeout)?;
    let calculator = AvailabilityCalculator::new(&config.schedule)?;
    let desk = Arc::new(BookingDesk::new(
        Arc::new(backend.clone()),
        calculator,
        config.timezone,
        Arc::new(SystemClock),
    ));

    match desk.refresh().await {
        Ok(index) => info!(booked = index.len(), "Loaded initial appointment snapshot"),
        Err(err) => warn!(error = %err, "Starting without an appointment snapshot"),
    }

    let state = Arc::new(ApiState { desk, backend });
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<axum::http::HeaderValue>>(),
            )
            .allow_credentials(true);
        
        app.layer(cors)
    } else {
        app
    };

    let app = app
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
