//! # ClinicBook Client
//!
//! Access to the clinic REST backend and the stateful booking desk built on it.
//!
//! - [`repositories`] wraps each backend endpoint as a plain async function
//! - [`source::AppointmentSource`] is the seam the desk depends on
//! - [`desk::BookingDesk`] keeps the current booked index and answers
//!   availability queries

pub mod desk;
pub mod repositories;
pub mod source;

pub mod mock;

use std::time::Duration;

use eyre::{Result, WrapErr};
use reqwest::RequestBuilder;

/// HTTP handle to the clinic backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the bearer token when one is configured.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Creates a backend client with a per-request timeout.
pub fn create_client(base_url: &str, token: Option<String>, timeout: Duration) -> Result<BackendClient> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .wrap_err("Failed to build backend HTTP client")?;

    Ok(BackendClient {
        http,
        base_url: base_url.trim_end_matches('/').to_string(),
        token,
    })
}
