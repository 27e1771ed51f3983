//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the ClinicBook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `BACKEND_URL`: Base URL of the clinic REST backend (required)
//! - `BACKEND_TOKEN`: Bearer token sent to the backend (optional)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Timeout for inbound and backend requests (default: 30)
//! - `CLINIC_TIMEZONE`: IANA timezone of the clinic (default: "America/Mexico_City")
//! - `CLINIC_START_TIME`, `CLINIC_END_TIME`: Daily slot window (default: "16:30", "20:00")
//! - `CLINIC_SLOT_MINUTES`: Slot granularity (default: 30)
//! - `CLINIC_HORIZON_DAYS`: Days offered for booking (default: 60)

use chrono_tz::Tz;
use clinicbook_core::config::{DEFAULT_TIMEZONE, ScheduleConfig};
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Configuration for the ClinicBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,
    
    /// Port for the API server to listen on
    pub port: u16,
    
    /// Base URL of the clinic backend
    pub backend_url: String,
    
    /// Bearer token for backend calls (optional)
    pub backend_token: Option<String>,
    
    /// Log level for the application
    pub log_level: Level,
    
    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,
    
    /// Request timeout in seconds
    pub request_timeout: u64,
    
    /// Timezone all dates and times are shown in
    pub timezone: Tz,
    
    /// Daily slot window and booking horizon
    pub schedule: ScheduleConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The BACKEND_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - A CLINIC_* value is malformed or describes an empty slot window
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;
        
        // Backend settings
        let backend_url = var("BACKEND_URL")
            .ok_or_else(|| eyre!("BACKEND_URL environment variable must be set"))?;
        let backend_token = var("BACKEND_TOKEN").filter(|token| !token.is_empty());
        
        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        
        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });
        
        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);
        
        // Clinic settings
        let timezone_name = var("CLINIC_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|err| eyre!("Invalid CLINIC_TIMEZONE {:?}: {}", timezone_name, err))?;
        
        let defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            start_time: parse_or(&var, "CLINIC_START_TIME", defaults.start_time)?,
            end_time: parse_or(&var, "CLINIC_END_TIME", defaults.end_time)?,
            step_minutes: parse_or(&var, "CLINIC_SLOT_MINUTES", defaults.step_minutes)?,
            horizon_days: parse_or(&var, "CLINIC_HORIZON_DAYS", defaults.horizon_days)?,
        };
        schedule
            .validate()
            .wrap_err("Invalid clinic schedule configuration")?;
        
        Ok(Self {
            host,
            port,
            backend_url,
            backend_token,
            log_level,
            cors_origins,
            request_timeout,
            timezone,
            schedule,
        })
    }
    
    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(value) => value
            .parse()
            .map_err(|err| eyre!("Invalid {} value {:?}: {}", key, value, err)),
        None => Ok(default),
    }
}
