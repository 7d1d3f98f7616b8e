//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the ClinicDesk API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `CLINIC_WORKDAY_START`: First bookable time, `HH:MM` (default: "08:00")
//! - `CLINIC_WORKDAY_END`: Closing time, `HH:MM` (default: "18:00")
//! - `CLINIC_SLOT_CADENCE_MINUTES`: Spacing between slot start times (default: 30)

use clinicdesk_core::workday::{
    parse_time_of_day, WorkdayConfig, DEFAULT_SLOT_CADENCE_MINUTES, DEFAULT_WORKDAY_END,
    DEFAULT_WORKDAY_START,
};
use eyre::{eyre, Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the ClinicDesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicdesk_api::config::ApiConfig;
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

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Bookable window and slot cadence used by the availability calculator
    pub workday: WorkdayConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The workday variables do not describe a valid window
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match var_or("LOG_LEVEL", "info").as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = var_or("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let workday_start = parse_time_of_day(&var_or("CLINIC_WORKDAY_START", DEFAULT_WORKDAY_START))
            .wrap_err("Invalid CLINIC_WORKDAY_START value")?;
        let workday_end = parse_time_of_day(&var_or("CLINIC_WORKDAY_END", DEFAULT_WORKDAY_END))
            .wrap_err("Invalid CLINIC_WORKDAY_END value")?;
        let cadence_minutes = match lookup("CLINIC_SLOT_CADENCE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err("Invalid CLINIC_SLOT_CADENCE_MINUTES value")?,
            None => DEFAULT_SLOT_CADENCE_MINUTES,
        };
        let workday = WorkdayConfig::new(workday_start, workday_end, cadence_minutes)
            .wrap_err("Invalid workday configuration")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            workday,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
