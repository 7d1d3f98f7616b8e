//! # ClinicDesk API
//!
//! The API crate provides the web server for the ClinicDesk clinic-management
//! service. It exposes JSON endpoints for patients, appointments, slot
//! availability, vitals, medical logs and dashboard statistics.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Fetch from the repositories, compute with `clinicdesk-core`, render JSON
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and reaches the database only
//! through the repository traits of `clinicdesk-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use clinicdesk_core::workday::WorkdayConfig;
use clinicdesk_db::repositories::{
    AppointmentRepository, MedicalLogRepository, PatientRepository, PgStore, VitalsRepository,
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Each table is reached through its repository trait so tests can swap in
/// the mocks from `clinicdesk_db::mock::repositories`.
pub struct ApiState {
    pub patients: Arc<dyn PatientRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub vitals: Arc<dyn VitalsRepository>,
    pub medical_logs: Arc<dyn MedicalLogRepository>,
    /// Workday window for slot generation
    pub workday: WorkdayConfig,
}

impl ApiState {
    /// State backed by PostgreSQL for every repository.
    pub fn from_pool(db_pool: PgPool, workday: WorkdayConfig) -> Self {
        let store = Arc::new(PgStore::new(db_pool));

        Self {
            patients: store.clone(),
            appointments: store.clone(),
            vitals: store.clone(),
            medical_logs: store,
            workday,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Patient records and their vitals
        .merge(routes::patients::routes())
        .merge(routes::vitals::routes())
        // Appointment booking and slot availability
        .merge(routes::appointments::routes())
        .merge(routes::availability::routes())
        // Medical records and dashboard
        .merge(routes::medical_logs::routes())
        .merge(routes::dashboard::routes())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function sets up logging, configures routes and layers, and serves
/// HTTP until the process is stopped.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = clinicdesk_api::config::ApiConfig::from_env()?;
/// let db_pool = clinicdesk_db::create_pool(&config.database_url).await?;
/// clinicdesk_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Workday {}-{} with {}-minute slots",
        config.workday.start.format("%H:%M"),
        config.workday.end.format("%H:%M"),
        config.workday.cadence_minutes
    );

    let state = Arc::new(ApiState::from_pool(db_pool, config.workday));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
