//! # Error Handling Middleware
//!
//! Turns `ClinicError` into HTTP responses. Every failure leaves the API as
//! a status code plus a JSON body of the form `{"error": "<message>"}`:
//!
//! | Variant      | Status |
//! |--------------|--------|
//! | `NotFound`   | 404    |
//! | `Validation` | 400    |
//! | `Conflict`   | 409    |
//! | `Database`   | 500    |
//! | `Internal`   | 500    |
//!
//! Server-side failures are logged with their full report before the
//! response is sent; client errors are not logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinicdesk_core::errors::ClinicError;
use serde_json::json;

/// Handler error type
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicdesk_api::middleware::error_handling::AppError;
/// use clinicdesk_core::errors::ClinicError;
///
/// async fn handler(duration: i64) -> Result<Json<i64>, AppError> {
///     if duration <= 0 {
///         return Err(AppError(ClinicError::Validation(
///             "Duration must be positive".to_string(),
///         )));
///     }
///     Ok(Json(duration))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::Conflict(_) => StatusCode::CONFLICT,
            ClinicError::Database(_) | ClinicError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {:?}", status, self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `ClinicError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}
