use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/medical-logs",
        get(handlers::medical_logs::list_medical_logs)
            .post(handlers::medical_logs::create_medical_log),
    )
}
