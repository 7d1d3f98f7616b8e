use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/patients/:id/vitals",
            get(handlers::vitals::list_vitals).post(handlers::vitals::create_vitals),
        )
        .route(
            "/api/patients/:id/vitals/latest",
            get(handlers::vitals::latest_vitals),
        )
}
