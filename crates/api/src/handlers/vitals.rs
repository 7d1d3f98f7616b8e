use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use clinicdesk_core::{
    errors::ClinicError,
    models::vitals::{CreateVitalsRequest, LatestVitalsResponse, VitalsRange, VitalsRecord},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// `range` is one of `7d`, `30d`, `90d`, `1y`; anything else reads as `30d`.
#[derive(Debug, Default, Deserialize)]
pub struct VitalsQuery {
    pub range: Option<String>,
}

async fn ensure_patient_exists(state: &ApiState, patient_id: Uuid) -> Result<(), AppError> {
    state
        .patients
        .get_patient(patient_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", patient_id)))?;
    Ok(())
}

#[axum::debug_handler]
pub async fn list_vitals(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
    Query(query): Query<VitalsQuery>,
) -> Result<Json<Vec<VitalsRecord>>, AppError> {
    let range = VitalsRange::parse_or_default(query.range.as_deref());
    let since = range.since(Utc::now());

    let vitals = state
        .vitals
        .list_vitals(patient_id, since)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(vitals))
}

/// Most recent reading of the last year, with each measurement classified.
#[axum::debug_handler]
pub async fn latest_vitals(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<LatestVitalsResponse>, AppError> {
    let since = VitalsRange::Year.since(Utc::now());

    let record = state
        .vitals
        .list_vitals(patient_id, since)
        .await
        .map_err(ClinicError::Database)?
        .into_iter()
        .max_by_key(|record| record.recorded_at)
        .ok_or_else(|| {
            ClinicError::NotFound(format!("No vitals recorded for patient {}", patient_id))
        })?;

    Ok(Json(LatestVitalsResponse {
        assessment: record.assess(),
        record,
    }))
}

#[axum::debug_handler]
pub async fn create_vitals(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
    Json(payload): Json<CreateVitalsRequest>,
) -> Result<(StatusCode, Json<VitalsRecord>), AppError> {
    let new_vitals = payload.into_new_vitals(patient_id);
    new_vitals.validate()?;

    ensure_patient_exists(&state, patient_id).await?;

    let record = state
        .vitals
        .create_vitals(new_vitals)
        .await
        .map_err(ClinicError::Database)?;

    tracing::info!("Recorded vitals {} for patient {}", record.id, patient_id);

    Ok((StatusCode::CREATED, Json(record)))
}
