use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use clinicdesk_core::{
    errors::ClinicError,
    models::medical_log::{CreateMedicalLogRequest, MedicalLog},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct MedicalLogQuery {
    pub patient_id: Option<Uuid>,
}

#[axum::debug_handler]
pub async fn list_medical_logs(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<MedicalLogQuery>,
) -> Result<Json<Vec<MedicalLog>>, AppError> {
    let logs = state
        .medical_logs
        .list_medical_logs(query.patient_id)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(logs))
}

#[axum::debug_handler]
pub async fn create_medical_log(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateMedicalLogRequest>,
) -> Result<(StatusCode, Json<MedicalLog>), AppError> {
    payload.validate()?;

    state
        .patients
        .get_patient(payload.patient_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Patient with ID {} not found", payload.patient_id))
        })?;

    let log = state
        .medical_logs
        .create_medical_log(payload)
        .await
        .map_err(ClinicError::Database)?;

    Ok((StatusCode::CREATED, Json(log)))
}
