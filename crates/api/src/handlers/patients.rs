use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use clinicdesk_core::{
    errors::ClinicError,
    models::patient::{
        CreatePatientRequest, Patient, PatientFilter, PatientStatus, UpdatePatientRequest,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PatientQuery {
    pub fn into_filter(self) -> Result<PatientFilter, ClinicError> {
        let status = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<PatientStatus>)
            .transpose()?;

        Ok(PatientFilter {
            search: self.search,
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientListResponse {
    pub patients: Vec<Patient>,
    pub count: usize,
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<PatientListResponse>, AppError> {
    let filter = query.into_filter()?;

    let patients = state
        .patients
        .list_patients(filter)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(PatientListResponse {
        count: patients.len(),
        patients,
    }))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, AppError> {
    let patient = state
        .patients
        .get_patient(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", id)))?;

    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    payload.validate()?;

    let patient = state
        .patients
        .create_patient(payload)
        .await
        .map_err(ClinicError::Database)?;

    tracing::info!("Registered patient {}", patient.id);

    Ok((StatusCode::CREATED, Json(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    if let Some(email) = &payload.email {
        if !email.contains('@') {
            return Err(AppError(ClinicError::Validation(format!(
                "Invalid email address: '{}'",
                email
            ))));
        }
    }

    let patient = state
        .patients
        .update_patient(id, payload)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", id)))?;

    Ok(Json(patient))
}
