use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use clinicdesk_core::{
    availability::{ensure_bookable, validate_duration},
    errors::ClinicError,
    models::appointment::{
        Appointment, AppointmentFilter, AppointmentListing, AppointmentStatus, AppointmentType,
        CreateAppointmentRequest, NewAppointment, UpdateAppointmentStatusRequest,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::availability::stored_bookings, middleware::error_handling::AppError, ApiState,
};

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub patient_id: Option<Uuid>,
}

impl From<AppointmentQuery> for AppointmentFilter {
    fn from(query: AppointmentQuery) -> Self {
        AppointmentFilter {
            date: query.date,
            from: query.from,
            to: query.to,
            patient_id: query.patient_id,
            exclude_status: None,
        }
    }
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<AppointmentListing>>, AppError> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(AppError(ClinicError::Validation(format!(
                "Range start {} is after range end {}",
                from, to
            ))));
        }
    }

    let appointments = state
        .appointments
        .list_appointment_listings(query.into())
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .appointments
        .get_appointment(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(appointment))
}

/// Books an appointment after re-checking the slot against the day's bookings
///
/// # Errors
///
/// * `ClinicError::NotFound` - Unknown patient
/// * `ClinicError::Validation` - Bad duration, an end past midnight, or a start off the slot grid
/// * `ClinicError::Conflict` - The slot overlaps a booking or runs past closing time
/// * `ClinicError::Internal` - A stored booking of that day ends before it starts
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let duration = payload.duration_minutes();
    validate_duration(i64::from(duration))?;
    let end_time = payload.end_time().ok_or_else(|| {
        ClinicError::Validation("Appointment must end on the day it starts".to_string())
    })?;

    state
        .patients
        .get_patient(payload.patient_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Patient with ID {} not found", payload.patient_id))
        })?;

    let existing = state
        .appointments
        .list_appointments(AppointmentFilter::active_on(payload.date))
        .await
        .map_err(ClinicError::Database)?;

    ensure_bookable(
        &state.workday,
        payload.date,
        payload.start_time,
        i64::from(duration),
        &stored_bookings(&existing)?,
    )?;

    let appointment = state
        .appointments
        .create_appointment(NewAppointment {
            patient_id: payload.patient_id,
            provider_id: payload.provider_id,
            date: payload.date,
            start_time: payload.start_time,
            end_time,
            duration,
            appointment_type: payload.appointment_type.unwrap_or(AppointmentType::Checkup),
            status: AppointmentStatus::Scheduled,
            notes: payload.notes.filter(|notes| !notes.trim().is_empty()),
        })
        .await
        .map_err(ClinicError::Database)?;

    tracing::info!(
        "Scheduled appointment {} on {} at {}",
        appointment.id,
        appointment.date,
        appointment.start_time.format("%H:%M")
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let current = state
        .appointments
        .get_appointment(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let next = current.status.transition_to(payload.status)?;

    let updated = state
        .appointments
        .update_appointment_status(id, next)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {} not found", id)))?;

    tracing::info!("Appointment {} moved from {} to {}", id, current.status, next);

    Ok(Json(updated))
}
