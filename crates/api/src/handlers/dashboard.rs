use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use clinicdesk_core::{
    errors::ClinicError,
    models::{
        appointment::AppointmentFilter,
        dashboard::{month_bounds, DashboardStats},
        patient::PatientFilter,
    },
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// `date` defaults to today (UTC).
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<NaiveDate>,
}

/// Headline counts for the dashboard
///
/// Appointments are fetched from the first day of the month onwards, so
/// pending follow-ups cover this month and everything booked after it.
#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    let today = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let (month_start, _) = month_bounds(today);

    let patients = state
        .patients
        .list_patients(PatientFilter::default())
        .await
        .map_err(ClinicError::Database)?;

    let appointments = state
        .appointments
        .list_appointments(AppointmentFilter {
            from: Some(month_start),
            ..AppointmentFilter::default()
        })
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(DashboardStats::compute(&patients, &appointments, today)))
}
