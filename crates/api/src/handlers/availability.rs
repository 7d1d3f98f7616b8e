//! # Availability Handlers
//!
//! Serves the candidate start times for a new appointment on a given day.
//!
//! The handler follows a one-way flow:
//!
//! 1. Fetch the day's non-cancelled appointments from the appointment repository
//! 2. Reduce them to booked intervals, keeping the repository's order
//! 3. Run the slot calculator from `clinicdesk_core::availability`
//! 4. Render the slots as JSON
//!
//! A failed fetch is returned as an error; slots are never computed against
//! a partial or missing booking list.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use clinicdesk_core::{
    availability::{compute_slots, validate_duration, BookedInterval, CandidateSlot},
    errors::ClinicError,
    models::appointment::{
        booked_intervals, Appointment, AppointmentFilter, DEFAULT_DURATION_MINUTES,
    },
    workday::WorkdayConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
///
/// * `date` - Day to compute slots for (`YYYY-MM-DD`)
/// * `duration` - Requested appointment length in minutes (default: 30)
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResponse {
    /// Start time as `HH:MM`
    pub time: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available: bool,
    pub conflict_reason: Option<String>,
}

impl From<CandidateSlot> for SlotResponse {
    fn from(slot: CandidateSlot) -> Self {
        Self {
            time: slot.label(),
            conflict_reason: slot.reason(),
            start: slot.start,
            end: slot.end,
            available: slot.available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub duration: i64,
    pub workday: WorkdayConfig,
    pub slots: Vec<SlotResponse>,
}

/// Booked intervals of stored appointments.
///
/// A stored appointment that does not end after it starts is a data fault,
/// reported as `ClinicError::Internal` instead of blaming the request.
pub(crate) fn stored_bookings(
    appointments: &[Appointment],
) -> Result<Vec<BookedInterval>, ClinicError> {
    let bookings = booked_intervals(appointments);
    for booking in &bookings {
        booking
            .validate()
            .map_err(|err| ClinicError::Internal(Box::new(err)))?;
    }
    Ok(bookings)
}

/// Lists the candidate slots of a day with their availability
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2024-01-12&duration=60
/// ```
///
/// # Errors
///
/// * `ClinicError::Validation` - Duration outside 1..=1440 minutes
/// * `ClinicError::Database` - The day's appointments could not be fetched
/// * `ClinicError::Internal` - A stored booking ends before it starts
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let duration = query
        .duration
        .unwrap_or(i64::from(DEFAULT_DURATION_MINUTES));
    validate_duration(duration)?;

    let appointments = state
        .appointments
        .list_appointments(AppointmentFilter::active_on(query.date))
        .await
        .map_err(ClinicError::Database)?;
    let bookings = stored_bookings(&appointments)?;

    let slots = compute_slots(&state.workday, query.date, duration, &bookings)?;

    tracing::debug!(
        "Computed {} slots for {} ({} min, {} bookings), {} available",
        slots.len(),
        query.date,
        duration,
        bookings.len(),
        slots.iter().filter(|slot| slot.available).count()
    );

    Ok(Json(AvailabilityResponse {
        date: query.date,
        duration,
        workday: state.workday,
        slots: slots.into_iter().map(SlotResponse::from).collect(),
    }))
}
