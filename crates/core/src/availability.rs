//! # Slot Availability
//!
//! Generates the candidate start times for a new appointment on a given day
//! and marks each one available or not.
//!
//! ## Algorithm
//!
//! 1. Walk the workday from `start` to `end` (exclusive) in cadence steps
//! 2. For each step, build the candidate interval `[start, start + duration)`
//! 3. Scan the booked intervals in input order; the first one overlapping the
//!    candidate marks it unavailable and is cited as the conflict
//! 4. Independently, a candidate ending after the workday end is marked
//!    unavailable with "exceeds work hours", replacing any booking conflict
//!
//! Two intervals overlap when `a.start < b.end && a.end > b.start`, so
//! back-to-back appointments do not conflict. A candidate ending exactly at
//! the workday end is still bookable.
//!
//! The cost is O(slots × bookings), which for a clinic day is a few dozen
//! slots against a handful of appointments.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{ClinicError, ClinicResult},
    workday::WorkdayConfig,
};

/// Longest appointment the calculator accepts, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Time range occupied by an active appointment on the queried day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BookedInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> ClinicResult<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> ClinicResult<()> {
        if self.end <= self.start {
            return Err(ClinicError::Validation(format!(
                "Booked interval ending at {} does not end after its start {}",
                self.end.format("%H:%M"),
                self.start.format("%H:%M")
            )));
        }
        Ok(())
    }
}

/// Why a candidate slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotConflict {
    ExceedsWorkHours,
    Booked { appointment_start: NaiveTime },
}

impl fmt::Display for SlotConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotConflict::ExceedsWorkHours => write!(f, "exceeds work hours"),
            SlotConflict::Booked { appointment_start } => write!(
                f,
                "conflicts with appointment at {}",
                appointment_start.format("%H:%M")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available: bool,
    pub conflict: Option<SlotConflict>,
}

impl CandidateSlot {
    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    /// Start time as `HH:MM`.
    pub fn label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn reason(&self) -> Option<String> {
        self.conflict.map(|conflict| conflict.to_string())
    }
}

/// Rejects durations outside `1..=MAX_DURATION_MINUTES`.
pub fn validate_duration(duration_minutes: i64) -> ClinicResult<()> {
    if duration_minutes <= 0 || duration_minutes > MAX_DURATION_MINUTES {
        return Err(ClinicError::Validation(format!(
            "Appointment duration must be between 1 and {} minutes, got {}",
            MAX_DURATION_MINUTES, duration_minutes
        )));
    }
    Ok(())
}

/// Computes every candidate slot of `date` for an appointment of
/// `duration_minutes`, given the day's active bookings.
///
/// # Errors
///
/// * `ClinicError::Validation` - the duration is not positive or longer than
///   a day, a booked interval does not end after it starts, or the workday
///   window itself is invalid
pub fn compute_slots(
    workday: &WorkdayConfig,
    date: NaiveDate,
    duration_minutes: i64,
    bookings: &[BookedInterval],
) -> ClinicResult<Vec<CandidateSlot>> {
    workday.validate()?;
    validate_duration(duration_minutes)?;
    for booking in bookings {
        booking.validate()?;
    }

    let duration = Duration::minutes(duration_minutes);
    let day_end = date.and_time(workday.end);
    let mut current = date.and_time(workday.start);
    let mut slots = Vec::with_capacity(workday.slot_count());

    while current < day_end {
        let slot_end = current + duration;

        let mut conflict = bookings
            .iter()
            .find(|booking| {
                current < date.and_time(booking.end) && slot_end > date.and_time(booking.start)
            })
            .map(|booking| SlotConflict::Booked {
                appointment_start: booking.start,
            });

        // The work-hours check runs last and takes precedence.
        if slot_end > day_end {
            conflict = Some(SlotConflict::ExceedsWorkHours);
        }

        slots.push(CandidateSlot {
            start: current,
            end: slot_end,
            available: conflict.is_none(),
            conflict,
        });
        current += workday.cadence();
    }

    Ok(slots)
}

/// Checks that an appointment starting at `start` can be booked on `date`.
///
/// Returns the matching candidate slot when it is available.
///
/// # Errors
///
/// * `ClinicError::Validation` - `start` is not on the cadence grid, or the
///   inputs are rejected by [`compute_slots`]
/// * `ClinicError::Conflict` - the slot exists but is unavailable
pub fn ensure_bookable(
    workday: &WorkdayConfig,
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: i64,
    bookings: &[BookedInterval],
) -> ClinicResult<CandidateSlot> {
    let slot = compute_slots(workday, date, duration_minutes, bookings)?
        .into_iter()
        .find(|slot| slot.start_time() == start)
        .ok_or_else(|| {
            ClinicError::Validation(format!(
                "Start time {} is not one of the {}-minute slots between {} and {}",
                start.format("%H:%M"),
                workday.cadence_minutes,
                workday.start.format("%H:%M"),
                workday.end.format("%H:%M")
            ))
        })?;

    match slot.conflict {
        Some(conflict) => Err(ClinicError::Conflict(format!(
            "Slot at {} {}",
            slot.label(),
            conflict
        ))),
        None => Ok(slot),
    }
}
