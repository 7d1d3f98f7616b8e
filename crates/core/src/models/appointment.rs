use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{availability::BookedInterval, errors::ClinicError};

/// Durations offered by the booking form, in minutes.
pub const OFFERED_DURATIONS: [i32; 5] = [15, 30, 45, 60, 90];

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Checkup,
    FollowUp,
    Consultation,
    Procedure,
    Emergency,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Checkup => "checkup",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::Consultation => "consultation",
            AppointmentType::Procedure => "procedure",
            AppointmentType::Emergency => "emergency",
        }
    }
}

impl FromStr for AppointmentType {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "checkup" => Ok(AppointmentType::Checkup),
            "follow-up" => Ok(AppointmentType::FollowUp),
            "consultation" => Ok(AppointmentType::Consultation),
            "procedure" => Ok(AppointmentType::Procedure),
            "emergency" => Ok(AppointmentType::Emergency),
            _ => Err(ClinicError::Validation(format!(
                "Invalid appointment type: '{}'. Must be one of: checkup, follow-up, consultation, procedure, emergency",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
        )
    }

    /// # Errors
    ///
    /// * `ClinicError::Conflict` - the move is not in the transition table
    pub fn transition_to(&self, next: AppointmentStatus) -> Result<AppointmentStatus, ClinicError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ClinicError::Conflict(format!(
                "Cannot move appointment from {} to {}",
                self, next
            )))
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "in-progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(ClinicError::Validation(format!(
                "Invalid appointment status: '{}'. Must be one of: scheduled, confirmed, in-progress, completed, cancelled",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: i32,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    /// The interval this appointment occupies, or `None` once cancelled.
    pub fn booked_interval(&self) -> Option<BookedInterval> {
        self.is_active().then_some(BookedInterval {
            start: self.start_time,
            end: self.end_time,
        })
    }
}

/// An appointment as shown in the calendar, with who it is booked for.
///
/// `patient_name` is `None` when the patient record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentListing {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient_name: Option<String>,
}

/// Collects the booked intervals of the active appointments, keeping input
/// order.
pub fn booked_intervals(appointments: &[Appointment]) -> Vec<BookedInterval> {
    appointments
        .iter()
        .filter_map(Appointment::booked_interval)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration: Option<i32>,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn duration_minutes(&self) -> i32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// End time of the requested appointment, if it stays on the same day.
    pub fn end_time(&self) -> Option<NaiveTime> {
        let (end, wrapped) = self
            .start_time
            .overflowing_add_signed(Duration::minutes(i64::from(self.duration_minutes())));
        (wrapped == 0).then_some(end)
    }
}

/// Row-ready appointment handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: i32,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub patient_id: Option<Uuid>,
    pub exclude_status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    /// Active bookings of a single day, as the availability calculator needs.
    pub fn active_on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            exclude_status: Some(AppointmentStatus::Cancelled),
            ..Self::default()
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }
}
