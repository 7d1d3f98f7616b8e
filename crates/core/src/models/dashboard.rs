use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{
    appointment::{Appointment, AppointmentStatus, AppointmentType},
    patient::{Patient, PatientStatus},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub active_patients: usize,
    pub critical_cases: usize,
    pub today_appointments: usize,
    pub pending_follow_ups: usize,
    pub monthly_visits: usize,
}

impl DashboardStats {
    /// Summarizes the clinic as of `today`.
    ///
    /// `appointments` should cover at least the calendar month of `today`;
    /// appointments outside it only count towards pending follow-ups.
    pub fn compute(patients: &[Patient], appointments: &[Appointment], today: NaiveDate) -> Self {
        let count_patients =
            |status: PatientStatus| patients.iter().filter(|p| p.status == status).count();

        let same_month = |date: NaiveDate| date.year() == today.year() && date.month() == today.month();

        Self {
            total_patients: patients.len(),
            active_patients: count_patients(PatientStatus::Active),
            critical_cases: count_patients(PatientStatus::Critical),
            today_appointments: appointments
                .iter()
                .filter(|a| a.date == today && a.is_active())
                .count(),
            pending_follow_ups: appointments
                .iter()
                .filter(|a| {
                    a.appointment_type == AppointmentType::FollowUp
                        && matches!(
                            a.status,
                            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
                        )
                })
                .count(),
            monthly_visits: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed && same_month(a.date))
                .count(),
        }
    }
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first);
    let last = next_month.pred_opt().unwrap_or(date);
    (first, last)
}
