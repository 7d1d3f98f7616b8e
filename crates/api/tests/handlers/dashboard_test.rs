use axum::extract::{Query, State};
use chrono::NaiveDate;
use clinicdesk_core::models::{
    appointment::{Appointment, AppointmentFilter, AppointmentStatus, AppointmentType},
    dashboard::DashboardStats,
    patient::{Patient, PatientFilter, PatientStatus},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{clinic_day, sample_appointment, sample_patient, TestContext};
use clinicdesk_api::handlers::dashboard::{get_dashboard, DashboardQuery};

#[test_log::test(tokio::test)]
async fn test_dashboard_counts_from_month_start() {
    let mut ctx = TestContext::new();
    ctx.patients
        .expect_list_patients()
        .with(predicate::eq(PatientFilter::default()))
        .returning(|_| {
            Ok(vec![
                sample_patient(Uuid::new_v4()),
                Patient {
                    status: PatientStatus::Critical,
                    ..sample_patient(Uuid::new_v4())
                },
                Patient {
                    status: PatientStatus::Inactive,
                    ..sample_patient(Uuid::new_v4())
                },
            ])
        });
    ctx.appointments
        .expect_list_appointments()
        .with(predicate::eq(AppointmentFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..AppointmentFilter::default()
        }))
        .times(1)
        .returning(|_| {
            Ok(vec![
                sample_appointment("09:00", 30, AppointmentStatus::Scheduled),
                sample_appointment("10:00", 30, AppointmentStatus::Cancelled),
                Appointment {
                    date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                    ..sample_appointment("11:00", 30, AppointmentStatus::Completed)
                },
                Appointment {
                    date: NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
                    appointment_type: AppointmentType::FollowUp,
                    ..sample_appointment("09:00", 30, AppointmentStatus::Confirmed)
                },
            ])
        });

    let stats = get_dashboard(
        State(ctx.into_state()),
        Query(DashboardQuery {
            date: Some(clinic_day()),
        }),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(
        stats,
        DashboardStats {
            total_patients: 3,
            active_patients: 1,
            critical_cases: 1,
            today_appointments: 1,
            pending_follow_ups: 1,
            monthly_visits: 1,
        }
    );
}
