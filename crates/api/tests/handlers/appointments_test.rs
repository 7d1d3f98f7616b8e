use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use clinicdesk_core::{
    errors::ClinicError,
    models::appointment::{
        Appointment, AppointmentFilter, AppointmentListing, AppointmentStatus, AppointmentType,
        CreateAppointmentRequest, NewAppointment, UpdateAppointmentStatusRequest,
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use crate::test_utils::{clinic_day, sample_appointment, sample_patient, time, TestContext};
use clinicdesk_api::{
    handlers::appointments::{
        create_appointment, get_appointment, list_appointments, update_appointment_status,
        AppointmentQuery,
    },
    middleware::error_handling::AppError,
};

fn booking_request(patient_id: Uuid, start: &str, duration: Option<i32>) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id,
        provider_id: Uuid::new_v4(),
        date: clinic_day(),
        start_time: time(start),
        duration,
        appointment_type: None,
        notes: Some("   ".to_string()),
    }
}

fn stored(new_appointment: NewAppointment) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id: new_appointment.patient_id,
        provider_id: new_appointment.provider_id,
        date: new_appointment.date,
        start_time: new_appointment.start_time,
        end_time: new_appointment.end_time,
        duration: new_appointment.duration,
        appointment_type: new_appointment.appointment_type,
        status: new_appointment.status,
        notes: new_appointment.notes,
        created_at: Utc::now(),
    }
}

fn context_with_day(bookings: Vec<Appointment>) -> TestContext {
    let mut ctx = TestContext::new();
    ctx.patients
        .expect_get_patient()
        .returning(|id| Ok(Some(sample_patient(id))));
    ctx.appointments
        .expect_list_appointments()
        .returning(move |_| Ok(bookings.clone()));
    ctx
}

#[tokio::test]
async fn test_create_appointment_back_to_back() {
    let patient_id = Uuid::new_v4();
    let mut ctx = context_with_day(vec![sample_appointment(
        "09:00",
        30,
        AppointmentStatus::Scheduled,
    )]);
    ctx.appointments
        .expect_create_appointment()
        .withf(|new_appointment| {
            new_appointment.start_time == time("09:30")
                && new_appointment.end_time == time("10:00")
                && new_appointment.duration == 30
                && new_appointment.status == AppointmentStatus::Scheduled
                && new_appointment.appointment_type == AppointmentType::Checkup
                && new_appointment.notes.is_none()
        })
        .times(1)
        .returning(|new_appointment| Ok(stored(new_appointment)));

    let (status, Json(appointment)) = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(patient_id, "09:30", None)),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appointment.patient_id, patient_id);
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn test_create_appointment_rejects_taken_slot() {
    let mut ctx = context_with_day(vec![sample_appointment(
        "09:00",
        60,
        AppointmentStatus::Confirmed,
    )]);
    ctx.appointments.expect_create_appointment().never();

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), "09:30", Some(30))),
    )
    .await;

    match result {
        Err(AppError(ClinicError::Conflict(message))) => {
            assert_eq!(message, "Slot at 09:30 conflicts with appointment at 09:00");
        }
        other => panic!("expected a conflict, got {:?}", other.map(|(s, _)| s)),
    }
}

#[tokio::test]
async fn test_create_appointment_rejects_overrun_past_closing() {
    let mut ctx = context_with_day(vec![]);
    ctx.appointments.expect_create_appointment().never();

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), "17:30", Some(60))),
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError(ClinicError::Conflict(message))) if message.ends_with("exceeds work hours")
    ));
}

#[rstest]
#[case("07:30")]
#[case("09:15")]
#[case("18:00")]
#[tokio::test]
async fn test_create_appointment_rejects_start_off_grid(#[case] start: &str) {
    let mut ctx = context_with_day(vec![]);
    ctx.appointments.expect_create_appointment().never();

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), start, Some(30))),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}

#[tokio::test]
async fn test_create_appointment_unknown_patient() {
    let mut ctx = TestContext::new();
    ctx.patients.expect_get_patient().returning(|_| Ok(None));
    ctx.appointments.expect_list_appointments().never();
    ctx.appointments.expect_create_appointment().never();

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), "10:00", Some(30))),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::NotFound(_)))));
}

#[tokio::test]
async fn test_create_appointment_rejects_negative_duration() {
    let ctx = TestContext::new();

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), "10:00", Some(-15))),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}

#[tokio::test]
async fn test_cancelled_appointment_frees_its_slot() {
    let mut ctx = context_with_day(vec![sample_appointment(
        "11:00",
        30,
        AppointmentStatus::Cancelled,
    )]);
    ctx.appointments
        .expect_create_appointment()
        .times(1)
        .returning(|new_appointment| Ok(stored(new_appointment)));

    let result = create_appointment(
        State(ctx.into_state()),
        Json(booking_request(Uuid::new_v4(), "11:00", Some(30))),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_list_appointments_shows_patient_names() {
    let mut ctx = TestContext::new();
    let day = clinic_day();
    ctx.appointments
        .expect_list_appointment_listings()
        .with(predicate::eq(AppointmentFilter {
            date: Some(day),
            ..AppointmentFilter::default()
        }))
        .times(1)
        .returning(|_| {
            Ok(vec![
                AppointmentListing {
                    appointment: sample_appointment("09:00", 30, AppointmentStatus::Scheduled),
                    patient_name: Some("Sarah Johnson".to_string()),
                },
                AppointmentListing {
                    appointment: sample_appointment("10:00", 45, AppointmentStatus::Confirmed),
                    patient_name: None,
                },
            ])
        });
    ctx.appointments.expect_list_appointments().never();

    let Json(listings) = list_appointments(
        State(ctx.into_state()),
        Query(AppointmentQuery {
            date: Some(day),
            ..AppointmentQuery::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].patient_name.as_deref(), Some("Sarah Johnson"));
    assert_eq!(listings[0].appointment.start_time, time("09:00"));
    assert_eq!(listings[1].patient_name, None);

    let json = serde_json::to_value(&listings[0]).unwrap();
    assert_eq!(json["patient_name"], "Sarah Johnson");
    assert_eq!(json["type"], "checkup");
}

#[tokio::test]
async fn test_list_appointments_rejects_inverted_range() {
    let ctx = TestContext::new();

    let result = list_appointments(
        State(ctx.into_state()),
        Query(AppointmentQuery {
            from: NaiveDate::from_ymd_opt(2024, 2, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..AppointmentQuery::default()
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}

#[tokio::test]
async fn test_get_appointment_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    ctx.appointments
        .expect_get_appointment()
        .with(predicate::eq(id))
        .returning(|_| Ok(None));

    let result = get_appointment(State(ctx.into_state()), Path(id)).await;

    assert!(matches!(result, Err(AppError(ClinicError::NotFound(_)))));
}

#[tokio::test]
async fn test_update_status_follows_transition_table() {
    let mut ctx = TestContext::new();
    let current = sample_appointment("10:00", 30, AppointmentStatus::Scheduled);
    let id = current.id;
    let fetched = current.clone();
    ctx.appointments
        .expect_get_appointment()
        .returning(move |_| Ok(Some(fetched.clone())));
    ctx.appointments
        .expect_update_appointment_status()
        .with(predicate::eq(id), predicate::eq(AppointmentStatus::Confirmed))
        .times(1)
        .returning(move |_, status| {
            Ok(Some(Appointment {
                status,
                ..current.clone()
            }))
        });

    let Json(updated) = update_appointment_status(
        State(ctx.into_state()),
        Path(id),
        Json(UpdateAppointmentStatusRequest {
            status: AppointmentStatus::Confirmed,
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn test_update_status_rejects_reopening_completed() {
    let mut ctx = TestContext::new();
    let current = sample_appointment("10:00", 30, AppointmentStatus::Completed);
    let id = current.id;
    ctx.appointments
        .expect_get_appointment()
        .returning(move |_| Ok(Some(current.clone())));
    ctx.appointments.expect_update_appointment_status().never();

    let result = update_appointment_status(
        State(ctx.into_state()),
        Path(id),
        Json(UpdateAppointmentStatusRequest {
            status: AppointmentStatus::Scheduled,
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Conflict(_)))));
}
