use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use clinicdesk_core::{
    errors::ClinicError,
    models::vitals::{CreateVitalsRequest, VitalStatus, VitalsRecord},
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{sample_patient, sample_vitals, TestContext};
use clinicdesk_api::{
    handlers::vitals::{create_vitals, latest_vitals, list_vitals, VitalsQuery},
    middleware::error_handling::AppError,
};

fn reading(provider_id: Uuid) -> CreateVitalsRequest {
    CreateVitalsRequest {
        provider_id,
        blood_pressure_systolic: Some(122),
        blood_pressure_diastolic: Some(81),
        heart_rate: Some(68),
        temperature: None,
        weight: None,
        oxygen_saturation: Some(97),
        notes: None,
    }
}

#[tokio::test]
async fn test_list_vitals_uses_requested_window() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    ctx.vitals
        .expect_list_vitals()
        .withf(move |id, since| {
            let expected = Utc::now() - Duration::days(7);
            *id == patient_id && (*since - expected).num_seconds().abs() < 60
        })
        .times(1)
        .returning(|id, _| Ok(vec![sample_vitals(id, 3)]));

    let Json(records) = list_vitals(
        State(ctx.into_state()),
        Path(patient_id),
        Query(VitalsQuery {
            range: Some("7d".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_list_vitals_unknown_range_falls_back_to_thirty_days() {
    let mut ctx = TestContext::new();
    ctx.vitals
        .expect_list_vitals()
        .withf(|_, since| {
            let expected = Utc::now() - Duration::days(30);
            (*since - expected).num_seconds().abs() < 60
        })
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let result = list_vitals(
        State(ctx.into_state()),
        Path(Uuid::new_v4()),
        Query(VitalsQuery {
            range: Some("fortnight".to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_latest_vitals_picks_newest_and_classifies() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    ctx.vitals.expect_list_vitals().returning(|id, _| {
        Ok(vec![
            sample_vitals(id, 2),
            VitalsRecord {
                blood_pressure_systolic: Some(150),
                temperature: Some(101.2),
                ..sample_vitals(id, 9)
            },
            sample_vitals(id, 5),
        ])
    });

    let Json(latest) = latest_vitals(State(ctx.into_state()), Path(patient_id))
        .await
        .unwrap();

    assert_eq!(latest.record.blood_pressure_systolic, Some(150));
    assert_eq!(latest.assessment.systolic, VitalStatus::Critical);
    assert_eq!(latest.assessment.temperature, VitalStatus::Critical);
    assert_eq!(latest.assessment.heart_rate, VitalStatus::Normal);
}

#[tokio::test]
async fn test_latest_vitals_without_readings() {
    let mut ctx = TestContext::new();
    ctx.vitals.expect_list_vitals().returning(|_, _| Ok(vec![]));

    let result = latest_vitals(State(ctx.into_state()), Path(Uuid::new_v4())).await;

    assert!(matches!(result, Err(AppError(ClinicError::NotFound(_)))));
}

#[tokio::test]
async fn test_create_vitals() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    ctx.patients
        .expect_get_patient()
        .returning(|id| Ok(Some(sample_patient(id))));
    ctx.vitals
        .expect_create_vitals()
        .withf(move |new_vitals| new_vitals.patient_id == patient_id)
        .times(1)
        .returning(|new_vitals| {
            Ok(VitalsRecord {
                id: Uuid::new_v4(),
                patient_id: new_vitals.patient_id,
                provider_id: new_vitals.provider_id,
                recorded_at: Utc::now(),
                blood_pressure_systolic: new_vitals.blood_pressure_systolic,
                blood_pressure_diastolic: new_vitals.blood_pressure_diastolic,
                heart_rate: new_vitals.heart_rate,
                temperature: new_vitals.temperature,
                weight: new_vitals.weight,
                oxygen_saturation: new_vitals.oxygen_saturation,
                notes: new_vitals.notes,
            })
        });

    let (status, Json(record)) = create_vitals(
        State(ctx.into_state()),
        Path(patient_id),
        Json(reading(Uuid::new_v4())),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record.heart_rate, Some(68));
}

#[tokio::test]
async fn test_create_vitals_rejects_out_of_range_oxygen() {
    let mut ctx = TestContext::new();
    ctx.vitals.expect_create_vitals().never();

    let result = create_vitals(
        State(ctx.into_state()),
        Path(Uuid::new_v4()),
        Json(CreateVitalsRequest {
            oxygen_saturation: Some(65),
            ..reading(Uuid::new_v4())
        }),
    )
    .await;

    match result {
        Err(AppError(ClinicError::Validation(message))) => {
            assert!(message.starts_with("Oxygen saturation"));
        }
        _ => panic!("expected a validation error"),
    }
}
