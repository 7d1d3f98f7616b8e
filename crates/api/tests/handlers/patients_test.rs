use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use clinicdesk_core::{
    errors::ClinicError,
    models::patient::{
        CreatePatientRequest, Gender, Patient, PatientFilter, PatientStatus, UpdatePatientRequest,
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{sample_patient, TestContext};
use clinicdesk_api::{
    handlers::patients::{
        create_patient, get_patient, list_patients, update_patient, PatientQuery,
    },
    middleware::error_handling::AppError,
};

fn registration(email: &str) -> CreatePatientRequest {
    CreatePatientRequest {
        first_name: "Michael".to_string(),
        last_name: "Chen".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1978, 11, 2).unwrap(),
        gender: Gender::Male,
        email: email.to_string(),
        phone: "(555) 987-6543".to_string(),
        address: String::new(),
        insurance_provider: None,
        insurance_id: None,
        blood_type: None,
        allergies: vec![],
        conditions: vec!["Hypertension".to_string()],
        status: None,
    }
}

#[tokio::test]
async fn test_list_patients_passes_filter_through() {
    let mut ctx = TestContext::new();
    let expected_filter = PatientFilter {
        search: Some("john".to_string()),
        status: Some(PatientStatus::Critical),
    };
    ctx.patients
        .expect_list_patients()
        .with(predicate::eq(expected_filter))
        .times(1)
        .returning(|_| Ok(vec![sample_patient(Uuid::new_v4())]));

    let Json(response) = list_patients(
        State(ctx.into_state()),
        Query(PatientQuery {
            search: Some("john".to_string()),
            status: Some("critical".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.count, 1);
    assert_eq!(response.patients.len(), 1);
}

#[tokio::test]
async fn test_list_patients_rejects_unknown_status() {
    let mut ctx = TestContext::new();
    ctx.patients.expect_list_patients().never();

    let result = list_patients(
        State(ctx.into_state()),
        Query(PatientQuery {
            search: None,
            status: Some("discharged".to_string()),
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}

#[tokio::test]
async fn test_get_patient_not_found() {
    let mut ctx = TestContext::new();
    ctx.patients.expect_get_patient().returning(|_| Ok(None));

    let result = get_patient(State(ctx.into_state()), Path(Uuid::new_v4())).await;

    assert!(matches!(result, Err(AppError(ClinicError::NotFound(_)))));
}

#[tokio::test]
async fn test_create_patient() {
    let mut ctx = TestContext::new();
    ctx.patients
        .expect_create_patient()
        .times(1)
        .returning(|request| {
            let now = Utc::now();
            Ok(Patient {
                id: Uuid::new_v4(),
                first_name: request.first_name,
                last_name: request.last_name,
                date_of_birth: request.date_of_birth,
                gender: request.gender,
                email: request.email,
                phone: request.phone,
                address: request.address,
                insurance_provider: request.insurance_provider,
                insurance_id: request.insurance_id,
                blood_type: request.blood_type,
                allergies: request.allergies,
                conditions: request.conditions,
                status: request.status.unwrap_or(PatientStatus::Active),
                created_at: now,
                updated_at: now,
            })
        });

    let (status, Json(patient)) = create_patient(
        State(ctx.into_state()),
        Json(registration("michael.chen@example.com")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(patient.full_name(), "Michael Chen");
    assert_eq!(patient.status, PatientStatus::Active);
}

#[tokio::test]
async fn test_create_patient_rejects_bad_email() {
    let mut ctx = TestContext::new();
    ctx.patients.expect_create_patient().never();

    let result = create_patient(State(ctx.into_state()), Json(registration("not-an-email"))).await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}

#[tokio::test]
async fn test_update_patient_missing_returns_not_found() {
    let mut ctx = TestContext::new();
    ctx.patients
        .expect_update_patient()
        .returning(|_, _| Ok(None));

    let result = update_patient(
        State(ctx.into_state()),
        Path(Uuid::new_v4()),
        Json(UpdatePatientRequest {
            status: Some(PatientStatus::Inactive),
            ..UpdatePatientRequest::default()
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::NotFound(_)))));
}
