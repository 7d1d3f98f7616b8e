use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use clinicdesk_core::{
    errors::ClinicError,
    models::medical_log::{CreateMedicalLogRequest, LogType, LogVitals, MedicalLog},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{sample_patient, TestContext};
use clinicdesk_api::{
    handlers::medical_logs::{create_medical_log, list_medical_logs, MedicalLogQuery},
    middleware::error_handling::AppError,
};

fn visit_note(patient_id: Uuid, title: &str) -> CreateMedicalLogRequest {
    CreateMedicalLogRequest {
        patient_id,
        provider_id: Uuid::new_v4(),
        provider_name: "Dr. Emily Carter".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        log_type: LogType::Visit,
        title: title.to_string(),
        description: "Routine follow-up".to_string(),
        attachments: vec![],
        vitals: Some(LogVitals {
            blood_pressure: Some("120/80".to_string()),
            heart_rate: Some(70),
            ..LogVitals::default()
        }),
    }
}

#[tokio::test]
async fn test_list_medical_logs_for_patient() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    ctx.medical_logs
        .expect_list_medical_logs()
        .with(predicate::eq(Some(patient_id)))
        .times(1)
        .returning(|_| Ok(vec![]));

    let Json(logs) = list_medical_logs(
        State(ctx.into_state()),
        Query(MedicalLogQuery {
            patient_id: Some(patient_id),
        }),
    )
    .await
    .unwrap();

    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_create_medical_log() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    ctx.patients
        .expect_get_patient()
        .returning(|id| Ok(Some(sample_patient(id))));
    ctx.medical_logs
        .expect_create_medical_log()
        .times(1)
        .returning(|request| {
            Ok(MedicalLog {
                id: Uuid::new_v4(),
                patient_id: request.patient_id,
                provider_id: request.provider_id,
                provider_name: request.provider_name,
                date: request.date,
                log_type: request.log_type,
                title: request.title,
                description: request.description,
                attachments: request.attachments,
                vitals: request.vitals,
                created_at: Utc::now(),
            })
        });

    let (status, Json(log)) = create_medical_log(
        State(ctx.into_state()),
        Json(visit_note(patient_id, "Annual physical")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log.log_type, LogType::Visit);
    assert_eq!(log.vitals.and_then(|v| v.heart_rate), Some(70));
}

#[tokio::test]
async fn test_create_medical_log_requires_title() {
    let mut ctx = TestContext::new();
    ctx.medical_logs.expect_create_medical_log().never();

    let result = create_medical_log(
        State(ctx.into_state()),
        Json(visit_note(Uuid::new_v4(), "  ")),
    )
    .await;

    assert!(matches!(result, Err(AppError(ClinicError::Validation(_)))));
}
