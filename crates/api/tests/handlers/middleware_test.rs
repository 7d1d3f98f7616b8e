use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use clinicdesk_core::errors::ClinicError;
use pretty_assertions::assert_eq;
use rstest::rstest;

use clinicdesk_api::middleware::error_handling::AppError;

#[rstest]
#[case(ClinicError::NotFound("Patient".to_string()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Conflict("Slot taken".to_string()), StatusCode::CONFLICT)]
#[case(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    ClinicError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_repository_report_maps_to_server_error() {
    let error = AppError::from(eyre::eyre!("connection reset"));

    assert!(matches!(error.0, ClinicError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = AppError(ClinicError::Conflict(
        "Slot at 09:30 conflicts with appointment at 09:00".to_string(),
    ))
    .into_response();

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        json["error"],
        "Scheduling conflict: Slot at 09:30 conflicts with appointment at 09:00"
    );
}
