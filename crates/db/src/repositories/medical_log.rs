use crate::models::DbMedicalLog;
use chrono::Utc;
use clinicdesk_core::models::medical_log::{CreateMedicalLogRequest, MedicalLog};
use eyre::Result;
use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

const MEDICAL_LOG_COLUMNS: &str = r#"
    id, patient_id, provider_id, provider_name, date, type AS log_type,
    title, description, attachments, vitals, created_at
"#;

pub async fn list_medical_logs(
    pool: &Pool<Postgres>,
    patient_id: Option<Uuid>,
) -> Result<Vec<MedicalLog>> {
    let rows = sqlx::query_as::<_, DbMedicalLog>(&format!(
        r#"
        SELECT {} FROM medical_logs
        WHERE ($1::UUID IS NULL OR patient_id = $1)
        ORDER BY date DESC, created_at DESC
        "#,
        MEDICAL_LOG_COLUMNS
    ))
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(DbMedicalLog::into_medical_log).collect()
}

pub async fn create_medical_log(
    pool: &Pool<Postgres>,
    request: &CreateMedicalLogRequest,
) -> Result<MedicalLog> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating medical log: id={}, patient={}", id, request.patient_id);

    let row = sqlx::query_as::<_, DbMedicalLog>(&format!(
        r#"
        INSERT INTO medical_logs (
            id, patient_id, provider_id, provider_name, date, type,
            title, description, attachments, vitals, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {}
        "#,
        MEDICAL_LOG_COLUMNS
    ))
    .bind(id)
    .bind(request.patient_id)
    .bind(request.provider_id)
    .bind(&request.provider_name)
    .bind(request.date)
    .bind(request.log_type.as_str())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.attachments)
    .bind(request.vitals.clone().map(Json))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    row.into_medical_log()
}
