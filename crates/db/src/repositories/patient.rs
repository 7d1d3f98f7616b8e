use crate::models::DbPatient;
use chrono::Utc;
use clinicdesk_core::models::patient::{
    CreatePatientRequest, Patient, PatientFilter, PatientStatus, UpdatePatientRequest,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const PATIENT_COLUMNS: &str = r#"
    id, first_name, last_name, date_of_birth, gender, email, phone, address,
    insurance_provider, insurance_id, blood_type, allergies, conditions,
    status, created_at, updated_at
"#;

pub async fn list_patients(pool: &Pool<Postgres>, filter: &PatientFilter) -> Result<Vec<Patient>> {
    let rows = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        SELECT {} FROM patients
        WHERE ($1::TEXT IS NULL OR status = $1)
        ORDER BY last_name ASC, first_name ASC
        "#,
        PATIENT_COLUMNS
    ))
    .bind(filter.status.map(|status| status.as_str()))
    .fetch_all(pool)
    .await?;

    let patients = rows
        .into_iter()
        .map(DbPatient::into_patient)
        .collect::<Result<Vec<_>>>()?;

    // Search text is matched in memory so phone matching stays verbatim.
    let matched: Vec<Patient> = patients
        .into_iter()
        .filter(|patient| filter.matches(patient))
        .collect();

    tracing::debug!("Listed {} patients (status={:?})", matched.len(), filter.status);
    Ok(matched)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Patient>> {
    tracing::debug!("Getting patient by id: {}", id);

    let row = sqlx::query_as::<_, DbPatient>(&format!(
        "SELECT {} FROM patients WHERE id = $1",
        PATIENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(DbPatient::into_patient).transpose()
}

pub async fn create_patient(pool: &Pool<Postgres>, request: &CreatePatientRequest) -> Result<Patient> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let status = request.status.unwrap_or(PatientStatus::Active);

    tracing::debug!("Creating patient: id={}, status={}", id, status);

    let row = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        INSERT INTO patients (
            id, first_name, last_name, date_of_birth, gender, email, phone, address,
            insurance_provider, insurance_id, blood_type, allergies, conditions,
            status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        RETURNING {}
        "#,
        PATIENT_COLUMNS
    ))
    .bind(id)
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(request.date_of_birth)
    .bind(request.gender.as_str())
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.address)
    .bind(&request.insurance_provider)
    .bind(&request.insurance_id)
    .bind(&request.blood_type)
    .bind(&request.allergies)
    .bind(&request.conditions)
    .bind(status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    row.into_patient()
}

pub async fn update_patient(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: UpdatePatientRequest,
) -> Result<Option<Patient>> {
    let Some(mut patient) = get_patient_by_id(pool, id).await? else {
        tracing::debug!("Patient not found for update: id={}", id);
        return Ok(None);
    };
    changes.apply_to(&mut patient);

    let row = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        UPDATE patients
        SET first_name = $2, last_name = $3, email = $4, phone = $5, address = $6,
            insurance_provider = $7, insurance_id = $8, blood_type = $9,
            allergies = $10, conditions = $11, status = $12, updated_at = $13
        WHERE id = $1
        RETURNING {}
        "#,
        PATIENT_COLUMNS
    ))
    .bind(id)
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(&patient.email)
    .bind(&patient.phone)
    .bind(&patient.address)
    .bind(&patient.insurance_provider)
    .bind(&patient.insurance_id)
    .bind(&patient.blood_type)
    .bind(&patient.allergies)
    .bind(&patient.conditions)
    .bind(patient.status.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    // The row can disappear between the read above and this update.
    row.map(DbPatient::into_patient).transpose()
}
