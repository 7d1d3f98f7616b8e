use crate::models::DbVitals;
use chrono::{DateTime, Utc};
use clinicdesk_core::models::vitals::{NewVitals, VitalsRecord};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_vitals_for_patient(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
    since: DateTime<Utc>,
) -> Result<Vec<VitalsRecord>> {
    let rows = sqlx::query_as::<_, DbVitals>(
        r#"
        SELECT id, patient_id, provider_id, recorded_at,
               blood_pressure_systolic, blood_pressure_diastolic, heart_rate,
               temperature, weight, oxygen_saturation, notes
        FROM vitals
        WHERE patient_id = $1 AND recorded_at >= $2
        ORDER BY recorded_at ASC
        "#,
    )
    .bind(patient_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} vitals for patient {} since {}", rows.len(), patient_id, since);
    Ok(rows.into_iter().map(VitalsRecord::from).collect())
}

pub async fn create_vitals(pool: &Pool<Postgres>, vitals: &NewVitals) -> Result<VitalsRecord> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbVitals>(
        r#"
        INSERT INTO vitals (
            id, patient_id, provider_id, recorded_at,
            blood_pressure_systolic, blood_pressure_diastolic, heart_rate,
            temperature, weight, oxygen_saturation, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, patient_id, provider_id, recorded_at,
                  blood_pressure_systolic, blood_pressure_diastolic, heart_rate,
                  temperature, weight, oxygen_saturation, notes
        "#,
    )
    .bind(id)
    .bind(vitals.patient_id)
    .bind(vitals.provider_id)
    .bind(now)
    .bind(vitals.blood_pressure_systolic)
    .bind(vitals.blood_pressure_diastolic)
    .bind(vitals.heart_rate)
    .bind(vitals.temperature)
    .bind(vitals.weight)
    .bind(vitals.oxygen_saturation)
    .bind(&vitals.notes)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Recorded vitals: id={}, patient={}", id, vitals.patient_id);
    Ok(row.into())
}
