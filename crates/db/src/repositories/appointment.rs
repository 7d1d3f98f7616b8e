use crate::models::{DbAppointment, DbAppointmentListing};
use clinicdesk_core::models::appointment::{
    Appointment, AppointmentFilter, AppointmentListing, AppointmentStatus, NewAppointment,
};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = r#"
    id, patient_id, provider_id, date, start_time, end_time, duration,
    type AS appointment_type, status, notes, created_at
"#;

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {} FROM appointments
        WHERE ($1::DATE IS NULL OR date = $1)
          AND ($2::DATE IS NULL OR date >= $2)
          AND ($3::DATE IS NULL OR date <= $3)
          AND ($4::UUID IS NULL OR patient_id = $4)
          AND ($5::TEXT IS NULL OR status <> $5)
        ORDER BY date ASC, start_time ASC
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(filter.date)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.patient_id)
    .bind(filter.exclude_status.map(|status| status.as_str()))
    .fetch_all(pool)
    .await?;

    tracing::debug!("Listed {} appointments for {:?}", rows.len(), filter);
    rows.into_iter().map(DbAppointment::into_appointment).collect()
}

/// Same filter as [`list_appointments`], with the patient's name joined in.
pub async fn list_appointment_listings(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<AppointmentListing>> {
    let rows = sqlx::query_as::<_, DbAppointmentListing>(
        r#"
        SELECT a.id, a.patient_id, a.provider_id, a.date, a.start_time, a.end_time,
               a.duration, a.type AS appointment_type, a.status, a.notes, a.created_at,
               p.first_name AS patient_first_name, p.last_name AS patient_last_name
        FROM appointments a
        LEFT JOIN patients p ON p.id = a.patient_id
        WHERE ($1::DATE IS NULL OR a.date = $1)
          AND ($2::DATE IS NULL OR a.date >= $2)
          AND ($3::DATE IS NULL OR a.date <= $3)
          AND ($4::UUID IS NULL OR a.patient_id = $4)
          AND ($5::TEXT IS NULL OR a.status <> $5)
        ORDER BY a.date ASC, a.start_time ASC
        "#,
    )
    .bind(filter.date)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.patient_id)
    .bind(filter.exclude_status.map(|status| status.as_str()))
    .fetch_all(pool)
    .await?;

    tracing::debug!("Listed {} appointment listings for {:?}", rows.len(), filter);
    rows.into_iter().map(DbAppointmentListing::into_listing).collect()
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Appointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {} FROM appointments WHERE id = $1",
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(DbAppointment::into_appointment).transpose()
}

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<Appointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, date={}, start={}, duration={}",
        id, appointment.date, appointment.start_time, appointment.duration
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (
            id, patient_id, provider_id, date, start_time, end_time, duration,
            type, status, notes, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(appointment.patient_id)
    .bind(appointment.provider_id)
    .bind(appointment.date)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(appointment.duration)
    .bind(appointment.appointment_type.as_str())
    .bind(appointment.status.as_str())
    .bind(&appointment.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row.into_appointment()
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<Appointment>> {
    tracing::debug!("Updating appointment status: id={}, status={}", id, status);

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(DbAppointment::into_appointment).transpose()
}
