//! Row types as read from PostgreSQL, and their conversion into domain
//! models. Enum columns are stored as their kebab-case text.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinicdesk_core::models::{
    appointment::{Appointment, AppointmentListing},
    medical_log::{LogVitals, MedicalLog},
    patient::Patient,
    vitals::VitalsRecord,
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbPatient {
    pub fn into_patient(self) -> Result<Patient> {
        Ok(Patient {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.parse()?,
            email: self.email,
            phone: self.phone,
            address: self.address,
            insurance_provider: self.insurance_provider,
            insurance_id: self.insurance_id,
            blood_type: self.blood_type,
            allergies: self.allergies,
            conditions: self.conditions,
            status: self.status.parse()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: i32,
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbAppointment {
    pub fn into_appointment(self) -> Result<Appointment> {
        Ok(Appointment {
            id: self.id,
            patient_id: self.patient_id,
            provider_id: self.provider_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration: self.duration,
            appointment_type: self.appointment_type.parse()?,
            status: self.status.parse()?,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Appointment row joined with the name columns of its patient.
#[derive(Debug, Clone, FromRow)]
pub struct DbAppointmentListing {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
}

impl DbAppointmentListing {
    pub fn into_listing(self) -> Result<AppointmentListing> {
        let patient_name = match (self.patient_first_name, self.patient_last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        };

        Ok(AppointmentListing {
            appointment: self.appointment.into_appointment()?,
            patient_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVitals {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub notes: Option<String>,
}

impl From<DbVitals> for VitalsRecord {
    fn from(row: DbVitals) -> Self {
        VitalsRecord {
            id: row.id,
            patient_id: row.patient_id,
            provider_id: row.provider_id,
            recorded_at: row.recorded_at,
            blood_pressure_systolic: row.blood_pressure_systolic,
            blood_pressure_diastolic: row.blood_pressure_diastolic,
            heart_rate: row.heart_rate,
            temperature: row.temperature,
            weight: row.weight,
            oxygen_saturation: row.oxygen_saturation,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMedicalLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub date: NaiveDate,
    pub log_type: String,
    pub title: String,
    pub description: String,
    pub attachments: Vec<String>,
    pub vitals: Option<Json<LogVitals>>,
    pub created_at: DateTime<Utc>,
}

impl DbMedicalLog {
    pub fn into_medical_log(self) -> Result<MedicalLog> {
        Ok(MedicalLog {
            id: self.id,
            patient_id: self.patient_id,
            provider_id: self.provider_id,
            provider_name: self.provider_name,
            date: self.date,
            log_type: self.log_type.parse()?,
            title: self.title,
            description: self.description,
            attachments: self.attachments,
            vitals: self.vitals.map(|Json(vitals)| vitals),
            created_at: self.created_at,
        })
    }
}
