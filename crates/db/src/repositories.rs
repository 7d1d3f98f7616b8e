//! # Repositories
//!
//! One async trait per table, each offering the same capability set:
//! fetch by filter, fetch by id, insert and update. Handlers depend on the
//! traits only; [`PgStore`] implements all of them over a PostgreSQL pool and
//! [`crate::mock::repositories`] provides mockall doubles for tests.
//!
//! Query functions are also exposed per table (`patient`, `appointment`,
//! `vitals`, `medical_log`) for callers that hold a pool directly.

pub mod appointment;
pub mod medical_log;
pub mod patient;
pub mod vitals;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clinicdesk_core::models::{
    appointment::{
        Appointment, AppointmentFilter, AppointmentListing, AppointmentStatus, NewAppointment,
    },
    medical_log::{CreateMedicalLogRequest, MedicalLog},
    patient::{CreatePatientRequest, Patient, PatientFilter, UpdatePatientRequest},
    vitals::{NewVitals, VitalsRecord},
};
use eyre::Result;
use uuid::Uuid;

use crate::DbPool;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn list_patients(&self, filter: PatientFilter) -> Result<Vec<Patient>>;

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>>;

    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient>;

    /// Returns `None` when no patient has this id.
    async fn update_patient(&self, id: Uuid, changes: UpdatePatientRequest)
        -> Result<Option<Patient>>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Appointments matching `filter`, ordered by date then start time.
    async fn list_appointments(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>>;

    /// Like `list_appointments`, with each patient's name attached.
    async fn list_appointment_listings(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentListing>>;

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;

    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>>;
}

#[async_trait]
pub trait VitalsRepository: Send + Sync {
    /// Readings recorded at or after `since`, oldest first.
    async fn list_vitals(&self, patient_id: Uuid, since: DateTime<Utc>)
        -> Result<Vec<VitalsRecord>>;

    async fn create_vitals(&self, vitals: NewVitals) -> Result<VitalsRecord>;
}

#[async_trait]
pub trait MedicalLogRepository: Send + Sync {
    /// Log entries, newest first; all patients when `patient_id` is `None`.
    async fn list_medical_logs(&self, patient_id: Option<Uuid>) -> Result<Vec<MedicalLog>>;

    async fn create_medical_log(&self, request: CreateMedicalLogRequest) -> Result<MedicalLog>;
}

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PatientRepository for PgStore {
    async fn list_patients(&self, filter: PatientFilter) -> Result<Vec<Patient>> {
        patient::list_patients(&self.pool, &filter).await
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>> {
        patient::get_patient_by_id(&self.pool, id).await
    }

    async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient> {
        patient::create_patient(&self.pool, &request).await
    }

    async fn update_patient(
        &self,
        id: Uuid,
        changes: UpdatePatientRequest,
    ) -> Result<Option<Patient>> {
        patient::update_patient(&self.pool, id, changes).await
    }
}

#[async_trait]
impl AppointmentRepository for PgStore {
    async fn list_appointments(&self, filter: AppointmentFilter) -> Result<Vec<Appointment>> {
        appointment::list_appointments(&self.pool, &filter).await
    }

    async fn list_appointment_listings(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentListing>> {
        appointment::list_appointment_listings(&self.pool, &filter).await
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id).await
    }

    async fn create_appointment(&self, new_appointment: NewAppointment) -> Result<Appointment> {
        appointment::create_appointment(&self.pool, &new_appointment).await
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>> {
        appointment::update_appointment_status(&self.pool, id, status).await
    }
}

#[async_trait]
impl VitalsRepository for PgStore {
    async fn list_vitals(
        &self,
        patient_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<VitalsRecord>> {
        vitals::list_vitals_for_patient(&self.pool, patient_id, since).await
    }

    async fn create_vitals(&self, new_vitals: NewVitals) -> Result<VitalsRecord> {
        vitals::create_vitals(&self.pool, &new_vitals).await
    }
}

#[async_trait]
impl MedicalLogRepository for PgStore {
    async fn list_medical_logs(&self, patient_id: Option<Uuid>) -> Result<Vec<MedicalLog>> {
        medical_log::list_medical_logs(&self.pool, patient_id).await
    }

    async fn create_medical_log(&self, request: CreateMedicalLogRequest) -> Result<MedicalLog> {
        medical_log::create_medical_log(&self.pool, &request).await
    }
}
