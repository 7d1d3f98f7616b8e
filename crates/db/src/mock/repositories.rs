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
use mockall::mock;
use uuid::Uuid;

use crate::repositories::{
    AppointmentRepository, MedicalLogRepository, PatientRepository, VitalsRepository,
};

// Mock repositories for testing
mock! {
    pub PatientRepo {}

    #[async_trait]
    impl PatientRepository for PatientRepo {
        async fn list_patients(&self, filter: PatientFilter) -> eyre::Result<Vec<Patient>>;

        async fn get_patient(&self, id: Uuid) -> eyre::Result<Option<Patient>>;

        async fn create_patient(&self, request: CreatePatientRequest) -> eyre::Result<Patient>;

        async fn update_patient(
            &self,
            id: Uuid,
            changes: UpdatePatientRequest,
        ) -> eyre::Result<Option<Patient>>;
    }
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentRepository for AppointmentRepo {
        async fn list_appointments(
            &self,
            filter: AppointmentFilter,
        ) -> eyre::Result<Vec<Appointment>>;

        async fn list_appointment_listings(
            &self,
            filter: AppointmentFilter,
        ) -> eyre::Result<Vec<AppointmentListing>>;

        async fn get_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;

        async fn create_appointment(
            &self,
            appointment: NewAppointment,
        ) -> eyre::Result<Appointment>;

        async fn update_appointment_status(
            &self,
            id: Uuid,
            status: AppointmentStatus,
        ) -> eyre::Result<Option<Appointment>>;
    }
}

mock! {
    pub VitalsRepo {}

    #[async_trait]
    impl VitalsRepository for VitalsRepo {
        async fn list_vitals(
            &self,
            patient_id: Uuid,
            since: DateTime<Utc>,
        ) -> eyre::Result<Vec<VitalsRecord>>;

        async fn create_vitals(&self, vitals: NewVitals) -> eyre::Result<VitalsRecord>;
    }
}

mock! {
    pub MedicalLogRepo {}

    #[async_trait]
    impl MedicalLogRepository for MedicalLogRepo {
        async fn list_medical_logs(
            &self,
            patient_id: Option<Uuid>,
        ) -> eyre::Result<Vec<MedicalLog>>;

        async fn create_medical_log(
            &self,
            request: CreateMedicalLogRequest,
        ) -> eyre::Result<MedicalLog>;
    }
}
