pub mod appointments;
pub mod availability;
pub mod dashboard;
pub mod medical_logs;
pub mod patients;
pub mod vitals;
