pub mod appointment;
pub mod dashboard;
pub mod medical_log;
pub mod patient;
pub mod vitals;
