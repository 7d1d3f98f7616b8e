//! # ClinicDesk Core
//!
//! Domain types and pure business rules for the ClinicDesk service. Nothing in
//! this crate performs I/O; the data-access layer lives in `clinicdesk-db` and
//! the HTTP surface in `clinicdesk-api`.
//!
//! - **availability**: the slot availability calculator
//! - **workday**: workday window and slot cadence configuration
//! - **models**: patients, appointments, vitals, medical logs, dashboard stats
//! - **errors**: the shared error taxonomy

pub mod availability;
pub mod errors;
pub mod models;
pub mod workday;
