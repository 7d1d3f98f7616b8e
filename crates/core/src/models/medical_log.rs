use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogType {
    Visit,
    Lab,
    Prescription,
    Procedure,
    Note,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Visit => "visit",
            LogType::Lab => "lab",
            LogType::Prescription => "prescription",
            LogType::Procedure => "procedure",
            LogType::Note => "note",
        }
    }
}

impl FromStr for LogType {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "visit" => Ok(LogType::Visit),
            "lab" => Ok(LogType::Lab),
            "prescription" => Ok(LogType::Prescription),
            "procedure" => Ok(LogType::Procedure),
            "note" => Ok(LogType::Note),
            _ => Err(ClinicError::Validation(format!(
                "Invalid medical log type: '{}'. Must be one of: visit, lab, prescription, procedure, note",
                value
            ))),
        }
    }
}

/// Vitals captured as part of a log entry, stored with the entry itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogVitals {
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub title: String,
    pub description: String,
    pub attachments: Vec<String>,
    pub vitals: Option<LogVitals>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicalLogRequest {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub vitals: Option<LogVitals>,
}

impl CreateMedicalLogRequest {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.title.trim().is_empty() {
            return Err(ClinicError::Validation(
                "Medical log title is required".to_string(),
            ));
        }
        Ok(())
    }
}
