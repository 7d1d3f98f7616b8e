//! Vital-sign readings, their accepted input ranges and the traffic-light
//! classification shown next to the latest reading.

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVitals {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub notes: Option<String>,
}

/// Request body for recording vitals; the patient comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVitalsRequest {
    pub provider_id: Uuid,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub weight: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub notes: Option<String>,
}

impl CreateVitalsRequest {
    pub fn into_new_vitals(self, patient_id: Uuid) -> NewVitals {
        NewVitals {
            patient_id,
            provider_id: self.provider_id,
            blood_pressure_systolic: self.blood_pressure_systolic,
            blood_pressure_diastolic: self.blood_pressure_diastolic,
            heart_rate: self.heart_rate,
            temperature: self.temperature,
            weight: self.weight,
            oxygen_saturation: self.oxygen_saturation,
            notes: self.notes,
        }
    }
}

fn check_range<T>(name: &str, value: Option<T>, min: T, max: T) -> Result<(), ClinicError>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    match value {
        Some(v) if v < min || v > max => Err(ClinicError::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, v
        ))),
        _ => Ok(()),
    }
}

impl NewVitals {
    pub fn has_measurement(&self) -> bool {
        self.blood_pressure_systolic.is_some()
            || self.blood_pressure_diastolic.is_some()
            || self.heart_rate.is_some()
            || self.temperature.is_some()
            || self.weight.is_some()
            || self.oxygen_saturation.is_some()
    }

    pub fn validate(&self) -> Result<(), ClinicError> {
        if !self.has_measurement() {
            return Err(ClinicError::Validation(
                "At least one measurement is required".to_string(),
            ));
        }
        check_range("Systolic pressure", self.blood_pressure_systolic, 60, 250)?;
        check_range("Diastolic pressure", self.blood_pressure_diastolic, 40, 150)?;
        check_range("Heart rate", self.heart_rate, 30, 200)?;
        check_range("Temperature", self.temperature, 95.0, 108.0)?;
        check_range("Weight", self.weight, 0.0, 1000.0)?;
        check_range("Oxygen saturation", self.oxygen_saturation, 70, 100)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
    Unknown,
}

pub fn classify_systolic(value: Option<i32>) -> VitalStatus {
    match value {
        None => VitalStatus::Unknown,
        Some(v) if v < 90 => VitalStatus::Warning,
        Some(v) if v > 140 => VitalStatus::Critical,
        Some(_) => VitalStatus::Normal,
    }
}

pub fn classify_diastolic(value: Option<i32>) -> VitalStatus {
    match value {
        None => VitalStatus::Unknown,
        Some(v) if v < 60 => VitalStatus::Warning,
        Some(v) if v > 90 => VitalStatus::Critical,
        Some(_) => VitalStatus::Normal,
    }
}

pub fn classify_heart_rate(value: Option<i32>) -> VitalStatus {
    match value {
        None => VitalStatus::Unknown,
        Some(v) if !(60..=100).contains(&v) => VitalStatus::Warning,
        Some(_) => VitalStatus::Normal,
    }
}

// Fever is checked before the wider warning band.
pub fn classify_temperature(value: Option<f64>) -> VitalStatus {
    match value {
        None => VitalStatus::Unknown,
        Some(v) if v > 100.4 => VitalStatus::Critical,
        Some(v) if !(97.0..=99.5).contains(&v) => VitalStatus::Warning,
        Some(_) => VitalStatus::Normal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsAssessment {
    pub systolic: VitalStatus,
    pub diastolic: VitalStatus,
    pub heart_rate: VitalStatus,
    pub temperature: VitalStatus,
}

impl VitalsRecord {
    pub fn assess(&self) -> VitalsAssessment {
        VitalsAssessment {
            systolic: classify_systolic(self.blood_pressure_systolic),
            diastolic: classify_diastolic(self.blood_pressure_diastolic),
            heart_rate: classify_heart_rate(self.heart_rate),
            temperature: classify_temperature(self.temperature),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestVitalsResponse {
    pub record: VitalsRecord,
    pub assessment: VitalsAssessment,
}

/// History window of the vitals chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalsRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl VitalsRange {
    /// Earliest `recorded_at` included in the window ending at `now`.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let months_back = |months: u32| {
            now.checked_sub_months(Months::new(months))
                .unwrap_or(now - Duration::days(30 * i64::from(months)))
        };
        match self {
            VitalsRange::Week => now - Duration::days(7),
            VitalsRange::Month => now - Duration::days(30),
            VitalsRange::Quarter => months_back(3),
            VitalsRange::Year => months_back(12),
        }
    }
}

impl FromStr for VitalsRange {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "7d" => Ok(VitalsRange::Week),
            "30d" => Ok(VitalsRange::Month),
            "90d" => Ok(VitalsRange::Quarter),
            "1y" => Ok(VitalsRange::Year),
            _ => Err(ClinicError::Validation(format!(
                "Invalid vitals range: '{}'. Must be one of: 7d, 30d, 90d, 1y",
                value
            ))),
        }
    }
}

impl VitalsRange {
    /// Parses a query value, falling back to the 30-day window.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}
