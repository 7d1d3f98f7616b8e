use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ClinicError::Validation(format!(
                "Invalid gender: '{}'. Must be one of: male, female, other",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Active,
    Inactive,
    Critical,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
            PatientStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = ClinicError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(PatientStatus::Active),
            "inactive" => Ok(PatientStatus::Inactive),
            "critical" => Ok(PatientStatus::Critical),
            _ => Err(ClinicError::Validation(format!(
                "Invalid patient status: '{}'. Must be one of: active, inactive, critical",
                value
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub status: PatientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`; the birthday itself counts.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    pub status: Option<PatientStatus>,
}

impl CreatePatientRequest {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ClinicError::Validation(
                "Patient first and last name are required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(ClinicError::Validation(format!(
                "Invalid email address: '{}'",
                self.email
            )));
        }
        Ok(())
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_id: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub conditions: Option<Vec<String>>,
    pub status: Option<PatientStatus>,
}

impl UpdatePatientRequest {
    /// Applies the present fields onto `patient`.
    pub fn apply_to(self, patient: &mut Patient) {
        if let Some(first_name) = self.first_name {
            patient.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            patient.last_name = last_name;
        }
        if let Some(email) = self.email {
            patient.email = email;
        }
        if let Some(phone) = self.phone {
            patient.phone = phone;
        }
        if let Some(address) = self.address {
            patient.address = address;
        }
        if self.insurance_provider.is_some() {
            patient.insurance_provider = self.insurance_provider;
        }
        if self.insurance_id.is_some() {
            patient.insurance_id = self.insurance_id;
        }
        if self.blood_type.is_some() {
            patient.blood_type = self.blood_type;
        }
        if let Some(allergies) = self.allergies {
            patient.allergies = allergies;
        }
        if let Some(conditions) = self.conditions {
            patient.conditions = conditions;
        }
        if let Some(status) = self.status {
            patient.status = status;
        }
    }
}

/// Search box and status filter of the patient table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFilter {
    pub search: Option<String>,
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    /// Name and email match case-insensitively, phone matches verbatim.
    pub fn matches(&self, patient: &Patient) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(search) => {
                let needle = search.to_lowercase();
                patient.full_name().to_lowercase().contains(&needle)
                    || patient.email.to_lowercase().contains(&needle)
                    || patient.phone.contains(search)
            }
        };
        let matches_status = self.status.is_none_or(|status| patient.status == status);

        matches_search && matches_status
    }

    pub fn apply<'a>(&self, patients: &'a [Patient]) -> Vec<&'a Patient> {
        patients.iter().filter(|patient| self.matches(patient)).collect()
    }
}
