//! Workday window and slot cadence.
//!
//! The calculator in [`crate::availability`] generates one candidate slot per
//! cadence step between `start` (inclusive) and `end` (exclusive).

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};

pub const DEFAULT_WORKDAY_START: &str = "08:00";
pub const DEFAULT_WORKDAY_END: &str = "18:00";
pub const DEFAULT_SLOT_CADENCE_MINUTES: i64 = 30;

/// Bounds of the bookable day and the spacing between candidate start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayConfig {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub cadence_minutes: i64,
}

impl WorkdayConfig {
    /// Builds a validated workday window.
    ///
    /// # Errors
    ///
    /// * `ClinicError::Validation` - `end` is not after `start`, or the cadence
    ///   is not a positive number of minutes no longer than the workday
    pub fn new(start: NaiveTime, end: NaiveTime, cadence_minutes: i64) -> ClinicResult<Self> {
        let config = Self {
            start,
            end,
            cadence_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClinicResult<()> {
        if self.end <= self.start {
            return Err(ClinicError::Validation(format!(
                "Workday end {} must be after workday start {}",
                self.end.format("%H:%M"),
                self.start.format("%H:%M")
            )));
        }
        if self.cadence_minutes <= 0 {
            return Err(ClinicError::Validation(format!(
                "Slot cadence must be a positive number of minutes, got {}",
                self.cadence_minutes
            )));
        }
        if self.cadence_minutes > self.length_minutes() {
            return Err(ClinicError::Validation(format!(
                "Slot cadence of {} minutes does not fit in a {}-minute workday",
                self.cadence_minutes,
                self.length_minutes()
            )));
        }
        Ok(())
    }

    pub fn cadence(&self) -> Duration {
        Duration::minutes(self.cadence_minutes)
    }

    /// Length of the workday in minutes.
    pub fn length_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Number of candidate slots the window produces: every cadence step that
    /// starts strictly before `end`.
    pub fn slot_count(&self) -> usize {
        if self.cadence_minutes <= 0 {
            return 0;
        }
        let length = self.length_minutes().max(0);
        let steps = length / self.cadence_minutes + i64::from(length % self.cadence_minutes != 0);
        usize::try_from(steps).unwrap_or(0)
    }
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            cadence_minutes: DEFAULT_SLOT_CADENCE_MINUTES,
        }
    }
}

/// Parses a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> ClinicResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            ClinicError::Validation(format!(
                "Invalid time of day '{}'. Expected HH:MM or HH:MM:SS",
                value
            ))
        })
}
