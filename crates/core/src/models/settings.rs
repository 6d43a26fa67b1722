use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::date::DATE_FORMAT;

/// Default length of a year, in days, used to annualize returns.
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.0;

/// User-configurable valuation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Day count that makes up one year when converting elapsed days to years.
    pub days_per_year: f64,

    /// chrono format string for every string-dated query (e.g., "%Y-%m-%d").
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days_per_year: DEFAULT_DAYS_PER_YEAR,
            date_format: DATE_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the year length is usable as a divisor.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "days_per_year must be a positive finite number, got {}",
                self.days_per_year
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "date_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
