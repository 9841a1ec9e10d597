//! Always-present result records produced by the facade.
//!
//! Each record is fully populated for success and failure alike: expected
//! failure modes land in the `error` field instead of propagating, so
//! presentation layers can render every outcome without exception paths.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ForecastDay, PollutantValue, WeatherSnapshot};

/// Current AQI for a city, or a structured description of why it is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAqiReport {
    pub city: String,
    pub aqi: Option<i64>,
    pub station: String,
    pub observed_at: Option<String>,
    pub error: Option<String>,
}

impl CurrentAqiReport {
    /// Failure record with the standard absent fields.
    pub fn failure(
        city: impl Into<String>,
        station: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            aqi: None,
            station: station.into(),
            observed_at: None,
            error: Some(error.into()),
        }
    }
}

/// Pollutant panel and interpreted health advisories for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantRiskReport {
    pub city: String,
    pub observed_at: Option<String>,
    pub pollutants: HashMap<String, PollutantValue>,
    pub risks: Vec<String>,
    pub error: Option<String>,
}

impl PollutantRiskReport {
    pub fn failure(city: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            observed_at: None,
            pollutants: HashMap::new(),
            risks: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Current weather for a city.
///
/// An absent snapshot with no error means the provider did not recognize the
/// location; an absent snapshot with an error means the fetch failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub snapshot: Option<WeatherSnapshot>,
    pub error: Option<String>,
}

/// Multi-day forecast for a city. `days` is empty with no error when the
/// location was not recognized or the provider had no days to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub city: String,
    pub days: Vec<ForecastDay>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_records_have_absent_data_fields() {
        let report = CurrentAqiReport::failure("Delhi", "Error", "API Error: timeout");
        assert!(report.aqi.is_none());
        assert!(report.observed_at.is_none());
        assert_eq!(report.error.as_deref(), Some("API Error: timeout"));

        let report = PollutantRiskReport::failure("Delhi", "Station not found by AQICN.");
        assert!(report.pollutants.is_empty());
        assert!(report.risks.is_empty());
        assert!(report.error.is_some());
    }
}
