//! Air-quality station reading model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One pollutant's current level as reported by the monitoring station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantValue {
    /// Reported value; units vary by pollutant (µg/m³ for most, mg/m³ for CO)
    pub v: f64,
}

/// A station's current AQI and pollutant panel for one city query.
///
/// Owned by the fetch call that produced it; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationReading {
    /// The city string the provider was queried with
    pub city_query: String,
    /// Overall AQI as reported, when the station reported one
    pub aqi: Option<i64>,
    /// Name of the reporting station
    pub station_name: String,
    /// Station-local observation timestamp, as reported
    pub observed_at: Option<String>,
    /// Pollutant panel keyed by pollutant code (pm25, no2, co, ...)
    pub pollutants: HashMap<String, PollutantValue>,
}

impl StationReading {
    /// Raw concentration for one pollutant, if the panel carries it.
    #[must_use]
    pub fn pollutant(&self, code: &str) -> Option<f64> {
        self.pollutants.get(code).map(|p| p.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pollutant_lookup() {
        let mut pollutants = HashMap::new();
        pollutants.insert("pm25".to_string(), PollutantValue { v: 82.0 });
        let reading = StationReading {
            city_query: "Delhi".to_string(),
            aqi: Some(161),
            station_name: "Major Dhyan Chand National Stadium, Delhi".to_string(),
            observed_at: Some("2026-08-29 14:00:00".to_string()),
            pollutants,
        };
        assert_eq!(reading.pollutant("pm25"), Some(82.0));
        assert_eq!(reading.pollutant("o3"), None);
    }
}
