//! Weather observation and forecast models

use serde::{Deserialize, Serialize};

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent temperature in Celsius
    pub feels_like_c: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Atmospheric pressure in millibars
    pub pressure_mb: f64,
    /// Human-readable condition description
    pub condition_text: String,
    /// Provider icon URL for the condition
    pub condition_icon_url: String,
    /// Wind speed in km/h
    pub wind_kph: f64,
    /// Wind direction as a compass point (e.g. "NNW")
    pub wind_dir: String,
    /// UV index
    pub uv_index: f64,
    /// Resolved location name
    pub location_name: String,
    /// Administrative region of the resolved location
    pub region: String,
    /// Country of the resolved location
    pub country: String,
    /// Provider-local timestamp of the observation
    pub observed_at: Option<String>,
    /// Local time at the location when the response was produced
    pub localtime: Option<String>,
}

/// One day of a multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Average temperature in Celsius
    pub avg_temp_c: f64,
    /// Average relative humidity percentage
    pub avg_humidity: f64,
    /// Maximum wind speed in km/h
    pub max_wind_kph: f64,
    /// Total precipitation in millimeters
    pub total_precip_mm: f64,
    /// UV index
    pub uv_index: f64,
    /// Human-readable condition description
    pub condition_text: String,
}
