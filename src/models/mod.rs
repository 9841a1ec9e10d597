//! Data models for the BreatheEasy acquisition core
//!
//! Domain records organized by concern:
//! - Station: air-quality station readings and pollutant panels
//! - Weather: current conditions and forecast days
//! - Report: the facade's always-present result records

pub mod report;
pub mod station;
pub mod weather;

// Re-export all public types for convenient access
pub use report::{CurrentAqiReport, ForecastReport, PollutantRiskReport, WeatherReport};
pub use station::{PollutantValue, StationReading};
pub use weather::{ForecastDay, WeatherSnapshot};
