//! BreatheEasy core: air-quality and weather acquisition with health
//! interpretation.
//!
//! The crate pairs two HTTP provider clients (AQICN station feeds and
//! WeatherAPI.com conditions/forecasts) with pure CPCB-based health logic:
//! pollutant sub-index calculation, AQI category classification, and
//! per-pollutant advisories. The [`BreatheEasy`] facade ties it together
//! and always yields renderable report records, never errors.

pub mod aqicn;
pub mod config;
pub mod error;
pub mod executor;
pub mod facade;
pub mod forecast;
pub mod health;
pub mod history;
pub mod models;
pub mod weatherapi;

pub use aqicn::AqicnClient;
pub use config::{BreatheEasyConfig, Secrets};
pub use error::{ApiError, ErrorKind};
pub use executor::{Outcome, RequestExecutor, RetryPolicy, Screening};
pub use facade::BreatheEasy;
pub use forecast::{DailySummary, DailySummaryForecaster};
pub use health::{classify_aqi, interpret_pollutant_risks, overall_aqi, sub_index, AqiCategory};
pub use history::{HistoricalDataCache, HourlyRecord};
pub use models::{
    CurrentAqiReport, ForecastDay, ForecastReport, PollutantRiskReport, PollutantValue,
    StationReading, WeatherReport, WeatherSnapshot,
};
pub use weatherapi::WeatherClient;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_wired() {
        assert!(!VERSION.is_empty());
    }
}
