//! The top-level acquisition facade.
//!
//! One struct owning both provider clients, exposing a method per question a
//! presentation layer asks. Every method returns a fully-populated report
//! record and never returns `Err`: expected failure modes are folded into
//! the record's `error` field so callers render outcomes instead of handling
//! exceptions.

use tracing::{info, instrument, warn};

use crate::aqicn::AqicnClient;
use crate::config::{BreatheEasyConfig, Secrets};
use crate::error::ApiError;
use crate::executor::Outcome;
use crate::health::interpret_pollutant_risks;
use crate::models::{CurrentAqiReport, ForecastReport, PollutantRiskReport, WeatherReport};
use crate::weatherapi::WeatherClient;

pub const UNKNOWN_STATION_ERROR: &str = "Station not found by AQICN.";
pub const AQI_NOT_REPORTED_ERROR: &str = "AQI value not reported by station.";
pub const POLLUTANT_DATA_MISSING_ERROR: &str = "Pollutant data or timestamp missing.";

pub struct BreatheEasy {
    aqicn: AqicnClient,
    weather: WeatherClient,
}

impl BreatheEasy {
    pub fn new(config: &BreatheEasyConfig, secrets: &Secrets) -> Result<Self, ApiError> {
        Ok(Self {
            aqicn: AqicnClient::new(config, secrets)?,
            weather: WeatherClient::new(config, secrets)?,
        })
    }

    /// Current AQI for a city.
    ///
    /// AQICN station lookups run with zero retries while the weather methods
    /// carry a retry budget. The asymmetry is deliberate and preserved until
    /// product decides otherwise.
    #[instrument(skip(self))]
    pub fn current_aqi(&self, city: &str) -> CurrentAqiReport {
        let city_query = city_part(city);
        match self.aqicn.fetch_station(city_query) {
            Ok(Outcome::Success(reading)) => match reading.aqi {
                Some(aqi) => {
                    info!(city = city_query, aqi, "station reported AQI");
                    CurrentAqiReport {
                        city: city_query.to_string(),
                        aqi: Some(aqi),
                        station: reading.station_name,
                        observed_at: reading.observed_at,
                        error: None,
                    }
                }
                None => CurrentAqiReport::failure(
                    city_query,
                    reading.station_name,
                    AQI_NOT_REPORTED_ERROR,
                ),
            },
            Ok(Outcome::Empty) => {
                CurrentAqiReport::failure(city_query, "Unknown station", UNKNOWN_STATION_ERROR)
            }
            Err(err) => {
                warn!(city = city_query, %err, "AQI fetch failed");
                CurrentAqiReport::failure(city_query, "Error", format!("API Error: {err}"))
            }
        }
    }

    /// Pollutant panel with interpreted health advisories for a city.
    #[instrument(skip(self))]
    pub fn pollutant_risks(&self, city: &str) -> PollutantRiskReport {
        let city_query = city_part(city);
        match self.aqicn.fetch_station(city_query) {
            Ok(Outcome::Success(reading)) => {
                if reading.observed_at.is_none() || reading.pollutants.is_empty() {
                    return PollutantRiskReport::failure(city_query, POLLUTANT_DATA_MISSING_ERROR);
                }
                let risks = interpret_pollutant_risks(&reading.pollutants);
                info!(
                    city = city_query,
                    advisories = risks.len(),
                    "interpreted pollutant panel"
                );
                PollutantRiskReport {
                    city: city_query.to_string(),
                    observed_at: reading.observed_at,
                    pollutants: reading.pollutants,
                    risks,
                    error: None,
                }
            }
            Ok(Outcome::Empty) => PollutantRiskReport::failure(city_query, UNKNOWN_STATION_ERROR),
            Err(err) => {
                warn!(city = city_query, %err, "pollutant fetch failed");
                PollutantRiskReport::failure(city_query, format!("API Error: {err}"))
            }
        }
    }

    /// Current weather for a city. The full city string is passed through;
    /// the weather provider handles "City, Country" queries itself.
    #[instrument(skip(self))]
    pub fn current_weather(&self, city: &str) -> WeatherReport {
        match self.weather.fetch_current(city) {
            Ok(Outcome::Success(snapshot)) => WeatherReport {
                city: city.to_string(),
                snapshot: Some(snapshot),
                error: None,
            },
            Ok(Outcome::Empty) => {
                info!(city, "weather provider did not recognize the location");
                WeatherReport {
                    city: city.to_string(),
                    snapshot: None,
                    error: None,
                }
            }
            Err(err) => {
                warn!(city, %err, "weather fetch failed");
                WeatherReport {
                    city: city.to_string(),
                    snapshot: None,
                    error: Some(format!("API Error: {err}")),
                }
            }
        }
    }

    /// Multi-day forecast for a city; `days` is clamped to the provider's
    /// accepted range before the request goes out.
    #[instrument(skip(self))]
    pub fn weather_forecast(&self, city: &str, days: u32) -> ForecastReport {
        match self.weather.fetch_forecast(city, days) {
            Ok(Outcome::Success(day_list)) => ForecastReport {
                city: city.to_string(),
                days: day_list,
                error: None,
            },
            Ok(Outcome::Empty) => {
                info!(city, "forecast provider did not recognize the location");
                ForecastReport {
                    city: city.to_string(),
                    days: Vec::new(),
                    error: None,
                }
            }
            Err(err) => {
                warn!(city, %err, "forecast fetch failed");
                ForecastReport {
                    city: city.to_string(),
                    days: Vec::new(),
                    error: Some(format!("API Error: {err}")),
                }
            }
        }
    }
}

/// AQICN indexes stations by bare city name, so "Delhi, India" queries as
/// "Delhi".
fn city_part(city_full: &str) -> &str {
    city_full.split(',').next().unwrap_or(city_full).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Delhi, India", "Delhi")]
    #[case("Delhi", "Delhi")]
    #[case("  Mumbai , India", "Mumbai")]
    #[case("", "")]
    #[case("a,b,c", "a")]
    fn test_city_part_extraction(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(city_part(input), expected);
    }
}
