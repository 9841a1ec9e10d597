//! WeatherAPI.com provider client.
//!
//! Fetches current conditions and multi-day forecasts with a configurable
//! retry budget (default 2 retries, 1s delay). Weather providers are expected
//! to have transient 5xx blips worth retrying, unlike station lookups.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{BreatheEasyConfig, Secrets};
use crate::error::ApiError;
use crate::executor::{Outcome, RequestExecutor, RetryPolicy, Screening};
use crate::models::{ForecastDay, WeatherSnapshot};

pub const SERVICE: &str = "WeatherAPI";

/// Provider-accepted forecast horizon.
pub const MIN_FORECAST_DAYS: u32 = 1;
pub const MAX_FORECAST_DAYS: u32 = 14;

pub struct WeatherClient {
    executor: RequestExecutor,
    current_url: String,
    forecast_url: String,
    key: Option<String>,
    current_policy: RetryPolicy,
    forecast_policy: RetryPolicy,
}

impl WeatherClient {
    pub fn new(config: &BreatheEasyConfig, secrets: &Secrets) -> Result<Self, ApiError> {
        Ok(Self {
            executor: RequestExecutor::new(SERVICE, config.timeout())?,
            current_url: config.apis.weatherapi.base_url.clone(),
            forecast_url: config.apis.weatherapi.forecast_url.clone(),
            key: secrets.weatherapi_key.clone(),
            current_policy: config.weather_current_policy(),
            forecast_policy: config.weather_forecast_policy(),
        })
    }

    /// Fetch current conditions for a city.
    ///
    /// `Outcome::Empty` means the provider did not recognize the location.
    #[instrument(skip(self))]
    pub fn fetch_current(&self, city: &str) -> Result<Outcome<WeatherSnapshot>, ApiError> {
        let key = self.credential()?;
        let params = [
            ("key", key),
            ("q", city.to_string()),
            ("aqi", "no".to_string()),
        ];
        debug!(city, "requesting current conditions");

        match self
            .executor
            .execute(&self.current_url, &params, self.current_policy, screen_body)?
        {
            Outcome::Empty => Ok(Outcome::Empty),
            Outcome::Success(body) => Ok(Outcome::Success(parse_current(body)?)),
        }
    }

    /// Fetch a multi-day forecast; `days` is clamped into [1, 14] before the
    /// request is issued.
    #[instrument(skip(self))]
    pub fn fetch_forecast(
        &self,
        city: &str,
        days: u32,
    ) -> Result<Outcome<Vec<ForecastDay>>, ApiError> {
        let key = self.credential()?;
        let days = clamp_days(days);
        let params = [
            ("key", key),
            ("q", city.to_string()),
            ("days", days.to_string()),
            ("aqi", "no".to_string()),
            ("alerts", "no".to_string()),
        ];
        debug!(city, days, "requesting forecast");

        match self.executor.execute(
            &self.forecast_url,
            &params,
            self.forecast_policy,
            screen_body,
        )? {
            Outcome::Empty => Ok(Outcome::Empty),
            Outcome::Success(body) => {
                let parsed = parse_forecast(body)?;
                // An empty day list is still a successful answer; only the
                // provider's 1006 sentinel means "location not recognized".
                if parsed.is_empty() {
                    warn!(city, "provider returned no forecast days");
                }
                Ok(Outcome::Success(parsed))
            }
        }
    }

    fn credential(&self) -> Result<String, ApiError> {
        self.key.clone().ok_or_else(|| {
            ApiError::auth_failure(
                SERVICE,
                "WEATHERAPI_API_KEY not found; set it in .env or the environment",
            )
        })
    }
}

pub(crate) fn clamp_days(days: u32) -> u32 {
    days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS)
}

/// WeatherAPI signals problems with an `error` object carrying a numeric
/// code, delivered both on 200 and behind a 400 status. Code 1006 is the
/// "no matching location found" sentinel; a family of codes maps to
/// credential problems.
fn screen_body(body: &Value) -> Screening {
    let Some(err) = body.get("error") else {
        return Screening::Accept;
    };
    let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown API error");
    match code {
        1006 => Screening::Empty,
        1002 | 1003 | 1005 | 2006 | 2007 | 2008 => Screening::Reject(ApiError::auth_failure(
            SERVICE,
            format!("code {code}: {message}"),
        )),
        _ => Screening::Reject(ApiError::unknown(
            SERVICE,
            format!("provider error code {code}: {message}"),
            None,
        )),
    }
}

#[derive(Debug, Deserialize)]
struct CurrentEnvelope {
    current: Option<CurrentWire>,
    location: Option<LocationWire>,
}

#[derive(Debug, Deserialize)]
struct CurrentWire {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    pressure_mb: f64,
    #[serde(default)]
    condition: ConditionWire,
    wind_kph: f64,
    wind_dir: String,
    uv: f64,
    last_updated: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConditionWire {
    #[serde(default)]
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct LocationWire {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    localtime: Option<String>,
}

fn parse_current(body: Value) -> Result<WeatherSnapshot, ApiError> {
    let envelope: CurrentEnvelope = serde_json::from_value(body)
        .map_err(|e| ApiError::malformed(SERVICE, format!("unexpected response shape: {e}")))?;
    let (Some(current), Some(location)) = (envelope.current, envelope.location) else {
        return Err(ApiError::malformed(
            SERVICE,
            "response missing 'current' or 'location'",
        ));
    };
    Ok(WeatherSnapshot {
        temperature_c: current.temp_c,
        feels_like_c: current.feelslike_c,
        humidity: current.humidity,
        pressure_mb: current.pressure_mb,
        condition_text: current.condition.text,
        condition_icon_url: current.condition.icon,
        wind_kph: current.wind_kph,
        wind_dir: current.wind_dir,
        uv_index: current.uv,
        location_name: location.name,
        region: location.region,
        country: location.country,
        observed_at: current.last_updated,
        localtime: location.localtime,
    })
}

#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    forecast: Option<ForecastWire>,
}

#[derive(Debug, Deserialize)]
struct ForecastWire {
    #[serde(default)]
    forecastday: Vec<ForecastDayWire>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayWire {
    date: String,
    day: DayWire,
}

#[derive(Debug, Deserialize)]
struct DayWire {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    totalprecip_mm: f64,
    uv: f64,
    #[serde(default)]
    condition: ConditionWire,
}

fn parse_forecast(body: Value) -> Result<Vec<ForecastDay>, ApiError> {
    let envelope: ForecastEnvelope = serde_json::from_value(body)
        .map_err(|e| ApiError::malformed(SERVICE, format!("unexpected forecast shape: {e}")))?;
    let days = envelope.forecast.map(|f| f.forecastday).unwrap_or_default();
    Ok(days
        .into_iter()
        .map(|d| ForecastDay {
            date: d.date,
            avg_temp_c: d.day.avgtemp_c,
            avg_humidity: d.day.avghumidity,
            max_wind_kph: d.day.maxwind_kph,
            total_precip_mm: d.day.totalprecip_mm,
            uv_index: d.day.uv,
            condition_text: d.day.condition.text,
        })
        .collect())
}
