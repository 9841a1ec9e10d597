//! AQICN (World Air Quality Index Project) provider client.
//!
//! Fetches a station's current AQI and pollutant panel for a city query.
//! Station lookups are cheap and "unknown station" is a common answer, so
//! this client deliberately runs with zero retries and fails fast — in
//! contrast to the weather client's configurable retry budget.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{BreatheEasyConfig, Secrets};
use crate::error::ApiError;
use crate::executor::{Outcome, RequestExecutor, RetryPolicy, Screening};
use crate::models::{PollutantValue, StationReading};

pub const SERVICE: &str = "AQICN";

pub struct AqicnClient {
    executor: RequestExecutor,
    base_url: String,
    token: Option<String>,
}

impl AqicnClient {
    pub fn new(config: &BreatheEasyConfig, secrets: &Secrets) -> Result<Self, ApiError> {
        Ok(Self {
            executor: RequestExecutor::new(SERVICE, config.timeout())?,
            base_url: config.apis.aqicn.base_url.trim_end_matches('/').to_string(),
            token: secrets.aqicn_token.clone(),
        })
    }

    /// Fetch the current station reading for a city query.
    ///
    /// Returns `Outcome::Empty` when the provider answers with its
    /// "Unknown station" sentinel — a valid response, not a failure.
    #[instrument(skip(self))]
    pub fn fetch_station(&self, city_query: &str) -> Result<Outcome<StationReading>, ApiError> {
        let token = self.token.as_deref().ok_or_else(|| {
            ApiError::auth_failure(
                SERVICE,
                "AQICN_API_TOKEN not found; set it in .env or the environment",
            )
        })?;

        let url = format!("{}/{}/", self.base_url, urlencoding::encode(city_query));
        let params = [("token", token.to_string())];
        debug!(city_query, "requesting station feed");

        match self
            .executor
            .execute(&url, &params, RetryPolicy::none(), screen_feed)?
        {
            Outcome::Empty => Ok(Outcome::Empty),
            Outcome::Success(body) => Ok(Outcome::Success(parse_feed(city_query, body)?)),
        }
    }
}

/// AQICN wraps every payload in `{status, data}`; an "error" status with an
/// "Unknown station" reason is the provider's not-found sentinel.
fn screen_feed(body: &Value) -> Screening {
    match body.get("status").and_then(Value::as_str) {
        Some("ok") => Screening::Accept,
        Some("error") => {
            let reason = body
                .get("data")
                .map(Value::to_string)
                .unwrap_or_else(|| "unknown API error reason".to_string());
            if reason.contains("Unknown station") {
                Screening::Empty
            } else {
                Screening::Reject(ApiError::unknown(
                    SERVICE,
                    format!("provider error: {reason}"),
                    None,
                ))
            }
        }
        _ => Screening::Reject(ApiError::unknown(
            SERVICE,
            "unexpected or missing status in response",
            None,
        )),
    }
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default)]
    data: FeedData,
}

#[derive(Debug, Default, Deserialize)]
struct FeedData {
    #[serde(default)]
    aqi: Value,
    city: Option<FeedCity>,
    time: Option<FeedTime>,
    #[serde(default)]
    iaqi: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FeedCity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedTime {
    s: Option<String>,
}

fn parse_feed(city_query: &str, body: Value) -> Result<StationReading, ApiError> {
    let feed: Feed = serde_json::from_value(body)
        .map_err(|e| ApiError::malformed(SERVICE, format!("unexpected feed shape: {e}")))?;
    let data = feed.data;

    let station_name = data
        .city
        .and_then(|c| c.name)
        .unwrap_or_else(|| city_query.to_string());
    let observed_at = data.time.and_then(|t| t.s);
    let aqi = parse_aqi(&data.aqi);

    // Panel entries without a numeric "v" are dropped here; downstream
    // interpretation only ever sees numeric concentrations.
    let pollutants = data
        .iaqi
        .into_iter()
        .filter_map(|(code, entry)| {
            entry
                .get("v")
                .and_then(Value::as_f64)
                .map(|v| (code, PollutantValue { v }))
        })
        .collect();

    Ok(StationReading {
        city_query: city_query.to_string(),
        aqi,
        station_name,
        observed_at,
        pollutants,
    })
}

/// The feed reports AQI as a number, a numeric string, or a "-" placeholder
/// when the station did not report a value.
fn parse_aqi(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| (f + 0.5).floor() as i64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                None
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_screen_accepts_ok_status() {
        assert!(matches!(
            screen_feed(&json!({"status": "ok", "data": {}})),
            Screening::Accept
        ));
    }

    #[test]
    fn test_screen_maps_unknown_station_to_empty() {
        assert!(matches!(
            screen_feed(&json!({"status": "error", "data": "Unknown station"})),
            Screening::Empty
        ));
    }

    #[test]
    fn test_screen_rejects_other_provider_errors() {
        match screen_feed(&json!({"status": "error", "data": "Over quota"})) {
            Screening::Reject(err) => assert!(err.message.contains("Over quota")),
            _ => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_screen_rejects_missing_status() {
        assert!(matches!(
            screen_feed(&json!({"data": {}})),
            Screening::Reject(_)
        ));
    }

    #[test]
    fn test_parse_aqi_variants() {
        assert_eq!(parse_aqi(&json!(161)), Some(161));
        assert_eq!(parse_aqi(&json!(148.6)), Some(149));
        assert_eq!(parse_aqi(&json!("42")), Some(42));
        assert_eq!(parse_aqi(&json!("-")), None);
        assert_eq!(parse_aqi(&json!("")), None);
        assert_eq!(parse_aqi(&json!("n/a")), None);
        assert_eq!(parse_aqi(&Value::Null), None);
    }

    #[test]
    fn test_parse_feed_extracts_reading() {
        let body = json!({
            "status": "ok",
            "data": {
                "aqi": 161,
                "city": {"name": "Major Dhyan Chand National Stadium, Delhi"},
                "time": {"s": "2026-08-29 14:00:00"},
                "iaqi": {
                    "pm25": {"v": 161},
                    "no2": {"v": 18.2},
                    "w": {"v": "calm"}
                }
            }
        });
        let reading = parse_feed("Delhi", body).unwrap();
        assert_eq!(reading.aqi, Some(161));
        assert_eq!(
            reading.station_name,
            "Major Dhyan Chand National Stadium, Delhi"
        );
        assert_eq!(reading.observed_at.as_deref(), Some("2026-08-29 14:00:00"));
        assert_eq!(reading.pollutant("pm25"), Some(161.0));
        assert_eq!(reading.pollutant("no2"), Some(18.2));
        // the non-numeric wind entry is dropped, not fatal
        assert_eq!(reading.pollutant("w"), None);
    }

    #[test]
    fn test_parse_feed_tolerates_sparse_payload() {
        let reading = parse_feed("Nowhere", json!({"status": "ok", "data": {}})).unwrap();
        assert_eq!(reading.aqi, None);
        assert_eq!(reading.station_name, "Nowhere");
        assert!(reading.observed_at.is_none());
        assert!(reading.pollutants.is_empty());
    }
}
