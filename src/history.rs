//! Lazily-loaded historical AQI dataset.
//!
//! The master features CSV carries one row per city per hour. It is loaded
//! at most once per process on first use and kept immutable afterwards. A
//! failed load is not cached, so a file that appears later is picked up on
//! the next call.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use tracing::{error, info, warn};

/// One hourly row of the master features dataset. Columns the analysis does
/// not use (NOx, Benzene, AQI_Bucket, ...) are simply not mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyRecord {
    #[serde(rename = "Datetime", deserialize_with = "de_datetime")]
    pub datetime: NaiveDateTime,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "AQI")]
    pub aqi: Option<f64>,
    #[serde(rename = "PM2.5")]
    pub pm25: Option<f64>,
    #[serde(rename = "PM10")]
    pub pm10: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "SO2")]
    pub so2: Option<f64>,
}

fn de_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map_err(serde::de::Error::custom)
}

pub struct HistoricalDataCache {
    path: PathBuf,
    init: Mutex<()>,
    records: OnceLock<Vec<HourlyRecord>>,
}

impl HistoricalDataCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            init: Mutex::new(()),
            records: OnceLock::new(),
        }
    }

    /// All records, loading the file on first call.
    ///
    /// Returns an empty slice when the file cannot be read; that failure is
    /// not cached.
    pub fn records(&self) -> &[HourlyRecord] {
        if let Some(records) = self.records.get() {
            return records;
        }
        let _guard = self
            .init
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(records) = self.records.get() {
            return records;
        }
        match load_records(&self.path) {
            Ok(records) => {
                info!(
                    path = %self.path.display(),
                    count = records.len(),
                    "loaded historical dataset"
                );
                self.records.get_or_init(|| records)
            }
            Err(err) => {
                error!(path = %self.path.display(), %err, "historical dataset unavailable");
                &[]
            }
        }
    }

    /// Records for one city, in file order.
    pub fn for_city(&self, city: &str) -> Vec<HourlyRecord> {
        let matched: Vec<HourlyRecord> = self
            .records()
            .iter()
            .filter(|r| r.city == city)
            .cloned()
            .collect();
        info!(city, count = matched.len(), "historical records for city");
        matched
    }
}

fn load_records(path: &Path) -> Result<Vec<HourlyRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => warn!(%err, "skipping unreadable row"),
        }
    }
    Ok(records)
}
