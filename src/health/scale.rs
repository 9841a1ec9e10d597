//! The CPCB AQI category scale.

use serde::Serialize;

/// One band of the CPCB scale with its display color and health text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AqiCategory {
    pub range_low: u32,
    pub range_high: u32,
    pub level: &'static str,
    pub color: &'static str,
    pub implications: &'static str,
}

/// The six CPCB bands, in ascending order and contiguous over 0..=500.
pub static AQI_SCALE: [AqiCategory; 6] = [
    AqiCategory {
        range_low: 0,
        range_high: 50,
        level: "Good",
        color: "#228B22",
        implications: "Minimal Impact. Air quality is considered satisfactory, and air pollution poses little or no risk.",
    },
    AqiCategory {
        range_low: 51,
        range_high: 100,
        level: "Satisfactory",
        color: "#90EE90",
        implications: "Minor breathing discomfort to sensitive people. Air quality is acceptable.",
    },
    AqiCategory {
        range_low: 101,
        range_high: 200,
        level: "Moderate",
        color: "#FFD700",
        implications: "Breathing discomfort to people with lung disease such as asthma, and discomfort to people with heart disease, children and older adults.",
    },
    AqiCategory {
        range_low: 201,
        range_high: 300,
        level: "Poor",
        color: "#FFA500",
        implications: "Breathing discomfort to people on prolonged exposure, and discomfort to people with heart disease.",
    },
    AqiCategory {
        range_low: 301,
        range_high: 400,
        level: "Very Poor",
        color: "#FF0000",
        implications: "Respiratory illness on prolonged exposure. Effect may be more pronounced in people with lung and heart diseases.",
    },
    AqiCategory {
        range_low: 401,
        range_high: 500,
        level: "Severe",
        color: "#800000",
        implications: "Affects healthy people and seriously impacts those with existing diseases. May cause respiratory impact even on light physical activity.",
    },
];

/// Classify an AQI value into its CPCB band.
///
/// Values beyond 500 clamp into the Severe band; negative or NaN input is
/// unclassifiable and yields `None`.
#[must_use]
pub fn classify_aqi(aqi: f64) -> Option<&'static AqiCategory> {
    if aqi.is_nan() || aqi < 0.0 {
        return None;
    }
    let rounded = (aqi + 0.5).floor() as u32;
    AQI_SCALE
        .iter()
        .find(|band| rounded >= band.range_low && rounded <= band.range_high)
        .or_else(|| AQI_SCALE.last())
}
