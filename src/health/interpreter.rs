//! Per-pollutant health advisories.
//!
//! Maps raw concentrations against severity thresholds and renders one
//! advisory line per pollutant that crosses a tier. Thresholds mirror the
//! CPCB breakpoint lower bounds for the Moderate tier and above.

use std::collections::HashMap;

use tracing::debug;

use crate::models::PollutantValue;

/// One severity tier for a pollutant; tiers are consulted highest-first.
#[derive(Debug, Clone, Copy)]
pub struct HealthThreshold {
    pub threshold: f64,
    pub severity: &'static str,
    pub advisory: &'static str,
}

const SEVERE_GENERIC: &str =
    "Serious respiratory impact on healthy people. Serious aggravation of heart or lung disease.";
const VERY_POOR_GENERIC: &str =
    "Respiratory illness on prolonged exposure. Effect may be pronounced in people with heart/lung diseases.";
const POOR_GENERIC: &str =
    "Breathing discomfort to people on prolonged exposure, and discomfort to people with heart disease.";
const MODERATE_GENERIC: &str =
    "Breathing discomfort to people with lung disease (e.g., asthma) and heart disease, children, older adults.";

/// Pollutants in reporting order, each with descending severity tiers.
pub const POLLUTANT_HEALTH_THRESHOLDS: [(&str, &[HealthThreshold]); 6] = [
    (
        "pm25",
        &[
            HealthThreshold {
                threshold: 251.0,
                severity: "Severe",
                advisory: SEVERE_GENERIC,
            },
            HealthThreshold {
                threshold: 121.0,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 91.0,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 61.0,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
    (
        "pm10",
        &[
            HealthThreshold {
                threshold: 431.0,
                severity: "Severe",
                advisory: SEVERE_GENERIC,
            },
            HealthThreshold {
                threshold: 351.0,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 251.0,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 101.0,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
    (
        "o3",
        &[
            HealthThreshold {
                threshold: 749.0,
                severity: "Severe",
                advisory: SEVERE_GENERIC,
            },
            HealthThreshold {
                threshold: 209.0,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 169.0,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 101.0,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
    (
        "no2",
        &[
            HealthThreshold {
                threshold: 401.0,
                severity: "Severe",
                advisory: SEVERE_GENERIC,
            },
            HealthThreshold {
                threshold: 281.0,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 181.0,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 81.0,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
    (
        "so2",
        &[
            HealthThreshold {
                threshold: 1601.0,
                severity: "Severe",
                advisory: SEVERE_GENERIC,
            },
            HealthThreshold {
                threshold: 801.0,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 381.0,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 81.0,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
    (
        "co",
        &[
            HealthThreshold {
                threshold: 34.1,
                severity: "Severe",
                advisory: "Serious aggravation of heart or lung disease; may cause respiratory effects even during light activity.",
            },
            HealthThreshold {
                threshold: 17.1,
                severity: "Very Poor",
                advisory: VERY_POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 10.1,
                severity: "Poor",
                advisory: POOR_GENERIC,
            },
            HealthThreshold {
                threshold: 2.1,
                severity: "Moderate",
                advisory: MODERATE_GENERIC,
            },
        ],
    ),
];

/// Render advisories for every pollutant in the panel that crosses a tier.
///
/// Output order follows the threshold table, not the panel's hash order, so
/// the same panel always renders the same list. Pollutants below every tier
/// and NaN readings produce no line.
#[must_use]
pub fn interpret_pollutant_risks(pollutants: &HashMap<String, PollutantValue>) -> Vec<String> {
    let mut risks = Vec::new();
    for (code, tiers) in POLLUTANT_HEALTH_THRESHOLDS {
        let Some(value) = pollutants.get(code).map(|p| p.v) else {
            continue;
        };
        if value.is_nan() {
            debug!(pollutant = code, "skipping NaN reading");
            continue;
        }
        if let Some(tier) = tiers.iter().find(|t| value >= t.threshold) {
            risks.push(format!(
                "{} ({}): {}",
                code.to_ascii_uppercase(),
                tier.severity,
                tier.advisory
            ));
        }
    }
    risks
}
