//! Contract for AQI forecasting backends.
//!
//! Model training and inference live outside this crate; anything that can
//! predict a daily AQI plugs in through [`DailySummaryForecaster`] and gets
//! its predictions rendered with the same category scale the live data uses.

use chrono::NaiveDate;
use serde::Serialize;

use crate::health::classify_aqi;

/// One forecast day with its predicted AQI classified on the category scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub predicted_aqi: f64,
    pub level: String,
    pub color: String,
    pub implications: String,
}

/// A backend that predicts daily AQI summaries for a city.
pub trait DailySummaryForecaster {
    fn get_daily_summary_forecast(
        &self,
        city: &str,
        days_ahead: u32,
    ) -> anyhow::Result<Vec<DailySummary>>;
}

/// Attach category metadata to a raw prediction.
///
/// Returns `None` when the prediction cannot be classified (negative or
/// NaN), which forecaster implementations should treat as a skipped day.
#[must_use]
pub fn summarize_prediction(date: NaiveDate, predicted_aqi: f64) -> Option<DailySummary> {
    let category = classify_aqi(predicted_aqi)?;
    Some(DailySummary {
        date,
        predicted_aqi,
        level: category.level.to_string(),
        color: category.color.to_string(),
        implications: category.implications.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn test_prediction_carries_category_metadata() {
        let summary = summarize_prediction(day(30), 148.7).unwrap();
        assert_eq!(summary.level, "Moderate");
        assert_eq!(summary.color, "#FFD700");
        assert_eq!(summary.predicted_aqi, 148.7);
    }

    #[test]
    fn test_unclassifiable_prediction_is_skipped() {
        assert!(summarize_prediction(day(30), -3.0).is_none());
        assert!(summarize_prediction(day(30), f64::NAN).is_none());
    }

    #[test]
    fn test_trait_is_object_safe() {
        struct Flat(f64);
        impl DailySummaryForecaster for Flat {
            fn get_daily_summary_forecast(
                &self,
                _city: &str,
                days_ahead: u32,
            ) -> anyhow::Result<Vec<DailySummary>> {
                Ok((1..=days_ahead)
                    .filter_map(|offset| summarize_prediction(day(29 + offset), self.0))
                    .collect())
            }
        }

        let forecaster: Box<dyn DailySummaryForecaster> = Box::new(Flat(320.0));
        let days = forecaster.get_daily_summary_forecast("Delhi", 2).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].level, "Very Poor");
    }
}
