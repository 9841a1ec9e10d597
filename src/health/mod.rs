//! AQI computation and health interpretation.
//!
//! Pure table-driven logic on the Indian CPCB standard: pollutant sub-index
//! calculation, AQI category classification, and per-pollutant health
//! advisories. No I/O lives here.

pub mod calculator;
pub mod interpreter;
pub mod scale;

pub use calculator::{overall_aqi, sub_index};
pub use interpreter::interpret_pollutant_risks;
pub use scale::{classify_aqi, AqiCategory, AQI_SCALE};
