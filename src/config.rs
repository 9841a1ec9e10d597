//! Configuration management for the BreatheEasy acquisition core.
//!
//! Handles loading configuration from a TOML file and environment variables,
//! enumerates every recognized option with an explicit default, and validates
//! the result once at startup.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use crate::executor::RetryPolicy;

/// Root configuration for the acquisition core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreatheEasyConfig {
    /// Provider endpoint configuration
    #[serde(default)]
    pub apis: ApisConfig,
    /// Request timeout applied to every provider call, in seconds
    #[serde(default = "default_api_timeout")]
    pub api_timeout_seconds: u64,
    /// Retry budgets (attempt count beyond the first request)
    #[serde(default)]
    pub api_retries: RetryBudgetConfig,
    /// Delay between retry attempts, in seconds
    #[serde(default)]
    pub api_retry_delay_seconds: RetryDelayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApisConfig {
    #[serde(default)]
    pub aqicn: AqicnEndpoints,
    #[serde(default)]
    pub weatherapi: WeatherApiEndpoints,
}

/// AQICN (World Air Quality Index) endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqicnEndpoints {
    #[serde(default = "default_aqicn_base_url")]
    pub base_url: String,
}

/// WeatherAPI.com endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiEndpoints {
    /// Current-conditions endpoint
    #[serde(default = "default_weatherapi_base_url")]
    pub base_url: String,
    /// Multi-day forecast endpoint
    #[serde(default = "default_weatherapi_forecast_url")]
    pub forecast_url: String,
}

/// Retry counts; `None` for an endpoint override means "use the default".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryBudgetConfig {
    #[serde(default = "default_retries")]
    pub default: u32,
    #[serde(default)]
    pub weather_api_current: Option<u32>,
    #[serde(default)]
    pub weather_api_forecast: Option<u32>,
}

/// Retry delays in whole seconds; `None` overrides fall back to the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryDelayConfig {
    #[serde(default = "default_retry_delay")]
    pub default: u64,
    #[serde(default)]
    pub weather_api_current: Option<u64>,
    #[serde(default)]
    pub weather_api_forecast: Option<u64>,
}

// Default value functions
fn default_aqicn_base_url() -> String {
    "https://api.waqi.info/feed".to_string()
}

fn default_weatherapi_base_url() -> String {
    "http://api.weatherapi.com/v1/current.json".to_string()
}

fn default_weatherapi_forecast_url() -> String {
    "http://api.weatherapi.com/v1/forecast.json".to_string()
}

fn default_api_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    1
}

impl Default for AqicnEndpoints {
    fn default() -> Self {
        Self {
            base_url: default_aqicn_base_url(),
        }
    }
}

impl Default for WeatherApiEndpoints {
    fn default() -> Self {
        Self {
            base_url: default_weatherapi_base_url(),
            forecast_url: default_weatherapi_forecast_url(),
        }
    }
}

impl Default for RetryBudgetConfig {
    fn default() -> Self {
        Self {
            default: default_retries(),
            weather_api_current: None,
            weather_api_forecast: None,
        }
    }
}

impl Default for RetryDelayConfig {
    fn default() -> Self {
        Self {
            default: default_retry_delay(),
            weather_api_current: None,
            weather_api_forecast: None,
        }
    }
}

impl Default for BreatheEasyConfig {
    fn default() -> Self {
        Self {
            apis: ApisConfig::default(),
            api_timeout_seconds: default_api_timeout(),
            api_retries: RetryBudgetConfig::default(),
            api_retry_delay_seconds: RetryDelayConfig::default(),
        }
    }
}

impl BreatheEasyConfig {
    /// Load configuration from the default file location and environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path, falling back to defaults
    /// for anything the file and environment leave unset.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides use the BREATHEASY_ prefix, e.g.
        // BREATHEASY_API_TIMEOUT_SECONDS=30
        builder = builder.add_source(
            Environment::with_prefix("BREATHEASY")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: BreatheEasyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("breatheasy").join("config.toml"))
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        if self.api_timeout_seconds == 0 || self.api_timeout_seconds > 300 {
            anyhow::bail!("api_timeout_seconds must be between 1 and 300");
        }
        if self.api_retries.default > 10 {
            anyhow::bail!("api_retries.default cannot exceed 10");
        }
        for (name, url) in [
            ("apis.aqicn.base_url", &self.apis.aqicn.base_url),
            ("apis.weatherapi.base_url", &self.apis.weatherapi.base_url),
            (
                "apis.weatherapi.forecast_url",
                &self.apis.weatherapi.forecast_url,
            ),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{name} must be a valid HTTP or HTTPS URL");
            }
        }
        Ok(())
    }

    /// Request timeout applied to every provider call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    /// Retry policy for WeatherAPI current-conditions requests.
    #[must_use]
    pub fn weather_current_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.api_retries
                .weather_api_current
                .unwrap_or(self.api_retries.default),
            Duration::from_secs(
                self.api_retry_delay_seconds
                    .weather_api_current
                    .unwrap_or(self.api_retry_delay_seconds.default),
            ),
        )
    }

    /// Retry policy for WeatherAPI forecast requests.
    #[must_use]
    pub fn weather_forecast_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.api_retries
                .weather_api_forecast
                .unwrap_or(self.api_retries.default),
            Duration::from_secs(
                self.api_retry_delay_seconds
                    .weather_api_forecast
                    .unwrap_or(self.api_retry_delay_seconds.default),
            ),
        )
    }
}

static LOAD_DOTENV: Once = Once::new();

/// API credentials resolved from the process environment.
///
/// A local `.env` file, when present, is loaded once before the first lookup.
/// Absent credentials are carried as `None`; the clients convert them into
/// `AuthFailure` errors without issuing any network request.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub aqicn_token: Option<String>,
    pub weatherapi_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        LOAD_DOTENV.call_once(|| {
            if dotenv::dotenv().is_ok() {
                tracing::info!("loaded secrets from local .env file");
            }
        });
        Self {
            aqicn_token: non_empty_env("AQICN_API_TOKEN"),
            weatherapi_key: non_empty_env("WEATHERAPI_API_KEY"),
        }
    }

    /// Explicit credentials, mainly for tests and embedding callers.
    pub fn new(aqicn_token: Option<String>, weatherapi_key: Option<String>) -> Self {
        Self {
            aqicn_token,
            weatherapi_key,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
