//! Funnel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults produce a working local setup with
//! tracking disabled.
//!
//! - `DRIFTWAVE_DATA_DIR` - Directory for session storage (default: `.driftwave`)
//! - `POSTHOG_API_KEY` - Analytics ingestion key; absence disables all tracking
//! - `POSTHOG_HOST` - Analytics ingestion endpoint (default: `https://us.i.posthog.com`)
//! - `DRIFTWAVE_PAYMENT_DELAY_MS` - Simulated payment delay (default: 2000)
//! - `DRIFTWAVE_PAYMENT_FAILURE_RATE` - Simulated decline rate in `0.0..=1.0`
//!   (default: 0.1)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default analytics ingestion endpoint.
pub const DEFAULT_ANALYTICS_HOST: &str = "https://us.i.posthog.com";

/// Default simulated payment delay in milliseconds.
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2_000;

/// Default simulated payment decline rate.
pub const DEFAULT_PAYMENT_FAILURE_RATE: f64 = 0.1;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Funnel application configuration.
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    /// Directory holding the session store's persisted values
    pub data_dir: PathBuf,
    /// Analytics ingestion configuration
    pub analytics: AnalyticsConfig,
    /// Simulated payment configuration
    pub payments: PaymentConfig,
}

/// Analytics ingestion configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AnalyticsConfig {
    /// Ingestion API key; `None` disables all tracking
    pub api_key: Option<SecretString>,
    /// Ingestion endpoint base URL
    pub host: String,
}

impl std::fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .finish()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_ANALYTICS_HOST.to_owned(),
        }
    }
}

/// Simulated payment configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Suspension before the simulated gateway answers, in milliseconds
    pub delay_ms: u64,
    /// Probability of a decline, within `0.0..=1.0`
    pub failure_rate: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_PAYMENT_DELAY_MS,
            failure_rate: DEFAULT_PAYMENT_FAILURE_RATE,
        }
    }
}

impl FunnelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable or out
    /// of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("DRIFTWAVE_DATA_DIR", ".driftwave"));
        let analytics = AnalyticsConfig::from_env();
        let payments = PaymentConfig::from_env()?;

        Ok(Self {
            data_dir,
            analytics,
            payments,
        })
    }
}

impl AnalyticsConfig {
    fn from_env() -> Self {
        Self {
            api_key: get_optional_env("POSTHOG_API_KEY").map(SecretString::from),
            host: get_env_or_default("POSTHOG_HOST", DEFAULT_ANALYTICS_HOST),
        }
    }

    /// Whether an ingestion key is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let delay_ms = match get_optional_env("DRIFTWAVE_PAYMENT_DELAY_MS") {
            Some(raw) => parse_delay_ms(&raw)?,
            None => DEFAULT_PAYMENT_DELAY_MS,
        };
        let failure_rate = match get_optional_env("DRIFTWAVE_PAYMENT_FAILURE_RATE") {
            Some(raw) => parse_failure_rate(&raw)?,
            None => DEFAULT_PAYMENT_FAILURE_RATE,
        };

        Ok(Self {
            delay_ms,
            failure_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the payment delay variable.
fn parse_delay_ms(raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|e| {
        ConfigError::InvalidEnvVar("DRIFTWAVE_PAYMENT_DELAY_MS".to_string(), e.to_string())
    })
}

/// Parse and range-check the payment failure rate variable.
fn parse_failure_rate(raw: &str) -> Result<f64, ConfigError> {
    let rate = raw.parse::<f64>().map_err(|e| {
        ConfigError::InvalidEnvVar("DRIFTWAVE_PAYMENT_FAILURE_RATE".to_string(), e.to_string())
    })?;

    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            "DRIFTWAVE_PAYMENT_FAILURE_RATE".to_string(),
            format!("must be within 0.0..=1.0 (got {rate})"),
        ));
    }

    Ok(rate)
}
