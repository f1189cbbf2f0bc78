//! Gateway configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are loaded with the `PAYGATE`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paygate::config::GatewayConfig;
//!
//! let config = GatewayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod momo;
mod vnpay;

pub use error::{ConfigError, ValidationError};
pub use momo::MomoConfig;
pub use vnpay::VnpayConfig;

use serde::Deserialize;

/// Root gateway configuration
///
/// Contains one section per payment provider plus the shared HTTP client
/// settings. Load using [`GatewayConfig::load()`].
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// MoMo merchant credentials and endpoint
    pub momo: MomoConfig,

    /// VNPay merchant credentials and hosted-checkout URL
    pub vnpay: VnpayConfig,

    /// Shared HTTP client settings (provider API calls)
    #[serde(default)]
    pub http: HttpClientConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYGATE__MOMO__PARTNER_CODE=...` -> `momo.partner_code`
    /// - `PAYGATE__VNPAY__HASH_SECRET=...` -> `vnpay.hash_secret`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYGATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Missing merchant codes or signing secrets are hard errors: an
    /// unsigned or mis-signed request must be impossible to emit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.momo.validate()?;
        self.vnpay.validate()?;
        self.http.validate()?;
        Ok(())
    }
}

/// HTTP client settings for providers that require a remote call.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout in seconds for provider API calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpClientConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
