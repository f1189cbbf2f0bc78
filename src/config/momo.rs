//! MoMo merchant configuration

use serde::Deserialize;

use super::error::ValidationError;

/// MoMo merchant configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MomoConfig {
    /// Merchant partner code issued by MoMo
    pub partner_code: String,

    /// API access key
    pub access_key: String,

    /// HMAC signing secret
    pub secret_key: String,

    /// Transaction processor endpoint
    #[serde(default = "MomoConfig::default_endpoint")]
    pub endpoint: String,
}

impl MomoConfig {
    /// Sandbox transaction endpoint, overridable per environment.
    pub fn default_endpoint() -> String {
        "https://test-payment.momo.vn/gw_payment/transactionProcessor".to_string()
    }

    /// Validate MoMo configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.partner_code.is_empty() {
            return Err(ValidationError::MissingRequired("PAYGATE__MOMO__PARTNER_CODE"));
        }
        if self.access_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYGATE__MOMO__ACCESS_KEY"));
        }
        if self.secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYGATE__MOMO__SECRET_KEY"));
        }
        if !self.endpoint.starts_with("http") {
            return Err(ValidationError::InvalidEndpointUrl("momo.endpoint"));
        }
        Ok(())
    }
}
