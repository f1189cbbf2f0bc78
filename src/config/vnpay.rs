//! VNPay merchant configuration

use serde::Deserialize;

use super::error::ValidationError;

/// VNPay merchant configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VnpayConfig {
    /// Terminal/merchant code issued by VNPay
    pub tmn_code: String,

    /// HMAC-SHA512 hash secret
    pub hash_secret: String,

    /// Hosted checkout base URL
    #[serde(default = "VnpayConfig::default_payment_url")]
    pub payment_url: String,
}

impl VnpayConfig {
    /// Sandbox hosted-checkout URL, overridable per environment.
    pub fn default_payment_url() -> String {
        "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string()
    }

    /// Validate VNPay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tmn_code.is_empty() {
            return Err(ValidationError::MissingRequired("PAYGATE__VNPAY__TMN_CODE"));
        }
        if self.hash_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYGATE__VNPAY__HASH_SECRET"));
        }
        if !self.payment_url.starts_with("http") {
            return Err(ValidationError::InvalidEndpointUrl("vnpay.payment_url"));
        }
        Ok(())
    }
}
