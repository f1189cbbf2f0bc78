//! Checkout request handed in by the controller layer.

use serde::{Deserialize, Serialize};

use super::errors::PaymentError;
use super::provider::{Language, ProviderId};

/// One checkout attempt, as handed to a gateway by the caller.
///
/// `order_id` uniqueness across attempts is enforced by the caller; this
/// core only requires it to be non-empty. `amount` is expressed in major
/// currency units at this boundary; gateways apply their provider's
/// minor-unit convention internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Caller-generated token correlating this attempt to one provider
    /// transaction.
    pub order_id: String,

    /// Amount in major currency units. Must be positive.
    pub amount: u64,

    /// Free-text order description. Provider charset rules are applied by
    /// the gateway, not the caller.
    pub order_description: String,

    /// Where the provider redirects the customer after checkout.
    pub return_url: String,

    /// Server-to-server notification (IPN) target.
    pub notify_url: String,

    /// Originating client IP, required by some providers for fraud scoring.
    pub ip_address: String,

    /// Which provider should handle this attempt.
    pub gateway: ProviderId,

    /// Checkout page locale.
    #[serde(default)]
    pub language: Language,
}

impl PaymentRequest {
    /// Enforce the request invariants before any provider work happens.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Configuration` when `order_id` is empty or
    /// `amount` is zero.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.order_id.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "order_id must not be empty".to_string(),
            ));
        }
        if self.amount == 0 {
            return Err(PaymentError::Configuration(
                "amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            order_id: "ORD-2024-0001".to_string(),
            amount: 100_000,
            order_description: "Goi VIP 1 thang".to_string(),
            return_url: "https://shop.example.com/payment/return".to_string(),
            notify_url: "https://shop.example.com/payment/ipn".to_string(),
            ip_address: "203.0.113.7".to_string(),
            gateway: ProviderId::Vnpay,
            language: Language::Vi,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn empty_order_id_is_rejected() {
        let mut req = request();
        req.order_id = "  ".to_string();
        assert!(matches!(
            req.validate(),
            Err(PaymentError::Configuration(_))
        ));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut req = request();
        req.amount = 0;
        assert!(matches!(
            req.validate(),
            Err(PaymentError::Configuration(_))
        ));
    }
}
