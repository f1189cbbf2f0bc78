//! Gateway outcomes: redirect-URL creation and callback validation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::PaymentError;
use super::provider::ProviderId;

/// Raw key-value map received on the notify endpoint, kept verbatim for
/// audit. Request-scoped; never cached or shared between attempts.
pub type CallbackFields = BTreeMap<String, String>;

/// Outcome of building an outbound payment redirect URL.
///
/// Exactly one of `payment_url` / `error_message` is populated; use the
/// constructors rather than building the struct by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUrlResult {
    pub success: bool,
    pub payment_url: Option<String>,
    pub error_message: Option<String>,
}

impl PaymentUrlResult {
    /// Successful result carrying the redirect URL.
    pub fn ok(url: impl Into<String>) -> Self {
        Self {
            success: true,
            payment_url: Some(url.into()),
            error_message: None,
        }
    }

    /// Failed result carrying a human-readable message. Transport detail
    /// belongs in the log, not here.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_url: None,
            error_message: Some(message.into()),
        }
    }

    /// Failed result derived from an internal error classification.
    pub fn from_error(error: &PaymentError) -> Self {
        Self::failed(error.to_string())
    }
}

/// Outcome of validating an inbound payment notification.
///
/// `success == true` guarantees both that the signature verified and that
/// the provider status code reported completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub order_id: String,
    pub amount: u64,
    pub transaction_id: String,
    pub gateway: ProviderId,
    pub paid_at: Option<DateTime<Utc>>,
    pub message: String,
    /// Complete set of fields received on the notify endpoint.
    pub raw_data: CallbackFields,
}

impl PaymentResult {
    /// Completed payment with verified, provider-reported details.
    pub fn completed(
        gateway: ProviderId,
        order_id: impl Into<String>,
        amount: u64,
        transaction_id: impl Into<String>,
        paid_at: Option<DateTime<Utc>>,
        raw_data: CallbackFields,
    ) -> Self {
        Self {
            success: true,
            order_id: order_id.into(),
            amount,
            transaction_id: transaction_id.into(),
            gateway,
            paid_at,
            message: "payment completed".to_string(),
            raw_data,
        }
    }

    /// Rejected notification. Order/transaction identifiers are left empty
    /// when the payload cannot be trusted (signature mismatch).
    pub fn rejected(gateway: ProviderId, error: &PaymentError, raw_data: CallbackFields) -> Self {
        Self {
            success: false,
            order_id: String::new(),
            amount: 0,
            transaction_id: String::new(),
            gateway,
            paid_at: None,
            message: error.to_string(),
            raw_data,
        }
    }

    /// Signature verified but the provider reported a non-success status.
    /// Identifiers from the payload are trustworthy and kept.
    pub fn not_completed(
        gateway: ProviderId,
        order_id: impl Into<String>,
        error: &PaymentError,
        raw_data: CallbackFields,
    ) -> Self {
        Self {
            success: false,
            order_id: order_id.into(),
            amount: 0,
            transaction_id: String::new(),
            gateway,
            paid_at: None,
            message: error.to_string(),
            raw_data,
        }
    }
}
