//! Failure classification shared by all gateway variants.
//!
//! Configuration errors are fatal and raised at construction/lookup time.
//! Everything else is folded into a failed result at the gateway boundary;
//! no error value or panic crosses `PaymentGateway` in normal operation.

use thiserror::Error;

/// Errors raised by the payment gateway core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Missing secret/merchant code or unknown provider key. Fatal; a
    /// programming or deployment mistake, not a runtime payment failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// DNS/timeout/connection failure while calling a provider API.
    #[error("transport error: {0}")]
    Transport(String),

    /// Well-formed provider response reporting a non-success result code.
    #[error("provider error {code}: {message}")]
    Provider { code: String, message: String },

    /// Callback signature did not match the recomputed digest. Treated as a
    /// security event; no other field in the payload is trusted.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Unparseable response body or a response missing an expected field.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Required callback field absent from the notification payload.
    #[error("missing callback field: {0}")]
    MissingField(&'static str),

    /// Operation not implemented for this provider.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl PaymentError {
    /// Create a provider-reported failure.
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    /// True for failures the caller may safely retry with the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Transport(_))
    }

    /// True for failures that indicate tampering or misdelivery rather than
    /// a payment-domain outcome.
    pub fn is_security_event(&self) -> bool {
        matches!(self, PaymentError::SignatureMismatch)
    }
}
