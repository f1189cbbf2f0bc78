//! Payment gateway port.
//!
//! One implementation per provider. Two integration shapes exist and any
//! new provider must fit one of them:
//!
//! - **Remote link issuance**: a server-to-server call returns the redirect
//!   URL (MoMo).
//! - **Local URL construction**: the redirect URL is assembled and signed
//!   locally with no network round trip (VNPay).
//!
//! # Design
//!
//! - **No exceptions across the boundary**: both operations fold every
//!   failure (transport, provider-reported, signature, parse) into their
//!   result type. Callers branch on `success`, not on `Err`.
//! - **Stateless**: implementations hold only immutable configuration and
//!   are safe for unbounded concurrent invocation behind an `Arc`.

use async_trait::async_trait;

use crate::domain::payment::{CallbackFields, PaymentRequest, PaymentResult, PaymentUrlResult, ProviderId};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentGateway: std::fmt::Debug + Send + Sync {
    /// Which provider this gateway speaks for.
    fn provider(&self) -> ProviderId;

    /// Build the outbound payment redirect URL for one checkout attempt.
    ///
    /// Transport failures and provider-reported errors surface as a failed
    /// result with a human-readable message, never as a panic or a
    /// propagated exception.
    async fn create_payment_url(&self, request: &PaymentRequest) -> PaymentUrlResult;

    /// Validate an inbound payment notification (IPN).
    ///
    /// The signature is verified first, against the provider's own field
    /// ordering, before any status field is interpreted. A mismatch
    /// rejects the payload outright.
    async fn process_callback(&self, fields: &CallbackFields) -> PaymentResult;
}
