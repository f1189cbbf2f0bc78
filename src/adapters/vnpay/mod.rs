//! VNPay hosted-checkout gateway adapter.
//!
//! Local URL construction: the redirect URL is assembled and signed
//! entirely in-process, with no network round trip. Callbacks (return URL
//! and IPN share the same field contract) are verified with HMAC-SHA512
//! over the ordinal-sorted, form-encoded parameter set.

mod vnpay_adapter;

pub use vnpay_adapter::{VnpayGateway, VnpayGatewayConfig};
