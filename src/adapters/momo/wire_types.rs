//! MoMo wire format types.
//!
//! Field names follow MoMo's camelCase JSON contract exactly; the structs
//! exist so serialization mistakes show up as compile errors instead of
//! silent signature failures.

use serde::{Deserialize, Serialize};

/// Request body for the `captureMoMoWallet` transaction call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoCreateRequest {
    pub partner_code: String,
    pub access_key: String,
    pub request_id: String,
    /// Amount in VND as a decimal string, unscaled.
    pub amount: String,
    pub order_id: String,
    pub order_info: String,
    pub return_url: String,
    pub notify_url: String,
    pub extra_data: String,
    pub request_type: String,
    pub lang: String,
    /// HMAC-SHA256 over the signed field sequence, lowercase hex.
    pub signature: String,
}

/// Response body from the transaction call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoCreateResponse {
    /// 0 indicates the payment link was issued.
    pub error_code: i64,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub local_message: Option<String>,

    /// Redirect URL for the customer. Present iff `error_code == 0`.
    #[serde(default)]
    pub pay_url: Option<String>,

    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub order_id: Option<String>,
}
