//! Provider identifiers and locale selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::PaymentError;

/// The finite set of supported payment providers.
///
/// Adding a provider means adding a variant here; every `match` over this
/// enum is exhaustive, so the compiler points at each site that needs the
/// new gateway wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// MoMo e-wallet (remote link issuance via server-to-server call).
    Momo,
    /// VNPay hosted checkout (locally constructed redirect URL).
    Vnpay,
}

impl ProviderId {
    /// Canonical lowercase key used in configuration and callback routing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Momo => "momo",
            ProviderId::Vnpay => "vnpay",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = PaymentError;

    /// Case-insensitive lookup. Unknown keys are a configuration error,
    /// never a silently defaulted gateway.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "momo" => Ok(ProviderId::Momo),
            "vnpay" => Ok(ProviderId::Vnpay),
            other => Err(PaymentError::Configuration(format!(
                "unknown payment provider: {other}"
            ))),
        }
    }
}

/// Checkout page locale requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Vi,
    En,
}

impl Language {
    /// Locale code in MoMo's wire format.
    pub fn momo_code(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    /// Locale code in VNPay's wire format (`vn`, not `vi`).
    pub fn vnpay_code(&self) -> &'static str {
        match self {
            Language::Vi => "vn",
            Language::En => "en",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Vi
    }
}
