//! Gateway registry: provider key to gateway resolution.
//!
//! Built once at startup from validated configuration and shared across
//! concurrent requests. Holds no per-request state and performs no I/O.

use std::sync::Arc;

use crate::adapters::{MomoGateway, MomoGatewayConfig, VnpayGateway, VnpayGatewayConfig};
use crate::config::GatewayConfig;
use crate::domain::payment::{PaymentError, ProviderId};
use crate::ports::PaymentGateway;

/// Registry mapping the finite provider set to live gateway instances.
#[derive(Debug)]
pub struct GatewayRegistry {
    momo: Arc<dyn PaymentGateway>,
    vnpay: Arc<dyn PaymentGateway>,
}

impl GatewayRegistry {
    /// Build all gateways from configuration.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Configuration` when the configuration fails
    /// validation (missing merchant code or signing secret). A registry
    /// can therefore never hold a gateway that would emit unsigned
    /// requests.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, PaymentError> {
        config
            .validate()
            .map_err(|err| PaymentError::Configuration(err.to_string()))?;

        Ok(Self {
            momo: Arc::new(MomoGateway::new(MomoGatewayConfig::from_config(
                &config.momo,
                &config.http,
            ))),
            vnpay: Arc::new(VnpayGateway::new(VnpayGatewayConfig::from_config(
                &config.vnpay,
            ))),
        })
    }

    /// Build a registry from pre-constructed gateways (tests, custom
    /// wiring).
    pub fn with_gateways(
        momo: Arc<dyn PaymentGateway>,
        vnpay: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { momo, vnpay }
    }

    /// Resolve a provider key, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Configuration` for unknown keys; an unknown
    /// provider is a programming/config mistake, never a runtime payment
    /// failure and never a silently defaulted gateway.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn PaymentGateway>, PaymentError> {
        let id: ProviderId = key.parse()?;
        Ok(self.gateway(id))
    }

    /// Fetch the gateway for a known provider. Exhaustive over the enum,
    /// so a new provider variant fails compilation here until wired in.
    pub fn gateway(&self, id: ProviderId) -> Arc<dyn PaymentGateway> {
        match id {
            ProviderId::Momo => Arc::clone(&self.momo),
            ProviderId::Vnpay => Arc::clone(&self.vnpay),
        }
    }
}
