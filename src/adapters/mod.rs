//! Adapters - concrete gateway implementations of the ports.

mod mock_gateway;
pub mod momo;
pub mod vnpay;

pub use mock_gateway::MockPaymentGateway;
pub use momo::{MomoGateway, MomoGatewayConfig};
pub use vnpay::{VnpayGateway, VnpayGatewayConfig};
