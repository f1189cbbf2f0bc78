//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - one implementation per payment provider, covering
//!   outbound URL creation and inbound callback validation.

mod payment_gateway;

pub use payment_gateway::PaymentGateway;
