//! Application layer - wiring gateways behind one resolution surface.

mod gateway_registry;

pub use gateway_registry::GatewayRegistry;
