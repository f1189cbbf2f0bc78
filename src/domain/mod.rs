//! Domain layer - payment types, signing, and text sanitization.
//!
//! Everything here is pure: no I/O, no shared mutable state. Gateways
//! (adapters) compose these building blocks per provider.

pub mod payment;
pub mod sanitize;
pub mod signing;
