//! Paygate - Unified Payment Gateway Core
//!
//! This crate implements a provider-agnostic payment checkout core: building
//! provably-authentic payment redirect URLs and validating inbound payment
//! notifications (IPN) against provider HMAC signatures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
