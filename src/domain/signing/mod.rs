//! Canonical string construction and HMAC request signing.
//!
//! Every provider defines its own canonical string: which fields are
//! signed, in what order, with what encoding. The ordering is therefore an
//! explicit parameter of every call here, never an assumption baked into
//! the signer.

mod canonical;
mod signer;

pub use canonical::{canonical_string, FieldOrdering};
pub use signer::{sign_hex, verify_fields, HmacAlgorithm};
