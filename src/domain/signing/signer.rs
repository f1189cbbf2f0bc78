//! HMAC digest computation and callback verification.
//!
//! Pure functions over their inputs: no clock, no randomness, no I/O, and
//! no logging of secrets. Empty secrets are rejected at configuration time
//! before any of this code runs.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use super::canonical::{canonical_string, FieldOrdering};

/// Digest algorithm, selected per provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Sha256,
    Sha512,
}

/// Compute the lowercase hex HMAC digest of `canonical` under `secret`.
pub fn sign_hex(canonical: &str, secret: &[u8], algorithm: HmacAlgorithm) -> String {
    match algorithm {
        HmacAlgorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key length");
            mac.update(canonical.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HmacAlgorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(secret).expect("HMAC accepts any key length");
            mac.update(canonical.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
    }
}

/// Recompute the digest over the received fields and compare it to the
/// digest the provider supplied.
///
/// `excluded_keys` names the fields the provider leaves out of its own
/// signature - at minimum the signature field itself. The comparison is
/// constant-time and case-insensitive on the hex digits, since providers
/// differ in digest casing.
pub fn verify_fields(
    fields: &[(String, String)],
    provided_hex: &str,
    secret: &[u8],
    algorithm: HmacAlgorithm,
    ordering: FieldOrdering,
    excluded_keys: &[&str],
) -> bool {
    let signed: Vec<(String, String)> = fields
        .iter()
        .filter(|(key, _)| !excluded_keys.contains(&key.as_str()))
        .cloned()
        .collect();

    let canonical = canonical_string(&signed, ordering);
    let expected = sign_hex(&canonical, secret, algorithm);
    digest_eq(&expected, provided_hex)
}

/// Constant-time comparison of two hex digests, case-insensitive.
///
/// The length check is not constant-time; digest length is public
/// information determined by the algorithm.
fn digest_eq(expected_hex: &str, provided_hex: &str) -> bool {
    let provided = provided_hex.to_ascii_lowercase();
    let a = expected_hex.as_bytes();
    let b = provided.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &[u8] = b"etKS3V8QdcrWHLwrqF8TUbNehJpJM8nB";

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ══════════════════════════════════════════════════════════════
    // Determinism
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn sign_is_deterministic() {
        let canonical = "amount=50000&orderId=ORD-1";
        let first = sign_hex(canonical, SECRET, HmacAlgorithm::Sha256);
        let second = sign_hex(canonical, SECRET, HmacAlgorithm::Sha256);
        assert_eq!(first, second);
    }

    #[test]
    fn sha256_digest_is_64_hex_chars() {
        let digest = sign_hex("a=1", SECRET, HmacAlgorithm::Sha256);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sha512_digest_is_128_hex_chars() {
        let digest = sign_hex("a=1", SECRET, HmacAlgorithm::Sha512);
        assert_eq!(digest.len(), 128);
    }

    #[test]
    fn algorithms_produce_different_digests() {
        let canonical = "a=1&b=2";
        assert_ne!(
            sign_hex(canonical, SECRET, HmacAlgorithm::Sha256),
            sign_hex(canonical, SECRET, HmacAlgorithm::Sha512)
        );
    }

    #[test]
    fn different_secrets_produce_different_digests() {
        let canonical = "a=1&b=2";
        assert_ne!(
            sign_hex(canonical, SECRET, HmacAlgorithm::Sha256),
            sign_hex(canonical, b"other-secret", HmacAlgorithm::Sha256)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Verification
    // ══════════════════════════════════════════════════════════════

    fn sign_fields(fields: &[(String, String)], ordering: FieldOrdering) -> String {
        sign_hex(
            &canonical_string(fields, ordering),
            SECRET,
            HmacAlgorithm::Sha256,
        )
    }

    #[test]
    fn round_trip_verifies() {
        let fields = pairs(&[("amount", "50000"), ("orderId", "ORD-1")]);
        let digest = sign_fields(&fields, FieldOrdering::Ordinal);

        assert!(verify_fields(
            &fields,
            &digest,
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    #[test]
    fn verification_excludes_the_signature_field() {
        let mut fields = pairs(&[("amount", "50000"), ("orderId", "ORD-1")]);
        let digest = sign_fields(&fields, FieldOrdering::Ordinal);
        fields.push(("signature".to_string(), digest.clone()));

        assert!(verify_fields(
            &fields,
            &digest,
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &["signature"],
        ));
    }

    #[test]
    fn tampered_field_fails_verification() {
        let fields = pairs(&[("amount", "50000"), ("orderId", "ORD-1")]);
        let digest = sign_fields(&fields, FieldOrdering::Ordinal);

        let tampered = pairs(&[("amount", "1"), ("orderId", "ORD-1")]);
        assert!(!verify_fields(
            &tampered,
            &digest,
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    #[test]
    fn wrong_ordering_strategy_fails_verification() {
        const SEQUENCE: &[&str] = &["orderId", "amount"];
        let fields = pairs(&[("amount", "50000"), ("orderId", "ORD-1")]);
        let digest = sign_fields(&fields, FieldOrdering::Explicit(SEQUENCE));

        // Signed with the explicit sequence, verified with ordinal sort.
        assert!(!verify_fields(
            &fields,
            &digest,
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    #[test]
    fn uppercase_digest_verifies() {
        let fields = pairs(&[("amount", "50000")]);
        let digest = sign_fields(&fields, FieldOrdering::Ordinal).to_uppercase();

        assert!(verify_fields(
            &fields,
            &digest,
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    #[test]
    fn non_hex_digest_fails_without_panicking() {
        let fields = pairs(&[("amount", "50000")]);
        assert!(!verify_fields(
            &fields,
            "not-a-digest",
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    #[test]
    fn truncated_digest_fails() {
        let fields = pairs(&[("amount", "50000")]);
        let digest = sign_fields(&fields, FieldOrdering::Ordinal);
        assert!(!verify_fields(
            &fields,
            &digest[..32],
            SECRET,
            HmacAlgorithm::Sha256,
            FieldOrdering::Ordinal,
            &[],
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn prop_sign_then_verify_holds(
            values in proptest::collection::vec("[a-zA-Z0-9._-]{1,16}", 1..8)
        ) {
            // Index-prefixed keys keep the field set free of duplicates.
            let fields: Vec<(String, String)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{i:02}"), v.clone()))
                .collect();

            let digest = sign_fields(&fields, FieldOrdering::Ordinal);
            prop_assert!(verify_fields(
                &fields,
                &digest,
                SECRET,
                HmacAlgorithm::Sha256,
                FieldOrdering::Ordinal,
                &[],
            ));
        }

        #[test]
        fn prop_any_single_field_change_breaks_verification(
            values in proptest::collection::vec("[a-zA-Z0-9._-]{1,16}", 1..8),
            target in 0usize..8,
        ) {
            let fields: Vec<(String, String)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{i:02}"), v.clone()))
                .collect();
            let digest = sign_fields(&fields, FieldOrdering::Ordinal);

            let mut tampered = fields.clone();
            let idx = target % tampered.len();
            tampered[idx].1.push('x');

            prop_assert!(!verify_fields(
                &tampered,
                &digest,
                SECRET,
                HmacAlgorithm::Sha256,
                FieldOrdering::Ordinal,
                &[],
            ));
        }
    }
}
