//! Deterministic `key=value&...` canonical string construction.

/// How a provider orders fields inside its canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrdering {
    /// Keys sorted by byte (ASCII ordinal) comparison.
    Ordinal,
    /// A fixed, hand-specified sequence. Fields not named in the sequence
    /// are excluded from signing even when present in the payload.
    Explicit(&'static [&'static str]),
}

/// Build the canonical string for `fields` under the given ordering.
///
/// Pairs are rendered as `key=value` joined by `&`. Fields with an empty
/// value are omitted entirely, not rendered as `key=`. The result is
/// byte-exact for fixed inputs; any deviation invalidates the signature
/// downstream.
pub fn canonical_string(fields: &[(String, String)], ordering: FieldOrdering) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(fields.len());

    match ordering {
        FieldOrdering::Ordinal => {
            let mut sorted: Vec<&(String, String)> =
                fields.iter().filter(|(_, v)| !v.is_empty()).collect();
            sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            for (key, value) in sorted {
                parts.push(format!("{key}={value}"));
            }
        }
        FieldOrdering::Explicit(sequence) => {
            for key in sequence {
                if let Some((_, value)) = fields.iter().find(|(k, _)| k.as_str() == *key) {
                    if !value.is_empty() {
                        parts.push(format!("{key}={value}"));
                    }
                }
            }
        }
    }

    parts.join("&")
}
