//! Deterministic trace identifiers
//!
//! Uses SHA-256 for deterministic cross-platform hashing. The digest input is:
//! `name || key_1 || display(value_1) || ... || key_n || display(value_n)`
//! with keys in ascending byte order. The identifier is
//! `"<name>-<hex of first 8 digest bytes>"`.
//!
//! Only the display text of each value is hashed, not its kind tag, so
//! `Int(10)` and `String("10")` under the same key produce the same
//! identifier. Timestamps never take part.

use reckon_core::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Number of digest bytes kept in an identifier
pub const ID_DIGEST_PREFIX_LEN: usize = 8;

/// Derive the identifier for a trace name and its inputs
///
/// Pure and total. `BTreeMap` iteration order is ascending byte-wise key
/// order, so the result does not depend on how the inputs were collected.
pub fn derive_id(name: &str, inputs: &BTreeMap<String, Value>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());

    for (key, value) in inputs {
        hasher.update(key.as_bytes());
        hasher.update(value.data().to_string().as_bytes());
    }

    let digest = hasher.finalize();
    let hex: String = digest[..ID_DIGEST_PREFIX_LEN]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("{}-{}", name, hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_id_format() {
        let id = derive_id("sum", &inputs(&[("a", Value::wrap(1))]));
        let (name, hex) = id.rsplit_once('-').unwrap();
        assert_eq!(name, "sum");
        assert_eq!(hex.len(), ID_DIGEST_PREFIX_LEN * 2);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_id_determinism() {
        let a = derive_id("test", &inputs(&[("a", Value::wrap(1)), ("b", Value::wrap(2))]));
        let b = derive_id("test", &inputs(&[("b", Value::wrap(2)), ("a", Value::wrap(1))]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_differs_for_different_inputs() {
        let base = derive_id("test", &inputs(&[("a", Value::wrap(1))]));

        // Different value
        assert_ne!(base, derive_id("test", &inputs(&[("a", Value::wrap(2))])));
        // Different key
        assert_ne!(base, derive_id("test", &inputs(&[("b", Value::wrap(1))])));
        // Different name
        assert_ne!(base, derive_id("other", &inputs(&[("a", Value::wrap(1))])));
        // Extra input
        assert_ne!(
            base,
            derive_id("test", &inputs(&[("a", Value::wrap(1)), ("b", Value::wrap(1))]))
        );
    }

    #[test]
    fn test_id_ignores_kind_tag() {
        let int = derive_id("t", &inputs(&[("x", Value::wrap(10))]));
        let text = derive_id("t", &inputs(&[("x", Value::wrap("10"))]));
        assert_eq!(int, text);
    }

    #[test]
    fn test_empty_name_and_inputs() {
        let id = derive_id("", &BTreeMap::new());
        assert!(id.starts_with('-'));
        assert_eq!(id.len(), 1 + ID_DIGEST_PREFIX_LEN * 2);
        assert_ne!(id, derive_id("x", &BTreeMap::new()));
    }

    #[test]
    fn test_known_digest() {
        // SHA-256("test") = 9f86d081884c7d65...
        assert_eq!(derive_id("test", &BTreeMap::new()), "test-9f86d081884c7d65");
    }
}
