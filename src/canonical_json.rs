//! Deterministic JSON encoding used as the replay hash input.
//!
//! Object keys are sorted recursively and the result carries no
//! insignificant whitespace, matching Python's
//! `json.dumps(obj, sort_keys=True, separators=(",", ":"))` used by
//! `app/core/replay.py`. Every numeric value reaching this encoder is
//! expected to already be an integer — there is no float formatting path.

use serde_json::{Map, Value};

/// Recursively sort object keys and re-emit with no insignificant whitespace.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Canonicalize then serialize to the exact byte string hashed for the replay chain.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(&canonicalize(value)).expect("canonical JSON values always serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_nested_keys() {
        let value = json!({"b": 1, "a": {"z": 2, "y": 3}});
        let out = canonicalize(&value);
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"a":{"y":3,"z":2},"b":1}"#
        );
    }

    #[test]
    fn arrays_preserve_order() {
        let value = json!({"a": [3, 1, 2]});
        let out = canonicalize(&value);
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"a":[3,1,2]}"#);
    }

    #[test]
    fn bytes_have_no_whitespace() {
        let value = json!({"tick": 5});
        let bytes = canonical_bytes(&value);
        assert_eq!(bytes, br#"{"tick":5}"#);
    }
}
