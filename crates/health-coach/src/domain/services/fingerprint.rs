//! Fingerprint - Deterministic cache keys for request payloads
//!
//! The payload is rendered as canonical JSON (object keys sorted at every
//! depth, no insignificant whitespace) and hashed with SHA-256. Equal payloads
//! produce equal keys no matter how their keys were ordered.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::errors::DomainError;

/// Fingerprint any serializable payload as lowercase hex.
pub fn fingerprint<T: Serialize>(payload: &T) -> Result<String, DomainError> {
    let value = serde_json::to_value(payload)
        .map_err(|e| DomainError::Unexpected(format!("Failed to serialize payload: {e}")))?;
    Ok(fingerprint_value(&value))
}

/// Fingerprint an already-parsed JSON value as lowercase hex.
pub fn fingerprint_value(value: &Value) -> String {
    let mut canonical = String::new();
    write_canonical(value, &mut canonical);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
