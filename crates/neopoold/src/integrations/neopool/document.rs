//! Telemetry document parsing and dotted-path resolution.
//!
//! The controller publishes one JSON document per telemetry message. Entities
//! address individual fields with dotted paths like `NeoPool.pH.Data`; a
//! segment consisting only of decimal digits indexes into an array, so
//! `NeoPool.Relay.State.1` reads the second relay state.
//!
//! Absence is the common case, not an error: a missing key, an out-of-range
//! index, or a path descending into a scalar all resolve to `None` without
//! complaint. Callers treat `None` as "no update".

use serde_json::Value;

/// Parse a raw payload into a telemetry document.
///
/// Malformed JSON is dropped silently; the controller occasionally emits
/// partial frames on reconnect.
pub fn parse_payload(payload: &[u8]) -> Option<Value> {
    serde_json::from_slice(payload).ok()
}

/// Resolve a dotted path against a telemetry document.
///
/// Returns the terminal node unmodified, or `None` the moment a segment
/// cannot be applied. A JSON `null` terminal also resolves to `None` so that
/// explicit nulls read as absent.
pub fn resolve_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;

    for segment in path.split('.') {
        current = match parse_index(segment) {
            Some(index) => match current {
                Value::Array(items) => items.get(index)?,
                _ => return None,
            },
            None => match current {
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            },
        };
    }

    if current.is_null() { None } else { Some(current) }
}

/// A path segment is an index only when it is entirely decimal digits.
fn parse_index(segment: &str) -> Option<usize> {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}
