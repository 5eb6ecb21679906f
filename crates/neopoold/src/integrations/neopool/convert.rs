//! Coercion helpers for raw telemetry values.
//!
//! Telemetry fields arrive as whatever JSON type the controller firmware
//! chose that day: numbers, numeric strings, booleans. Every function here is
//! total — failures surface as `None` (or a decided default), never a panic —
//! and callers supply their own fallback with `unwrap_or` where one applies.

use serde_json::Value;

/// Coerce a telemetry value to a float.
///
/// Accepts numbers, numeric strings, and booleans (0.0 / 1.0).
pub fn safe_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Coerce a telemetry value to an integer, truncating toward zero.
///
/// Float-like strings truncate: `"3.9"` becomes `3`.
pub fn safe_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Strict two-valued decode of a bit field.
///
/// `"1"` / `1` / `true` map to `true`, `"0"` / `0` / `false` map to `false`,
/// anything else is ambiguous and maps to `None` rather than a default.
pub fn bit_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Lenient boolean decode that is always decided.
///
/// Anything coercible to an integer greater than zero is `true`; zero,
/// negative, and uncoercible values are `false`. Used where "no value" must
/// still read as off.
pub fn int_to_bool(value: &Value) -> bool {
    safe_int(value).is_some_and(|i| i > 0)
}

/// Bound a value to `[lo, hi]`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Parse the controller's runtime format `"<days>T<hours>:<minutes>:<seconds>"`
/// into fractional hours.
///
/// Any structural mismatch — missing `T`, a time part without exactly three
/// fields, non-numeric components — yields `None`.
pub fn parse_runtime_duration(text: &str) -> Option<f64> {
    let (days, time) = text.split_once('T')?;
    let days: u32 = days.parse().ok()?;

    let mut fields = time.split(':');
    let hours: u32 = fields.next()?.parse().ok()?;
    let minutes: u32 = fields.next()?.parse().ok()?;
    let seconds: u32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    Some(
        f64::from(days) * 24.0
            + f64::from(hours)
            + f64::from(minutes) / 60.0
            + f64::from(seconds) / 3600.0,
    )
}

/// Reverse lookup in a small ordered value table.
///
/// Returns the first key whose label matches. Which duplicate wins on a table
/// with repeated labels is intentionally unspecified beyond "first in table
/// order", which keeps the result deterministic.
pub fn lookup_by_value<K: Copy>(table: &[(K, &str)], label: &str) -> Option<K> {
    table
        .iter()
        .find(|(_, candidate)| *candidate == label)
        .map(|(key, _)| *key)
}

/// Forward lookup in a small ordered value table.
pub fn label_for<'a, K: PartialEq>(table: &'a [(K, &'a str)], key: &K) -> Option<&'a str> {
    table
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, label)| *label)
}

/// Whether a controller identity field holds a usable node id.
///
/// The power unit reports `hidden` / `hidden_by_default` when the id has been
/// administratively suppressed; those and empty values are unusable.
pub fn validate_nodeid(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(s) => {
            !s.is_empty()
                && !s.eq_ignore_ascii_case("hidden")
                && !s.eq_ignore_ascii_case("hidden_by_default")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_float() {
        assert_eq!(safe_float(&json!(3.14)), Some(3.14));
        assert_eq!(safe_float(&json!(5)), Some(5.0));
        assert_eq!(safe_float(&json!("7.2")), Some(7.2));
        assert_eq!(safe_float(&json!(null)), None);
        assert_eq!(safe_float(&json!("invalid")), None);
        assert_eq!(safe_float(&json!("invalid")).unwrap_or(-1.0), -1.0);
    }

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(&json!(42)), Some(42));
        assert_eq!(safe_int(&json!(3.7)), Some(3));
        assert_eq!(safe_int(&json!("100")), Some(100));
        assert_eq!(safe_int(&json!("3.9")), Some(3));
        assert_eq!(safe_int(&json!(null)), None);
        assert_eq!(safe_int(&json!("invalid")), None);
        assert_eq!(safe_int(&json!("invalid")).unwrap_or(-1), -1);
    }

    #[test]
    fn test_bit_to_bool() {
        assert_eq!(bit_to_bool(&json!("1")), Some(true));
        assert_eq!(bit_to_bool(&json!("0")), Some(false));
        assert_eq!(bit_to_bool(&json!(1)), Some(true));
        assert_eq!(bit_to_bool(&json!(0)), Some(false));
        assert_eq!(bit_to_bool(&json!(true)), Some(true));
        assert_eq!(bit_to_bool(&json!(2)), None);
        assert_eq!(bit_to_bool(&json!("2")), None);
        assert_eq!(bit_to_bool(&json!("yes")), None);
    }

    #[test]
    fn test_int_to_bool() {
        assert!(int_to_bool(&json!(1)));
        assert!(int_to_bool(&json!(5)));
        assert!(int_to_bool(&json!(100)));
        assert!(int_to_bool(&json!("5")));
        assert!(!int_to_bool(&json!(0)));
        assert!(!int_to_bool(&json!(-1)));
        assert!(!int_to_bool(&json!("0")));
        assert!(!int_to_bool(&json!("invalid")));
        assert!(!int_to_bool(&json!(null)));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_parse_runtime_duration() {
        // 123 days, 4 hours, 30 minutes = 123*24 + 4 + 0.5
        assert_eq!(parse_runtime_duration("123T04:30:00"), Some(2956.5));
        assert_eq!(parse_runtime_duration("0T00:00:00"), Some(0.0));
        assert_eq!(parse_runtime_duration("0T05:00:00"), Some(5.0));
        assert_eq!(parse_runtime_duration("10T00:00:00"), Some(240.0));

        let with_seconds = parse_runtime_duration("0T01:00:30").unwrap();
        assert!((with_seconds - 1.0083).abs() < 0.001);
    }

    #[test]
    fn test_parse_runtime_duration_invalid() {
        assert_eq!(parse_runtime_duration("123:04:30:00"), None);
        assert_eq!(parse_runtime_duration(""), None);
        assert_eq!(parse_runtime_duration("invalid"), None);
        assert_eq!(parse_runtime_duration("10Tinvalid"), None);
        assert_eq!(parse_runtime_duration("10T04:30"), None);
        assert_eq!(parse_runtime_duration("10T04:30:00:00"), None);
    }

    #[test]
    fn test_lookup_by_value() {
        let table: &[(i64, &str)] = &[(0, "Off"), (1, "On"), (2, "Auto")];
        assert_eq!(lookup_by_value(table, "On"), Some(1));
        assert_eq!(lookup_by_value(table, "Missing"), None);
        assert_eq!(lookup_by_value::<i64>(&[], "anything"), None);
    }

    #[test]
    fn test_lookup_by_value_first_match_wins() {
        let table: &[(i64, &str)] = &[(0, "Same"), (1, "Same")];
        assert_eq!(lookup_by_value(table, "Same"), Some(0));
    }

    #[test]
    fn test_label_for() {
        let table: &[(i64, &str)] = &[(0, "Off"), (1, "On")];
        assert_eq!(label_for(table, &1), Some("On"));
        assert_eq!(label_for(table, &9), None);
    }

    #[test]
    fn test_validate_nodeid() {
        assert!(validate_nodeid(Some("ABC123")));
        assert!(validate_nodeid(Some("12345")));
        assert!(validate_nodeid(Some("node-1")));
        assert!(!validate_nodeid(None));
        assert!(!validate_nodeid(Some("")));
        assert!(!validate_nodeid(Some("hidden")));
        assert!(!validate_nodeid(Some("Hidden")));
        assert!(!validate_nodeid(Some("HIDDEN")));
        assert!(!validate_nodeid(Some("hidden_by_default")));
        assert!(!validate_nodeid(Some("Hidden_By_Default")));
    }
}
