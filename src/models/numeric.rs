//! Safe numeric coercion
//!
//! Snapshot records arrive loosely typed: amounts may be JSON numbers,
//! strings like `"1,250.00"`, `null`, or missing entirely. Everything numeric
//! in the crate passes through this module so that there is exactly one
//! coercion rule and one rounding policy.
//!
//! Coercion never fails. Anything that does not read as a finite number
//! becomes `0.0`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Currency symbols stripped from the front of numeric strings
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₱'];

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round half toward positive infinity
///
/// `2.5 -> 3`, `-2.5 -> -2`. This is the rounding used for every percentage
/// and bucket in the crate.
pub fn round_half_up(value: f64) -> f64 {
    finite_or_zero((value + 0.5).floor())
}

/// Divide, returning zero when the divisor is zero or the result is not finite
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Coerce an arbitrary JSON value to a finite number
pub fn coerce(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(s) => parse_str(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// Parse a numeric string leniently
///
/// Accepts surrounding whitespace, a leading sign, one currency symbol and
/// thousands separators: `" -$1,250.50 "` parses as `-1250.5`. Empty or
/// unreadable text is zero.
pub fn parse_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let rest = rest.trim_start_matches(CURRENCY_SYMBOLS);
    let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(v) if negative => finite_or_zero(-v),
        Ok(v) => finite_or_zero(v),
        Err(_) => 0.0,
    }
}

/// Serde adapter for numeric fields that must never fail to load
///
/// Use together with `#[serde(default)]` so missing fields also become zero.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

/// Serde adapter for text fields that may arrive as numbers or `null`
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).unwrap_or_default())
}

/// Serde adapter for optional text fields; blank strings become `None`
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).filter(|s| !s.trim().is_empty()))
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
