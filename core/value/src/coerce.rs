//! JavaScript-compatible unary coercions (§4.2). Each function is total:
//! every [`Value`] variant maps to *some* output, never a panic.

use crate::{json_scan, Value};

/// `i64` clamp thresholds: beyond `2^53 - 1` in magnitude, floor/ceil
/// toward zero is replaced by saturation at these edges rather than the
/// true `i64::MIN`/`MAX`, matching the reference implementation's constants
/// exactly (§4.2).
const I64_SAFE_MAGNITUDE: f64 = 9_007_199_254_740_991.0;
const I64_CLAMP_MAX: f64 = 9_223_372_036_854_774_784.0;
const I64_CLAMP_MIN: f64 = -9_223_372_036_854_774_784.0;
const U64_CLAMP_MAX: f64 = 18_446_744_073_709_549_568.0;

/// Parses a JS-style numeric string: optional leading/trailing whitespace,
/// `Infinity`/`-Infinity`/`+Infinity`, or a standard float literal. Anything
/// else is `NaN`, matching `strtod`-then-fail semantics.
fn parse_numeric_str(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// Coerces one raw JSON token's text (not a container) to a number, the way
/// `to_f64` would coerce the equivalent materialized [`Value`].
fn json_scalar_to_f64(elem: &str) -> f64 {
    let t = elem.trim();
    match t {
        "true" => 1.0,
        "false" | "null" => 0.0,
        _ if t.starts_with('"') && t.ends_with('"') && t.len() >= 2 => {
            json_scan::unescape_simple(&t[1..t.len() - 1])
                .map_or(f64::NAN, |s| parse_numeric_str(&s))
        }
        _ if json_scan::is_array(t) || json_scan::is_object(t) => f64::NAN,
        _ => parse_numeric_str(t),
    }
}

#[must_use]
pub fn to_f64(value: &Value<'_>) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        #[allow(clippy::cast_precision_loss)]
        Value::Float(n) => *n,
        #[allow(clippy::cast_precision_loss)]
        Value::Int(n) => *n as f64,
        #[allow(clippy::cast_precision_loss)]
        Value::UInt(n) => *n as f64,
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items {
            [] => 0.0,
            [only] => to_f64(only),
            _ => f64::NAN,
        },
        Value::Json(raw) => {
            if json_scan::is_array(raw) {
                match json_scan::first_array_element(raw) {
                    Some(elem) => json_scalar_to_f64(elem),
                    None => 0.0,
                }
            } else {
                f64::NAN
            }
        }
        Value::Object(_) | Value::Function(_) => f64::NAN,
    }
}

#[must_use]
pub fn to_i64(value: &Value<'_>) -> i64 {
    match value {
        Value::Int(n) => *n,
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        #[allow(clippy::cast_possible_truncation)]
        Value::UInt(n) => *n as i64,
        other => float_to_i64(to_f64(other)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_i64(n: f64) -> i64 {
    if n.is_nan() {
        return 0;
    }
    if n.abs() <= I64_SAFE_MAGNITUDE {
        return n as i64;
    }
    let truncated = if n.is_sign_positive() { n.floor() } else { n.ceil() };
    let clamped = truncated.clamp(I64_CLAMP_MIN, I64_CLAMP_MAX);
    clamped as i64
}

#[must_use]
pub fn to_u64(value: &Value<'_>) -> u64 {
    match value {
        Value::UInt(n) => *n,
        Value::Null => 0,
        Value::Bool(b) => u64::from(*b),
        #[allow(clippy::cast_sign_loss)]
        Value::Int(n) if *n >= 0 => *n as u64,
        Value::Int(_) => 0,
        other => float_to_u64(to_f64(other)),
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn float_to_u64(n: f64) -> u64 {
    if n.is_nan() || n < 0.0 {
        return 0;
    }
    let clamped = n.min(U64_CLAMP_MAX);
    clamped as u64
}

#[must_use]
pub fn to_bool(value: &Value<'_>) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Float(n) => !(*n == 0.0 || n.is_nan()),
        Value::Int(n) => *n != 0,
        Value::UInt(n) => *n != 0,
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Json(_) | Value::Object(_) | Value::Function(_) => true,
    }
}
