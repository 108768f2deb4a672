//! `Display for Value` (§4.7).

use crate::Value;
use std::fmt;

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(n) => write_float(f, *n),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Json(raw) => f.write_str(raw),
            Self::Object(_) => f.write_str("[Object]"),
            Self::Function(_) => f.write_str("[Function]"),
        }
    }
}

/// Ryū-style shortest round-trip decimal, with JavaScript's special-case
/// spellings for the three values it doesn't hand to the float formatter.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        let mut buf = ryu_js::Buffer::new();
        f.write_str(buf.format(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_floats_use_js_spellings() {
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn integers_render_as_plain_decimal() {
        assert_eq!(Value::Int(-9223372036854775807).to_string(), "-9223372036854775807");
        assert_eq!(Value::UInt(18446744073709551615).to_string(), "18446744073709551615");
    }

    #[test]
    fn array_joins_with_comma() {
        let items = [Value::Int(1), Value::Bool(true), Value::Null];
        assert_eq!(Value::Array(&items).to_string(), "1,true,null");
    }

    #[test]
    fn booleans_and_nullish_render_lowercase() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
