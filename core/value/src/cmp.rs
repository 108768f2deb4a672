//! Equality and ordering (§4.5).

use crate::{to_f64, Value, ValueKind};

fn same_orderable_kind(a: &Value<'_>, b: &Value<'_>) -> bool {
    matches!(
        (a.kind(), b.kind()),
        (ValueKind::Float, ValueKind::Float)
            | (ValueKind::Int, ValueKind::Int)
            | (ValueKind::UInt, ValueKind::UInt)
            | (ValueKind::String, ValueKind::String)
    )
}

/// `<` per §4.5: native ordering when both sides are the same orderable
/// kind, otherwise a numeric comparison via `to_f64`. NaN makes every
/// comparison false, matching IEEE-754 float ordering.
#[must_use]
pub fn less_than(a: &Value<'_>, b: &Value<'_>, no_case: bool) -> bool {
    if same_orderable_kind(a, b) {
        match (a, b) {
            (Value::Float(x), Value::Float(y)) => x < y,
            (Value::Int(x), Value::Int(y)) => x < y,
            (Value::UInt(x), Value::UInt(y)) => x < y,
            (Value::String(x), Value::String(y)) => {
                if no_case {
                    x.to_lowercase() < y.to_lowercase()
                } else {
                    x < y
                }
            }
            _ => unreachable!("same_orderable_kind guarantees a matching arm"),
        }
    } else {
        to_f64(a) < to_f64(b)
    }
}

/// `<=`, defined per §4.5 as `a<b || !(b<a)` rather than as an independent
/// comparison, so NaN propagates the documented IEEE-754-flavored quirk.
#[must_use]
pub fn less_or_equal(a: &Value<'_>, b: &Value<'_>, no_case: bool) -> bool {
    less_than(a, b, no_case) || !less_than(b, a, no_case)
}

/// Loose equality (`==`): ordering-equal when both sides share a kind,
/// otherwise both sides are coerced to `f64` and compared.
#[must_use]
pub fn loose_eq(a: &Value<'_>, b: &Value<'_>, no_case: bool) -> bool {
    if a.kind() == b.kind() {
        kind_matched_eq(a, b, no_case)
    } else {
        let (x, y) = (to_f64(a), to_f64(b));
        x == y
    }
}

fn kind_matched_eq(a: &Value<'_>, b: &Value<'_>, no_case: bool) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::UInt(x), Value::UInt(y)) => x == y,
        (Value::String(x), Value::String(y)) => {
            if no_case {
                x.to_lowercase() == y.to_lowercase()
            } else {
                x == y
            }
        }
        (Value::Json(x), Value::Json(y)) => x.trim() == y.trim(),
        (Value::Object(x), Value::Object(y)) => x == y,
        _ => !less_than(a, b, no_case) && !less_than(b, a, no_case),
    }
}

/// Strict equality (`===`): kinds must match, then loose equality applies.
#[must_use]
pub fn strict_eq(a: &Value<'_>, b: &Value<'_>, no_case: bool) -> bool {
    a.kind() == b.kind() && loose_eq(a, b, no_case)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_eq_cross_kind_uses_to_f64() {
        assert!(loose_eq(&Value::Int(1), &Value::String("1"), false));
        assert!(!loose_eq(&Value::Int(1), &Value::String("2"), false));
    }

    #[test]
    fn strict_eq_rejects_cross_kind() {
        assert!(!strict_eq(&Value::Int(1), &Value::Float(1.0), false));
        assert!(strict_eq(&Value::Int(1), &Value::Int(1), false));
    }

    #[test]
    fn string_ordering_respects_no_case() {
        assert!(less_than(&Value::String("HI"), &Value::String("hi"), false));
        assert!(!less_than(&Value::String("HI"), &Value::String("hi"), true));
    }

    #[test]
    fn nan_ordering_is_always_false() {
        let nan = Value::Float(f64::NAN);
        let one = Value::Float(1.0);
        assert!(!less_than(&nan, &one, false));
        assert!(!less_than(&one, &nan, false));
        assert!(!less_or_equal(&nan, &one, false));
    }
}
