//! Arena-aware projection over a [`jexpr_value::json_scan`] fragment: turns
//! a member or index access on a `Value::Json` into a proper `Value`,
//! materializing scalars and re-wrapping nested containers as fresh `Json`
//! slices rather than parsing the whole document (§4.6A).

use jexpr_arena::Arena;
use jexpr_value::json_scan;
use jexpr_value::{Error, Value};

/// Looks up `key` on a JSON fragment. `key` also accepts a decimal index
/// into a JSON array (`[expr]` access stringifies its key the same way a
/// member name would be looked up). A miss yields `Undefined` without
/// consulting the host `ref` callback, matching the member-access contract.
#[tracing::instrument(level = "trace", skip(arena, raw))]
pub fn access<'a>(arena: &'a Arena, raw: &'a str, key: &str) -> Result<Value<'a>, Error<'a>> {
    let found = if json_scan::is_array(raw) {
        key.parse::<usize>().ok().and_then(|idx| json_scan::array_element(raw, idx))
    } else if json_scan::is_object(raw) {
        json_scan::object_member(raw, key)
    } else {
        None
    };
    match found {
        Some(text) => materialize(arena, text),
        None => Ok(Value::Undefined),
    }
}

/// Turns one JSON token's raw text into a `Value`: scalars are decoded in
/// place, containers are kept as a lazily-scanned `Json` slice.
pub fn materialize<'a>(arena: &'a Arena, text: &'a str) -> Result<Value<'a>, Error<'a>> {
    let t = text.trim();
    match t.as_bytes().first() {
        Some(b'{' | b'[') => Ok(Value::Json(t)),
        Some(b'"') => {
            let body = &t[1..t.len() - 1];
            let decoded = if body.contains('\\') {
                let unescaped = json_scan::unescape_simple(body).ok_or_else(Error::syntax)?;
                arena.alloc_str(&unescaped).ok_or_else(Error::out_of_memory)?
            } else {
                arena.alloc_str(body).ok_or_else(Error::out_of_memory)?
            };
            Ok(Value::String(decoded))
        }
        Some(b't') if t == "true" => Ok(Value::Bool(true)),
        Some(b'f') if t == "false" => Ok(Value::Bool(false)),
        Some(b'n') if t == "null" => Ok(Value::Null),
        _ => t.parse::<f64>().map(Value::Float).map_err(|_| Error::syntax()),
    }
}
