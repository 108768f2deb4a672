//! Atom and chain evaluation (§4.6): literals, parenthesized groups, array
//! literals, identifiers, and the `.ident` / `?.ident` / `[expr]` / `(args)`
//! chain segments that may follow them.

use crate::ctx::Ctx;
use crate::json_probe;
use crate::ladder::{eval_comma, eval_ternary};
use crate::lexer::{
    is_ident_start, parse_string_body, read_group, scan_ident, skip_ws, split_top_level_commas,
};
use jexpr_value::{to_f64, Error, Value};

const RESERVED: &[&str] = &[
    "in",
    "new",
    "void",
    "await",
    "yield",
    "typeof",
    "function",
    "instanceof",
];

/// The factor level: strips any run of leading `+`/`-` sign characters,
/// evaluates the atom-plus-chain that follows, then folds the signs in —
/// an odd count of `-` negates the `to_f64` of the result, matching the
/// "leading signs fold into the literal" rule of §4.4/§9.
pub fn eval_factor<'a>(ctx: &Ctx<'a>, text: &'a str) -> Result<Value<'a>, Error<'a>> {
    let bytes = text.as_bytes();
    let mut i = skip_ws(bytes, 0);
    let mut minus_count = 0u32;
    let mut saw_sign = false;
    loop {
        match bytes.get(i) {
            Some(b'-') => {
                minus_count += 1;
                saw_sign = true;
                i = skip_ws(bytes, i + 1);
            }
            Some(b'+') => {
                saw_sign = true;
                i = skip_ws(bytes, i + 1);
            }
            Some(b'!') if bytes.get(i + 1) != Some(&b'=') => {
                return eval_not(ctx, &text[i + 1..]);
            }
            _ => break,
        }
    }
    let value = eval_atom_chain(ctx, text[i..].trim())?;
    if saw_sign {
        let n = to_f64(&value);
        Ok(Value::Float(if minus_count % 2 == 1 { -n } else { n }))
    } else {
        Ok(value)
    }
}

fn eval_not<'a>(ctx: &Ctx<'a>, rest: &'a str) -> Result<Value<'a>, Error<'a>> {
    let inner = eval_factor(ctx, rest)?;
    Ok(Value::Bool(!inner.to_bool()))
}

/// Parses a leading atom and then zero or more chain segments.
fn eval_atom_chain<'a>(ctx: &Ctx<'a>, text: &'a str) -> Result<Value<'a>, Error<'a>> {
    let (mut current, mut rest) = eval_leading_atom(ctx, text)?;
    let mut prev = Value::global_sentinel();
    let mut last_ident: Option<&'a str> = leading_ident(text, rest);

    loop {
        let bytes = rest.as_bytes();
        let i = skip_ws(bytes, 0);
        match bytes.get(i) {
            Some(b'?') if bytes.get(i + 1) == Some(&b'.') => {
                let ident_start = skip_ws(bytes, i + 2);
                if !bytes.get(ident_start).is_some_and(|&b| is_ident_start(b)) {
                    return Err(Error::syntax());
                }
                let ident_end = scan_ident(bytes, ident_start);
                let ident = &rest[ident_start..ident_end];
                let receiver = current;
                current = match member_access(ctx, receiver, ident, true) {
                    Ok(v) => v,
                    Err(e) if e.flags().contains(jexpr_value::ErrorFlags::UNDEFINED_IDENTIFIER) => {
                        Value::Undefined
                    }
                    Err(e) => return Err(e),
                };
                prev = receiver;
                last_ident = Some(ident);
                rest = &rest[ident_end..];
            }
            Some(b'.') => {
                let ident_start = skip_ws(bytes, i + 1);
                if !bytes.get(ident_start).is_some_and(|&b| is_ident_start(b)) {
                    return Err(Error::syntax());
                }
                let ident_end = scan_ident(bytes, ident_start);
                let ident = &rest[ident_start..ident_end];
                let receiver = current;
                current = member_access(ctx, receiver, ident, true)?;
                prev = receiver;
                last_ident = Some(ident);
                rest = &rest[ident_end..];
            }
            Some(b'[') => {
                let end = read_group(bytes, i).ok_or_else(Error::syntax)?;
                let inner = rest[i + 1..end - 1].trim();
                let _guard = ctx.depth.enter()?;
                let key_value = eval_comma(ctx, inner)?;
                let key = format!("{key_value}");
                let receiver = current;
                current = member_access(ctx, receiver, &key, true)?;
                prev = receiver;
                last_ident = None;
                rest = &rest[end..];
            }
            Some(b'(') => {
                let end = read_group(bytes, i).ok_or_else(Error::syntax)?;
                let inner = &rest[i + 1..end - 1];
                if !current.is_callable() {
                    return Err(Error::not_a_function(last_ident.unwrap_or("")));
                }
                let arg_texts = split_top_level_commas(inner);
                let mut args = Vec::with_capacity(arg_texts.len());
                for arg_text in arg_texts {
                    let _guard = ctx.depth.enter()?;
                    args.push(eval_ternary(ctx, arg_text)?);
                }
                let args_slice = ctx.arena.alloc_slice(&args).ok_or_else(Error::out_of_memory)?;
                let Value::Function(f) = current else {
                    unreachable!("is_callable guarantees Function")
                };
                let result = f(prev, args_slice, ctx.env.udata())?;
                prev = current;
                current = result;
                last_ident = None;
                rest = &rest[end..];
            }
            _ => break,
        }
    }

    Ok(current)
}

/// Reads the member name of the atom, if the atom itself was a bare
/// identifier, so an immediately following `(...)` names the right
/// function in a `not-a-function` error.
fn leading_ident<'a>(full: &'a str, rest_after_atom: &'a str) -> Option<&'a str> {
    let consumed = full.len() - rest_after_atom.len();
    let atom_text = full[..consumed].trim();
    let bytes = atom_text.as_bytes();
    if !bytes.first().is_some_and(|&b| is_ident_start(b)) {
        return None;
    }
    if scan_ident(bytes, 0) == bytes.len() {
        Some(atom_text)
    } else {
        None
    }
}

fn member_access<'a>(
    ctx: &Ctx<'a>,
    receiver: Value<'a>,
    ident: &str,
    chained: bool,
) -> Result<Value<'a>, Error<'a>> {
    if let Value::Json(raw) = receiver {
        return json_probe::access(ctx.arena, raw, ident);
    }
    let owned_ident = ctx.arena.alloc_str(ident).ok_or_else(Error::out_of_memory)?;
    ctx.env.resolve(receiver, owned_ident, chained)
}

/// Parses the leading atom starting at `text` (already trimmed), returning
/// the atom's value and the remaining, not-yet-consumed text for the chain
/// loop to continue scanning from.
fn eval_leading_atom<'a>(ctx: &Ctx<'a>, text: &'a str) -> Result<(Value<'a>, &'a str), Error<'a>> {
    let bytes = text.as_bytes();
    match bytes.first() {
        None => Err(Error::syntax()),
        Some(b'"' | b'\'') => {
            let end = read_group(bytes, 0).ok_or_else(Error::syntax)?;
            let body = &text[1..end - 1];
            let value = parse_string_body(ctx.arena, body)?;
            Ok((Value::String(value), &text[end..]))
        }
        Some(b'(') => {
            let end = read_group(bytes, 0).ok_or_else(Error::syntax)?;
            let inner = text[1..end - 1].trim();
            let _guard = ctx.depth.enter()?;
            let value = eval_comma(ctx, inner)?;
            Ok((value, &text[end..]))
        }
        Some(b'[') => {
            let end = read_group(bytes, 0).ok_or_else(Error::syntax)?;
            let inner = &text[1..end - 1];
            let elem_texts = split_top_level_commas(inner);
            let mut items = Vec::with_capacity(elem_texts.len());
            for elem_text in elem_texts {
                let _guard = ctx.depth.enter()?;
                items.push(eval_ternary(ctx, elem_text)?);
            }
            let slice = ctx.arena.alloc_slice(&items).ok_or_else(Error::out_of_memory)?;
            Ok((Value::Array(slice), &text[end..]))
        }
        Some(b'0') if matches!(bytes.get(1), Some(b'x' | b'X')) => {
            let (value, end) = scan_hex(text)?;
            Ok((value, &text[end..]))
        }
        Some(b'0'..=b'9') => {
            let (value, end) = scan_decimal(text)?;
            Ok((value, &text[end..]))
        }
        Some(&b) if is_ident_start(b) => {
            let end = scan_ident(bytes, 0);
            let ident = &text[..end];
            let rest = &text[end..];
            let chain_follows = starts_chain_segment(rest.as_bytes());
            let value = eval_identifier(ctx, ident, chain_follows)?;
            Ok((value, rest))
        }
        _ => Err(Error::syntax()),
    }
}

/// Whether `bytes` (after skipping whitespace) opens a chain segment
/// (`.`, `?.`, `[`, `(`). A bare `?` that isn't `?.` belongs to the
/// ternary, not a chain, and a bare `?` immediately followed by another
/// `?` belongs to `??`.
fn starts_chain_segment(bytes: &[u8]) -> bool {
    let i = skip_ws(bytes, 0);
    match bytes.get(i) {
        Some(b'.' | b'[' | b'(') => true,
        Some(b'?') => bytes.get(i + 1) == Some(&b'.'),
        _ => false,
    }
}

/// A root identifier immediately followed by a chain segment defers its
/// undefined-identifier check to that segment: `howdy()` with `howdy`
/// unresolved reports `not a function`, not a root `ReferenceError`,
/// because the `(...)` segment is what actually observes the miss.
fn eval_identifier<'a>(ctx: &Ctx<'a>, ident: &'a str, chain_follows: bool) -> Result<Value<'a>, Error<'a>> {
    match ident {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        "undefined" => return Ok(Value::Undefined),
        "NaN" => return Ok(Value::Float(f64::NAN)),
        "Infinity" => return Ok(Value::Float(f64::INFINITY)),
        _ => {}
    }
    if RESERVED.contains(&ident) {
        return Err(Error::unsupported_keyword(ident));
    }
    if chain_follows {
        ctx.env.lookup(Value::global_sentinel(), ident)
    } else {
        ctx.env.resolve(Value::global_sentinel(), ident, false)
    }
}

fn scan_hex(text: &str) -> Result<(Value<'_>, usize), Error<'_>> {
    let bytes = text.as_bytes();
    let start = 2;
    let mut i = start;
    while bytes.get(i).is_some_and(u8::is_ascii_hexdigit) {
        i += 1;
    }
    if i == start {
        return Err(Error::syntax());
    }
    let n = u64::from_str_radix(&text[start..i], 16).map_err(|_| Error::syntax())?;
    Ok((Value::UInt(n), i))
}

fn scan_decimal(text: &str) -> Result<(Value<'_>, usize), Error<'_>> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut is_float = false;
    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        is_float = true;
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            is_float = true;
            i = j;
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
        }
    }
    let literal = &text[..i];
    if !is_float && text[i..].starts_with("i64") && !text[i + 3..].as_bytes().first().is_some_and(|&b| is_ident_start(b) || b.is_ascii_digit()) {
        let n: i64 = literal.parse().map_err(|_| Error::syntax())?;
        return Ok((Value::Int(n), i + 3));
    }
    if !is_float && text[i..].starts_with("u64") && !text[i + 3..].as_bytes().first().is_some_and(|&b| is_ident_start(b) || b.is_ascii_digit()) {
        let n: u64 = literal.parse().map_err(|_| Error::syntax())?;
        return Ok((Value::UInt(n), i + 3));
    }
    let n: f64 = literal.parse().map_err(|_| Error::syntax())?;
    Ok((Value::Float(n), i))
}
