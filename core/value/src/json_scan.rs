//! A non-materializing scanner over raw JSON bytes.
//!
//! `Value::Json` holds a byte slice, not a parsed tree (§4.6A of
//! `SPEC_FULL.md`): member and index lookups walk only the bytes on the path
//! to the requested value, skipping siblings with [`skip_value`] rather than
//! building a `serde_json`-style value graph just to throw most of it away.

/// Skips one JSON value starting at `bytes[i]` (after leading whitespace),
/// returning the index just past it, or `None` on malformed input.
pub fn skip_value(bytes: &[u8], i: usize) -> Option<usize> {
    let i = skip_ws(bytes, i);
    match *bytes.get(i)? {
        b'"' => skip_string(bytes, i),
        b'{' => skip_container(bytes, i, b'{', b'}'),
        b'[' => skip_container(bytes, i, b'[', b']'),
        b't' => bytes.get(i..i + 4).filter(|s| *s == b"true").map(|_| i + 4),
        b'f' => bytes.get(i..i + 5).filter(|s| *s == b"false").map(|_| i + 5),
        b'n' => bytes.get(i..i + 4).filter(|s| *s == b"null").map(|_| i + 4),
        b'-' | b'0'..=b'9' => Some(skip_number(bytes, i)),
        _ => None,
    }
}

pub fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        i += 1;
    }
    i
}

/// `bytes[start]` must be the opening `"`. Returns the index just past the
/// matching closing quote.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    loop {
        match *bytes.get(i)? {
            b'"' => return Some(i + 1),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
}

fn skip_container(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0i32;
    let mut i = start;
    loop {
        match *bytes.get(i)? {
            b'"' => i = skip_string(bytes, i)?,
            c if c == open => {
                depth += 1;
                i += 1;
            }
            c if c == close => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
}

fn skip_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    while matches!(bytes.get(i), Some(b'0'..=b'9')) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i
}

fn trimmed(raw: &str) -> &str {
    raw.trim()
}

#[must_use]
pub fn is_array(raw: &str) -> bool {
    trimmed(raw).as_bytes().first() == Some(&b'[')
}

#[must_use]
pub fn is_object(raw: &str) -> bool {
    trimmed(raw).as_bytes().first() == Some(&b'{')
}

/// The raw text of an array's first element, or `None` if `raw` is not a
/// non-empty JSON array.
#[must_use]
pub fn first_array_element(raw: &str) -> Option<&str> {
    array_element(raw, 0)
}

/// The raw text of the element at `index` in a JSON array, or `None` if
/// `raw` is not a JSON array or has no such element.
#[must_use]
pub fn array_element(raw: &str, index: usize) -> Option<&str> {
    let t = trimmed(raw);
    let bytes = t.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let mut i = skip_ws(bytes, 1);
    let mut cur = 0usize;
    loop {
        if bytes.get(i) == Some(&b']') {
            return None;
        }
        let end = skip_value(bytes, i)?;
        if cur == index {
            return Some(t[i..end].trim());
        }
        cur += 1;
        i = skip_ws(bytes, end);
        match bytes.get(i) {
            Some(b',') => i = skip_ws(bytes, i + 1),
            _ => return None,
        }
    }
}

/// The raw text of the value for `key` in a JSON object, or `None` if `raw`
/// is not a JSON object or has no such member.
#[must_use]
pub fn object_member<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    let t = trimmed(raw);
    let bytes = t.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut i = skip_ws(bytes, 1);
    loop {
        if bytes.get(i) == Some(&b'}') {
            return None;
        }
        if bytes.get(i) != Some(&b'"') {
            return None;
        }
        let key_start = i + 1;
        let key_end = skip_string(bytes, i)?;
        let raw_key = &t[key_start..key_end - 1];
        i = skip_ws(bytes, key_end);
        if bytes.get(i) != Some(&b':') {
            return None;
        }
        i = skip_ws(bytes, i + 1);
        let val_end = skip_value(bytes, i)?;
        if key_matches(raw_key, key) {
            return Some(t[i..val_end].trim());
        }
        i = skip_ws(bytes, val_end);
        match bytes.get(i) {
            Some(b',') => i = skip_ws(bytes, i + 1),
            _ => return None,
        }
    }
}

/// Compares a raw (still-escaped) JSON key against an already-unescaped
/// target. Most object keys in practice contain no escapes, so the common
/// case avoids allocating.
fn key_matches(raw_key: &str, target: &str) -> bool {
    if !raw_key.contains('\\') {
        return raw_key == target;
    }
    unescape_simple(raw_key).is_some_and(|s| s == target)
}

/// Unescapes the small set of JSON string escapes. Returns `None` on a
/// malformed escape sequence.
#[must_use]
pub fn unescape_simple(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    let mut pending_high: Option<u16> = None;
    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_pending(&mut out, &mut pending_high);
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => push_unit(&mut out, &mut pending_high, '"' as u32),
            '\\' => push_unit(&mut out, &mut pending_high, '\\' as u32),
            '/' => push_unit(&mut out, &mut pending_high, '/' as u32),
            'b' => push_unit(&mut out, &mut pending_high, 0x08),
            'f' => push_unit(&mut out, &mut pending_high, 0x0C),
            'n' => push_unit(&mut out, &mut pending_high, b'\n' as u32),
            'r' => push_unit(&mut out, &mut pending_high, b'\r' as u32),
            't' => push_unit(&mut out, &mut pending_high, b'\t' as u32),
            'u' => {
                let hex: String = (0..4).map(|_| chars.next()).collect::<Option<String>>()?;
                let unit = u32::from_str_radix(&hex, 16).ok()?;
                match (pending_high.take(), (0xD800..0xDC00).contains(&unit)) {
                    (Some(high), _) if (0xDC00..0xE000).contains(&unit) => {
                        let c = 0x10000
                            + ((u32::from(high) - 0xD800) << 10)
                            + (unit - 0xDC00);
                        out.push(char::from_u32(c).unwrap_or('\u{FFFD}'));
                    }
                    (Some(_), _) => {
                        out.push('\u{FFFD}');
                        if (0xD800..0xDC00).contains(&unit) {
                            pending_high = Some(unit as u16);
                        } else {
                            push_unit(&mut out, &mut None, unit);
                        }
                    }
                    (None, true) => pending_high = Some(unit as u16),
                    (None, false) => push_unit(&mut out, &mut None, unit),
                }
            }
            _ => return None,
        }
    }
    flush_pending(&mut out, &mut pending_high);
    Some(out)
}

fn push_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u32) {
    flush_pending(out, pending_high);
    out.push(char::from_u32(unit).unwrap_or('\u{FFFD}'));
}

fn flush_pending(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push('\u{FFFD}');
    }
}
