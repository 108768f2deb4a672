//! Lexical primitives (§4.3): whitespace, identifiers, bracket-group
//! scanning, and string-literal parsing. There is no separate token
//! stream — these are called directly by the precedence ladder and the
//! atom evaluator as they scan the input left to right.

use jexpr_arena::Arena;
use jexpr_value::Error;

#[must_use]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

#[must_use]
pub const fn is_ident_start(b: u8) -> bool {
    matches!(b, b'$' | b'_' | b'A'..=b'Z' | b'a'..=b'z')
}

#[must_use]
pub const fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[must_use]
pub fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|&b| is_whitespace(b)) {
        i += 1;
    }
    i
}

/// Scans an identifier starting at `i` (which must be an identifier-start
/// byte). Returns the end index.
#[must_use]
pub fn scan_ident(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while bytes.get(i).is_some_and(|&b| is_ident_continue(b)) {
        i += 1;
    }
    i
}

/// Given a span starting with one of `( [ { " '`, advances to just past the
/// matching closer, honoring bracket nesting and JS string-escape rules
/// (a closing quote is not terminal after an odd run of backslashes).
/// Returns `None` on unmatched input.
pub fn read_group(bytes: &[u8], start: usize) -> Option<usize> {
    match *bytes.get(start)? {
        q @ (b'"' | b'\'') => scan_quoted(bytes, start, q),
        open @ (b'(' | b'[' | b'{') => {
            let close = match open {
                b'(' => b')',
                b'[' => b']',
                _ => b'}',
            };
            scan_bracketed(bytes, start, open, close)
        }
        _ => None,
    }
}

fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    loop {
        match *bytes.get(i)? {
            b if b == quote => return Some(i + 1),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
}

fn scan_bracketed(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0i32;
    let mut i = start;
    loop {
        match *bytes.get(i)? {
            b'"' | b'\'' => i = scan_quoted(bytes, i, bytes[i])?,
            b if b == open => {
                depth += 1;
                i += 1;
            }
            b if b == close => {
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

/// Parses the body of a string literal (the bytes strictly between the
/// quotes) into its unescaped form. Borrows when no escape was present,
/// otherwise allocates in `arena`.
pub fn parse_string_body<'a>(arena: &'a Arena, body: &'a str) -> Result<&'a str, Error<'a>> {
    if !body.as_bytes().contains(&b'\\') && !body.bytes().any(|b| b < 0x20) {
        return Ok(body);
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if (c as u32) < 0x20 {
            return Err(Error::syntax());
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let (_, esc) = chars.next().ok_or_else(Error::syntax)?;
        match esc {
            '0' => out.push('\0'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\n' => {}
            '1'..='9' => return Err(Error::syntax()),
            'x' => {
                let hex: String = (0..2)
                    .map(|_| chars.next().map(|(_, c)| c))
                    .collect::<Option<String>>()
                    .ok_or_else(Error::syntax)?;
                let code = u32::from_str_radix(&hex, 16).map_err(|_| Error::syntax())?;
                out.push(char::from_u32(code).ok_or_else(Error::syntax)?);
            }
            'u' => parse_unicode_escape(&mut chars, &mut out)?,
            other => out.push(other),
        }
    }
    Ok(arena.alloc_str(&out).ok_or_else(Error::out_of_memory)?)
}

type CharIter<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn parse_unicode_escape(chars: &mut CharIter<'_>, out: &mut String) -> Result<(), Error<'static>> {
    if chars.peek().map(|(_, c)| *c) == Some('{') {
        chars.next();
        let mut hex = String::new();
        loop {
            match chars.next() {
                Some((_, '}')) => break,
                Some((_, c)) => hex.push(c),
                None => return Err(Error::syntax()),
            }
        }
        let code = u32::from_str_radix(&hex, 16).map_err(|_| Error::syntax())?;
        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        return Ok(());
    }
    let hex: String = (0..4)
        .map(|_| chars.next().map(|(_, c)| c))
        .collect::<Option<String>>()
        .ok_or_else(Error::syntax)?;
    let unit = u32::from_str_radix(&hex, 16).map_err(|_| Error::syntax())?;
    if (0xD800..0xDC00).contains(&unit) {
        // Possible lone high surrogate: only decodes as a pair if
        // immediately followed by a `\uXXXX` low surrogate.
        let checkpoint = chars.clone();
        if chars.peek().map(|(_, c)| *c) == Some('\\') {
            chars.next();
            if chars.peek().map(|(_, c)| *c) == Some('u') {
                chars.next();
                let hex2: Option<String> =
                    (0..4).map(|_| chars.next().map(|(_, c)| c)).collect();
                if let Some(hex2) = hex2 {
                    if let Ok(low) = u32::from_str_radix(&hex2, 16) {
                        if (0xDC00..0xE000).contains(&low) {
                            let c = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(c).unwrap_or('\u{FFFD}'));
                            return Ok(());
                        }
                    }
                }
            }
        }
        *chars = checkpoint;
        out.push('\u{FFFD}');
        return Ok(());
    }
    out.push(char::from_u32(unit).unwrap_or('\u{FFFD}'));
    Ok(())
}

/// Splits `text` on top-level (depth-zero) commas, as used for array
/// literals and call-argument lists. An empty, all-whitespace `text`
/// yields no elements.
#[must_use]
pub fn split_top_level_commas(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    if skip_ws(bytes, 0) >= bytes.len() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'(' | b'[' | b'{' => {
                i = read_group(bytes, i).unwrap_or(bytes.len());
            }
            b',' => {
                parts.push(text[start..i].trim());
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    parts.push(text[start..].trim());
    parts
}
