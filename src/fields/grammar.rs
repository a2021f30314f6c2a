// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Low-level HTTP field grammar primitives: tokens, quoted-strings, and
//! quote-aware list splitting shared by the typed parsers.

/// RFC `tchar` test used by every token grammar.
pub fn is_tchar(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '.'
                | '^'
                | '_'
                | '`'
                | '|'
                | '~'
        )
}

/// Return true when `s` is a non-empty RFC `token`.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_tchar)
}

/// Return the first character in `s` that violates the `token` grammar.
pub fn find_invalid_token_char(s: &str) -> Option<char> {
    s.chars().find(|&c| !is_tchar(c))
}

/// Split on commas that sit outside quoted-strings, trimming each part.
/// Empty parts are kept out of the result (empty list elements are legal
/// per RFC 9110 §5.6.1 and carry no meaning).
pub fn split_commas_outside_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut prev_backslash = false;
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' if !prev_backslash => in_quote = !in_quote,
            b'\\' if in_quote && !prev_backslash => {
                prev_backslash = true;
                continue;
            }
            b',' if !in_quote => {
                let part = s[start..i].trim();
                if !part.is_empty() {
                    parts.push(part);
                }
                start = i + 1;
            }
            _ => {}
        }
        prev_backslash = false;
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Split on semicolons outside quoted-strings, trimming each part.
pub fn split_semicolons_outside_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut prev_backslash = false;
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' if !prev_backslash => in_quote = !in_quote,
            b'\\' if in_quote && !prev_backslash => {
                prev_backslash = true;
                continue;
            }
            b';' if !in_quote => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        prev_backslash = false;
    }
    parts.push(s[start..].trim());
    parts
}

/// Parse a quoted-string, returning its unescaped contents.
///
/// Requires surrounding DQUOTEs, honors backslash escapes, and rejects
/// unescaped control characters (HTAB excepted) per RFC 9110 §5.6.4.
pub fn parse_quoted_string(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return None;
    }

    let mut out = String::with_capacity(s.len() - 2);
    let mut escaped = false;
    for c in s[1..s.len() - 1].chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            // unescaped quote before the terminating one
            return None;
        } else if (c.is_control() && c != '\t') || c == '\u{7f}' {
            return None;
        } else {
            out.push(c);
        }
    }
    if escaped {
        return None;
    }
    Some(out)
}

/// Parse a `;`-separated parameter list (`key=value` pairs after the first
/// element of a field), values being tokens or quoted-strings.
pub fn parse_parameters(s: &str) -> Option<Vec<(String, String)>> {
    let mut params = Vec::new();
    for part in split_semicolons_outside_quotes(s) {
        if part.is_empty() {
            return None;
        }
        let (key, value) = part.split_once('=')?;
        let key = key.trim();
        let value = value.trim();
        if !is_token(key) {
            return None;
        }
        let value = if value.starts_with('"') {
            parse_quoted_string(value)?
        } else if is_token(value) {
            value.to_string()
        } else {
            return None;
        };
        params.push((key.to_ascii_lowercase(), value));
    }
    Some(params)
}
