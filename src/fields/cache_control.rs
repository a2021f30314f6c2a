// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Cache-Control directive grammar (RFC 9111 §5.2).

use crate::fields::grammar;
use serde::{Deserialize, Serialize};

/// One cache directive: a lowercased token name plus an optional argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDirective {
    pub name: String,
    pub value: Option<String>,
}

/// Parse a Cache-Control value into directives.
///
/// On a grammar violation the offending directive text is returned as the
/// error so the reporting check can name it.
pub fn parse(s: &str) -> Result<Vec<CacheDirective>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(String::new());
    }

    let mut out = Vec::new();
    for part in grammar::split_commas_outside_quotes(s) {
        let (name, value) = match part.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let parsed = if value.starts_with('"') {
                    grammar::parse_quoted_string(value)
                } else if grammar::is_token(value) {
                    Some(value.to_string())
                } else {
                    None
                };
                match parsed {
                    Some(v) => (name.trim(), Some(v)),
                    None => return Err(part.to_string()),
                }
            }
            None => (part, None),
        };
        if !grammar::is_token(name) {
            return Err(part.to_string());
        }
        out.push(CacheDirective {
            name: name.to_ascii_lowercase(),
            value,
        });
    }
    Ok(out)
}
