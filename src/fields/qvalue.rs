// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Quality-value list grammar, used by the Accept family (RFC 9110 §12.4.2).

use crate::fields::grammar;
use serde::{Deserialize, Serialize};

/// One element of a quality list: the negotiated value (media-range,
/// coding, or language tag) and its weight in thousandths, when given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityItem {
    pub value: String,
    /// `q` weight scaled by 1000 (`0.8` -> 800). Avoids floats so parsed
    /// values compare exactly.
    pub weight: Option<u16>,
}

/// Parse a qvalue: `0`..`1` with up to three decimals, scaled to thousandths.
pub fn parse_weight(s: &str) -> Option<u16> {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if frac_part.len() > 3 || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let frac: u16 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<3}", frac_part);
        padded.parse().ok()?
    };
    match int_part {
        "0" => Some(frac),
        "1" if frac == 0 => Some(1000),
        _ => None,
    }
}

/// Parse a comma-separated quality list. Each element is a token-like value
/// (wildcards and `/` for media-ranges allowed) with optional parameters, of
/// which `q` must be a valid qvalue.
pub fn parse_list(s: &str) -> Option<Vec<QualityItem>> {
    let mut out = Vec::new();
    for element in grammar::split_commas_outside_quotes(s) {
        let mut parts = grammar::split_semicolons_outside_quotes(element).into_iter();
        let value = parts.next()?.trim();
        if !is_range_token(value) {
            return None;
        }

        let mut weight = None;
        for param in parts {
            let (key, val) = param.split_once('=')?;
            let key = key.trim();
            if !grammar::is_token(key) {
                return None;
            }
            if key.eq_ignore_ascii_case("q") {
                weight = Some(parse_weight(val)?);
            } else if !grammar::is_token(val.trim()) && grammar::parse_quoted_string(val.trim()).is_none() {
                return None;
            }
        }

        out.push(QualityItem {
            value: value.to_string(),
            weight,
        });
    }
    Some(out)
}

/// Tokens in quality lists may be plain tokens, `*`, or media-ranges with a
/// single `/` separating two tokens-or-wildcards.
fn is_range_token(s: &str) -> bool {
    match s.split_once('/') {
        Some((t, sub)) => {
            (t == "*" || grammar::is_token(t)) && (sub == "*" || grammar::is_token(sub))
        }
        None => s == "*" || grammar::is_token(s),
    }
}
