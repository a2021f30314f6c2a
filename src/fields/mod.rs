// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Field grammar parsers: one raw header (or several occurrences of it)
//! in, one typed structured value out.
//!
//! Parsing is total. Grammar violations are data — the `Malformed` variant —
//! never panics or error returns, no matter what bytes arrive.

pub mod cache_control;
pub mod date;
pub mod etag;
pub mod grammar;
pub mod media_type;
pub mod qvalue;

use crate::exchange::HeaderField;
use cache_control::CacheDirective;
use chrono::{DateTime, Utc};
use etag::EntityTag;
use media_type::MediaType;
use qvalue::QualityItem;
use serde::{Deserialize, Serialize};

/// The structured value of a header field, tagged by grammar category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Token(String),
    TokenList(Vec<String>),
    Integer(u64),
    Date(DateTime<Utc>),
    MediaType(MediaType),
    EntityTag(EntityTag),
    CacheDirectives(Vec<CacheDirective>),
    QualityList(Vec<QualityItem>),
    /// Free-form field whose grammar this crate does not model.
    Text(String),
    /// The raw value violates the field's grammar.
    Malformed,
}

impl FieldValue {
    pub fn is_malformed(&self) -> bool {
        matches!(self, FieldValue::Malformed)
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_media_type(&self) -> Option<&MediaType> {
        match self {
            FieldValue::MediaType(m) => Some(m),
            _ => None,
        }
    }
}

/// Whether multiple raw occurrences combine into one comma-joined list or
/// the field is singleton (extra occurrences are a conformance problem
/// reported by a check, not handled here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    List,
    Singleton,
}

/// Grammar category a field's raw text is parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Token,
    TokenList,
    Integer,
    Date,
    MediaType,
    EntityTag,
    CacheDirectives,
    QualityList,
    /// HTTP-date or delta-seconds, whichever matches (Retry-After).
    DateOrSeconds,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub grammar: Grammar,
}

const fn desc(kind: FieldKind, grammar: Grammar) -> FieldDescriptor {
    FieldDescriptor { kind, grammar }
}

/// Look up how a field is combined and parsed, by case-insensitive name.
/// Unknown fields get opaque text with list combination.
pub fn descriptor(name: &str) -> FieldDescriptor {
    use FieldKind::{List, Singleton};

    match name.to_ascii_lowercase().as_str() {
        "date" | "expires" | "last-modified" | "if-modified-since" | "if-unmodified-since" => {
            desc(Singleton, Grammar::Date)
        }
        "age" | "content-length" | "max-forwards" => desc(Singleton, Grammar::Integer),
        "retry-after" => desc(Singleton, Grammar::DateOrSeconds),
        "content-type" => desc(Singleton, Grammar::MediaType),
        "etag" => desc(Singleton, Grammar::EntityTag),
        "cache-control" => desc(List, Grammar::CacheDirectives),
        "accept" | "accept-charset" | "accept-encoding" | "accept-language" | "te" => {
            desc(List, Grammar::QualityList)
        }
        "allow" | "connection" | "content-encoding" | "pragma" | "trailer"
        | "transfer-encoding" | "upgrade" | "vary" => desc(List, Grammar::TokenList),
        "host" | "location" | "referer" | "user-agent" | "server" | "from" => {
            desc(Singleton, Grammar::Text)
        }
        _ => desc(List, Grammar::Text),
    }
}

/// Parse one grammar category against prepared text.
pub fn parse_value(grammar: Grammar, s: &str) -> FieldValue {
    match grammar {
        Grammar::Token => {
            let t = s.trim();
            if grammar::is_token(t) {
                FieldValue::Token(t.to_string())
            } else {
                FieldValue::Malformed
            }
        }
        Grammar::TokenList => {
            let parts = grammar::split_commas_outside_quotes(s);
            if parts.iter().all(|p| grammar::is_token(p)) {
                FieldValue::TokenList(parts.into_iter().map(str::to_string).collect())
            } else {
                FieldValue::Malformed
            }
        }
        Grammar::Integer => match s.trim().parse::<u64>() {
            Ok(n) => FieldValue::Integer(n),
            Err(_) => FieldValue::Malformed,
        },
        Grammar::Date => match date::parse_http_date(s) {
            Some(d) => FieldValue::Date(d),
            None => FieldValue::Malformed,
        },
        Grammar::MediaType => match media_type::parse(s) {
            Some(m) => FieldValue::MediaType(m),
            None => FieldValue::Malformed,
        },
        Grammar::EntityTag => match etag::parse(s) {
            Some(t) => FieldValue::EntityTag(t),
            None => FieldValue::Malformed,
        },
        Grammar::CacheDirectives => match cache_control::parse(s) {
            Ok(ds) => FieldValue::CacheDirectives(ds),
            Err(_) => FieldValue::Malformed,
        },
        Grammar::QualityList => match qvalue::parse_list(s) {
            Some(items) => FieldValue::QualityList(items),
            None => FieldValue::Malformed,
        },
        Grammar::DateOrSeconds => {
            if let Some(d) = date::parse_http_date(s) {
                FieldValue::Date(d)
            } else if let Ok(n) = s.trim().parse::<u64>() {
                FieldValue::Integer(n)
            } else {
                FieldValue::Malformed
            }
        }
        Grammar::Text => FieldValue::Text(s.to_string()),
    }
}

/// Parse all raw occurrences of one field under its descriptor.
///
/// List fields comma-join their occurrences first (RFC 9110 §5.3); singleton
/// fields parse the first occurrence only. Never panics: raw bytes are
/// decoded lossily and grammar failures come back as `Malformed`.
pub fn parse_entries(desc: &FieldDescriptor, entries: &[&HeaderField]) -> FieldValue {
    let Some(first) = entries.first() else {
        return FieldValue::Malformed;
    };
    let text = match desc.kind {
        FieldKind::Singleton => first.value_text(),
        FieldKind::List => entries
            .iter()
            .map(|e| e.value_text())
            .collect::<Vec<_>>()
            .join(", "),
    };
    parse_value(desc.grammar, &text)
}

/// Hygiene flags computed on the raw bytes, before any grammar runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawIssues {
    pub non_ascii: bool,
    pub overlong: bool,
}

/// Flag non-ASCII bytes and values over the configured length ceiling.
/// Both are reported by checks, never rejected here.
pub fn raw_issues(field: &HeaderField, max_len: usize) -> RawIssues {
    RawIssues {
        non_ascii: field.value.iter().any(|&b| b > 0x7f),
        overlong: field.value.len() > max_len,
    }
}
