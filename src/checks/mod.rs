// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! The conformance check catalog.
//!
//! Each check is a pure rule over one exchange: it reads the exchange and
//! previously derived facts, emits notices, and may publish facts of its
//! own. Checks register here once; the set never changes while analysis is
//! in flight.

use crate::engine::Analysis;
use crate::exchange::Part;
use crate::facts::FactKey;

/// Which subject a check applies to. `Exchange` checks always run;
/// `Request`/`Response` checks are skipped when that side is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Request,
    Response,
    Exchange,
}

pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self) -> Applicability;

    /// Fact keys this check reads. Soft dependencies: ordering only — a
    /// key with no writer simply reads as absent.
    fn reads(&self) -> &'static [FactKey] {
        &[]
    }

    /// Fact keys this check may write. At most one writer per key across
    /// the registry; validated at construction.
    fn writes(&self) -> &'static [FactKey] {
        &[]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()>;
}

pub mod body_format;
pub mod cache_control;
pub mod content_type;
pub mod date_fields;
pub mod field_grammar;
pub mod freshness;
pub mod method_token;
pub mod numeric_fields;
pub mod obsolete_headers;
pub mod response_date;
pub mod singleton_repeated;
pub mod status_code;
pub mod user_agent;
pub mod vendor_prefix;

pub const CHECKS: &[&dyn Check] = &[
    &method_token::MethodToken,
    &user_agent::UserAgentPresent,
    &vendor_prefix::VendorPrefix,
    &date_fields::DateFields,
    &numeric_fields::NumericFields,
    &content_type::ContentTypeWellFormed,
    &cache_control::CacheControlDirectives,
    &singleton_repeated::SingletonRepeated,
    &field_grammar::FieldGrammar,
    &freshness::FreshnessArithmetic,
    &body_format::BodyFormat,
    &obsolete_headers::ObsoleteHeaders,
    &response_date::ResponseDatePresent,
    &status_code::StatusCodeRange,
];

/// Both sides a message-level check should visit, in report order.
pub(crate) const PARTS: [Part; 2] = [Part::Request, Part::Response];

/// Original wire spelling of a field's first occurrence, used for notice
/// subjects; falls back to the lookup name when the field is absent.
pub(crate) fn wire_spelling(cx: &Analysis<'_>, part: Part, name: &str) -> String {
    cx.exchange()
        .part_fields(part)
        .and_then(|fields| fields.iter().find(|f| f.name == *name))
        .map(|f| f.name.as_str().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Canonical display casing for message parameters ("max-forwards" ->
/// "Max-Forwards"); the model itself stays case-insensitive.
pub(crate) fn display_name(lowered: &str) -> String {
    lowered
        .split('-')
        .map(|seg| {
            let mut c = seg.chars();
            match c.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + c.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
