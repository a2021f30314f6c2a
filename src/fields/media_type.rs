// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Media-type grammar: `type/subtype` plus parameters.

use crate::fields::grammar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed media type, e.g. `text/html; charset=utf-8`.
///
/// Type, subtype and parameter names are stored lowercased; parameter values
/// keep their case (charset comparison lowercases separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    pub type_: String,
    pub subtype: String,
    pub params: Vec<(String, String)>,
}

impl MediaType {
    /// The `charset` parameter, lowercased, if present.
    pub fn charset(&self) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == "charset")
            .map(|(_, v)| v.to_ascii_lowercase())
    }

    /// True when this type claims JSON syntax: `application/json` or any
    /// `+json` structured-syntax suffix.
    pub fn claims_json(&self) -> bool {
        (self.type_ == "application" && self.subtype == "json") || self.subtype.ends_with("+json")
    }

    /// The bare `type/subtype` pair without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.essence())
    }
}

/// Parse a media type. Both type and subtype must be tokens; parameters, if
/// present, must each be `token=token` or `token=quoted-string`.
pub fn parse(s: &str) -> Option<MediaType> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = grammar::split_semicolons_outside_quotes(trimmed).into_iter();
    let media = parts.next()?;
    let (type_, subtype) = media.split_once('/')?;
    let type_ = type_.trim();
    let subtype = subtype.trim();
    if !grammar::is_token(type_) || !grammar::is_token(subtype) {
        return None;
    }

    let rest: Vec<&str> = parts.collect();
    let params = if rest.is_empty() {
        Vec::new()
    } else {
        grammar::parse_parameters(&rest.join("; "))?
    };

    Some(MediaType {
        type_: type_.to_ascii_lowercase(),
        subtype: subtype.to_ascii_lowercase(),
        params,
    })
}
