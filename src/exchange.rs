// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Canonical exchange model: a captured request, response, and their pairing.
//!
//! Adapters decode capture formats (HAR, proxy flows, middleware hooks) into
//! these types; everything downstream only sees this model. Values are
//! immutable after construction — checks read them and derive facts, they
//! never write back.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A case-insensitive header field name that preserves its original spelling.
///
/// Equality and hashing use the ASCII-lowercased form; `as_str` returns the
/// name as it appeared on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as captured, original case intact.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII-lowercased form used for comparisons and cache keys.
    pub fn lowered(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for FieldName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for FieldName {}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl Hash for FieldName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.as_bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw header field occurrence: name plus opaque value bytes.
///
/// Duplicates are permitted and order is preserved by the containing `Vec`;
/// the value is kept as captured, including non-UTF8 bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderField {
    pub name: FieldName,
    pub value: Bytes,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            name: FieldName::new(name),
            value: value.into(),
        }
    }

    /// Lossy text view of the raw value, for grammars and messages.
    pub fn value_text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

/// Which side of the exchange a field or notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Request,
    Response,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Request => f.write_str("request"),
            Part::Response => f.write_str("response"),
        }
    }
}

/// Ordered, duplicate-preserving header access shared by both message sides.
pub trait Fielded {
    fn header_fields(&self) -> &[HeaderField];

    /// All occurrences of `name`, in capture order.
    fn field_entries<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a HeaderField> {
        self.header_fields().iter().filter(move |f| f.name == *name)
    }

    fn has_field(&self, name: &str) -> bool {
        self.field_entries(name).next().is_some()
    }
}

/// Request portion of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub target: String,
    /// The exact HTTP-version token from the start-line, e.g. "HTTP/1.1".
    pub version: String,
    pub headers: Vec<HeaderField>,
    pub body: Option<Bytes>,
}

impl Fielded for Request {
    fn header_fields(&self) -> &[HeaderField] {
        &self.headers
    }
}

/// Response portion of an exchange. Its request, when known, lives alongside
/// it in the same `Exchange`; the pairing is a lookup relation, not an
/// ownership edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub reason: String,
    /// The exact HTTP-version token from the status-line, e.g. "HTTP/1.1".
    pub version: String,
    pub headers: Vec<HeaderField>,
    pub body: Option<Bytes>,
}

impl Fielded for Response {
    fn header_fields(&self) -> &[HeaderField] {
        &self.headers
    }
}

impl Response {
    pub fn is_informational(&self) -> bool {
        (100..=199).contains(&self.status)
    }

    pub fn is_successful(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn is_redirection(&self) -> bool {
        (300..=399).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.status)
    }
}

/// One analyzed unit: a paired request/response, or a standalone side when
/// the pairing is unknown.
///
/// `observed_at` is the capture timestamp recorded by the adapter. Temporal
/// checks compare against it instead of the wall clock, so analyzing the
/// same exchange twice yields identical notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub request: Option<Request>,
    pub response: Option<Response>,
    pub observed_at: DateTime<Utc>,
}

impl Exchange {
    pub fn paired(request: Request, response: Response, observed_at: DateTime<Utc>) -> Self {
        Self {
            request: Some(request),
            response: Some(response),
            observed_at,
        }
    }

    pub fn request_only(request: Request, observed_at: DateTime<Utc>) -> Self {
        Self {
            request: Some(request),
            response: None,
            observed_at,
        }
    }

    pub fn response_only(response: Response, observed_at: DateTime<Utc>) -> Self {
        Self {
            request: None,
            response: Some(response),
            observed_at,
        }
    }

    /// Header fields of one side, if that side was captured.
    pub fn part_fields(&self, part: Part) -> Option<&[HeaderField]> {
        match part {
            Part::Request => self.request.as_ref().map(|r| r.headers.as_slice()),
            Part::Response => self.response.as_ref().map(|r| r.headers.as_slice()),
        }
    }

    /// Body bytes of one side, if captured.
    pub fn part_body(&self, part: Part) -> Option<&Bytes> {
        match part {
            Part::Request => self.request.as_ref().and_then(|r| r.body.as_ref()),
            Part::Response => self.response.as_ref().and_then(|r| r.body.as_ref()),
        }
    }
}
