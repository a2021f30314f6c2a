// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Notice model: stable identifiers, severities, subjects, and the
//! versioned catalog mapping each id to its fixed severity and message
//! template.
//!
//! Notice ids are a contract. Once assigned, an id's meaning must not
//! change across versions — downstream consumers key behavior (for example
//! "fail the test run on any error") off specific ids.

use crate::exchange::Part;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Ordered severity classification: debug < comment < error < fatal.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Comment,
    Error,
    Fatal,
}

impl Severity {
    /// Single-letter form used by the text report.
    pub fn letter(self) -> char {
        match self {
            Severity::Debug => 'D',
            Severity::Comment => 'C',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
        }
    }
}

/// What a notice is about.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Exchange,
    Request,
    Response,
    Field { part: Part, name: String },
}

impl Subject {
    /// The side of the exchange this subject reports under, if any.
    pub fn part(&self) -> Option<Part> {
        match self {
            Subject::Exchange => None,
            Subject::Request => Some(Part::Request),
            Subject::Response => Some(Part::Response),
            Subject::Field { part, .. } => Some(*part),
        }
    }
}

/// One conformance finding. Parameters are structured data for the message
/// template; rendering is a presentation concern (`NoticeCatalog::render`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u16,
    pub severity: Severity,
    pub subject: Subject,
    pub params: BTreeMap<String, String>,
}

/// Catalog entry: severity is fixed per id, never computed from content.
#[derive(Debug, Clone, Copy)]
pub struct NoticeSpec {
    pub id: u16,
    pub severity: Severity,
    pub template: &'static str,
}

const fn spec(id: u16, severity: Severity, template: &'static str) -> NoticeSpec {
    NoticeSpec {
        id,
        severity,
        template,
    }
}

/// The built-in notice catalog. Append-only: ids are never reused or
/// reassigned a different meaning.
pub const BUILTIN_NOTICES: &[NoticeSpec] = &[
    spec(
        1000,
        Severity::Error,
        "Header {field} value does not conform to its grammar",
    ),
    spec(
        1006,
        Severity::Comment,
        "Header {field} value contains non-ASCII bytes",
    ),
    spec(
        1007,
        Severity::Comment,
        "Header {field} value exceeds {limit} bytes",
    ),
    spec(
        1013,
        Severity::Error,
        "Header {field} must not occur more than once",
    ),
    spec(1021, Severity::Error, "Method '{method}' is not a valid token"),
    spec(
        1022,
        Severity::Comment,
        "Method '{method}' differs from '{expected}' only in case",
    ),
    spec(1038, Severity::Error, "Body does not parse as {media_type}"),
    spec(1107, Severity::Error, "Header {field} is not a valid HTTP date"),
    spec(
        1108,
        Severity::Error,
        "Header {field} value '{value}' is not a non-negative integer",
    ),
    spec(1110, Severity::Error, "Content-Type header is malformed"),
    spec(
        1112,
        Severity::Error,
        "Cache-Control directive '{directive}' is malformed",
    ),
    spec(
        1152,
        Severity::Comment,
        "Header name {field} uses the deprecated 'X-' prefix",
    ),
    spec(1153, Severity::Comment, "Request has no User-Agent header"),
    spec(1154, Severity::Comment, "Response has no Date header"),
    spec(
        1160,
        Severity::Comment,
        "Pragma in a response has no defined meaning",
    ),
    spec(1161, Severity::Comment, "The Warning header is obsolete"),
    spec(
        1164,
        Severity::Error,
        "Date plus Age implies a generation time {seconds} seconds in the future",
    ),
    spec(
        1167,
        Severity::Error,
        "Status code {status} is outside the valid range",
    ),
    spec(1999, Severity::Debug, "Check {check} failed internally"),
];

/// Read-only catalog constructed once at startup and threaded into the
/// engine — never ambient global state.
#[derive(Debug, Clone)]
pub struct NoticeCatalog {
    by_id: HashMap<u16, NoticeSpec>,
}

impl NoticeCatalog {
    /// Build a catalog, rejecting duplicate ids at construction time.
    pub fn new(specs: &[NoticeSpec]) -> anyhow::Result<Self> {
        let mut by_id = HashMap::with_capacity(specs.len());
        for s in specs {
            if by_id.insert(s.id, *s).is_some() {
                bail!("duplicate notice id {} in catalog", s.id);
            }
        }
        Ok(Self { by_id })
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::new(BUILTIN_NOTICES)
    }

    pub fn severity(&self, id: u16) -> Option<Severity> {
        self.by_id.get(&id).map(|s| s.severity)
    }

    pub fn template(&self, id: u16) -> Option<&'static str> {
        self.by_id.get(&id).map(|s| s.template)
    }

    /// Render a notice's message from its template and parameters.
    /// Placeholders without a matching parameter are left verbatim.
    pub fn render(&self, notice: &Notice) -> String {
        let Some(template) = self.template(notice.id) else {
            return format!("unknown notice {}", notice.id);
        };
        let mut msg = template.to_string();
        for (key, value) in &notice.params {
            msg = msg.replace(&format!("{{{}}}", key), value);
        }
        msg
    }
}
