// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Derived facts: values one check publishes for later checks to read.
//!
//! Facts are scoped to a single exchange analysis and write-once per key.
//! Reads are soft dependencies — a missing fact means the reader skips or
//! degrades, never fails. A second write of the same key is a programming
//! error surfaced as a hard error, not a conformance notice.

use crate::exchange::Part;
use anyhow::bail;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

pub type FactKey = &'static str;

/// Fact keys used by the built-in checks.
pub mod keys {
    use super::FactKey;

    /// Date-typed fields whose grammar problems were already reported.
    pub const EXPLAINED_DATES: FactKey = "explained_dates";
    /// Integer-typed fields whose grammar problems were already reported.
    pub const EXPLAINED_NUMERICS: FactKey = "explained_numerics";
    /// Content-Type fields already reported or consumed.
    pub const EXPLAINED_MEDIA: FactKey = "explained_media";
    /// Cache-Control fields already reported.
    pub const EXPLAINED_CACHE: FactKey = "explained_cache";
    /// The final charset of the response body, lowercased.
    pub const BODY_CHARSET: FactKey = "body_charset";
    /// The response generation instant implied by Date plus Age.
    pub const GENERATION_TIME: FactKey = "generation_time";
}

#[derive(Debug, Clone, PartialEq)]
pub enum FactValue {
    Flag,
    Text(String),
    Time(DateTime<Utc>),
    /// Set of field references (see [`field_ref`]).
    FieldSet(BTreeSet<String>),
}

/// Canonical reference for a field within an exchange, used in `FieldSet`
/// facts: `"request:expires"`, `"response:age"`.
pub fn field_ref(part: Part, name: &str) -> String {
    format!("{}:{}", part, name.to_ascii_lowercase())
}

/// Write-once fact storage for one analysis run.
#[derive(Debug, Default)]
pub struct FactMap {
    map: HashMap<FactKey, FactValue>,
}

impl FactMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a fact. Duplicate writes of the same key fail hard — the
    /// registry validates one writer per key, so this only triggers on a
    /// check writing its own key twice.
    pub fn publish(&mut self, key: FactKey, value: FactValue) -> anyhow::Result<()> {
        if self.map.contains_key(key) {
            bail!("fact key '{}' written twice", key);
        }
        self.map.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: FactKey) -> Option<&FactValue> {
        self.map.get(key)
    }

    /// Convenience accessor for `FieldSet` facts; absent key reads as an
    /// empty set reference.
    pub fn field_set(&self, key: FactKey) -> Option<&BTreeSet<String>> {
        match self.map.get(key) {
            Some(FactValue::FieldSet(set)) => Some(set),
            _ => None,
        }
    }

    /// True when any of the given `FieldSet` facts contains the reference.
    pub fn is_explained(&self, keys: &[FactKey], reference: &str) -> bool {
        keys.iter()
            .filter_map(|k| self.field_set(k))
            .any(|set| set.contains(reference))
    }

    pub fn text(&self, key: FactKey) -> Option<&str> {
        match self.map.get(key) {
            Some(FactValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}
