// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Rule engine: schedules registered checks over one exchange and collects
//! the ordered notice sequence.
//!
//! The registry is built once at startup. Construction validates the fact
//! dependency graph (one writer per key, no cycles); after that it is
//! read-only and shareable across threads, so distinct exchanges can be
//! analyzed in parallel with no synchronization.

use crate::checks::{Applicability, Check, CHECKS};
use crate::exchange::{Exchange, HeaderField, Part, Request, Response};
use crate::facts::{FactKey, FactMap, FactValue};
use crate::fields::{self, FieldValue};
use crate::notice::{Notice, NoticeCatalog, Severity, Subject};
use crate::options::AnalysisOptions;
use anyhow::{anyhow, bail};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Per-exchange analysis context handed to each check: read access to the
/// exchange, the memoized parsed-field cache, the fact map, and the notice
/// sink. Created per analyzed exchange and discarded with it.
pub struct Analysis<'a> {
    exchange: &'a Exchange,
    catalog: &'a NoticeCatalog,
    options: &'a AnalysisOptions,
    parsed: HashMap<(Part, String), Arc<FieldValue>>,
    facts: FactMap,
    notices: Vec<Notice>,
}

impl<'a> Analysis<'a> {
    pub fn new(
        exchange: &'a Exchange,
        catalog: &'a NoticeCatalog,
        options: &'a AnalysisOptions,
    ) -> Self {
        Self {
            exchange,
            catalog,
            options,
            parsed: HashMap::new(),
            facts: FactMap::new(),
            notices: Vec::new(),
        }
    }

    pub fn exchange(&self) -> &'a Exchange {
        self.exchange
    }

    pub fn request(&self) -> Option<&'a Request> {
        self.exchange.request.as_ref()
    }

    pub fn response(&self) -> Option<&'a Response> {
        self.exchange.response.as_ref()
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.exchange.observed_at
    }

    pub fn options(&self) -> &AnalysisOptions {
        self.options
    }

    /// Structured value of a field, parsing on first access and memoizing
    /// for the rest of this analysis. `None` when the side or the field is
    /// absent; grammar violations come back as `FieldValue::Malformed`.
    pub fn parsed(&mut self, part: Part, name: &str) -> Option<Arc<FieldValue>> {
        let key = (part, name.to_ascii_lowercase());
        if let Some(v) = self.parsed.get(&key) {
            return Some(Arc::clone(v));
        }
        let fields = self.exchange.part_fields(part)?;
        let entries: Vec<&HeaderField> = fields.iter().filter(|f| f.name == *name).collect();
        if entries.is_empty() {
            return None;
        }
        let value = Arc::new(fields::parse_entries(&fields::descriptor(name), &entries));
        self.parsed.insert(key, Arc::clone(&value));
        Some(value)
    }

    /// Publish a derived fact for downstream checks. Write-once per key.
    pub fn publish(&mut self, key: FactKey, value: FactValue) -> anyhow::Result<()> {
        self.facts.publish(key, value)
    }

    pub fn facts(&self) -> &FactMap {
        &self.facts
    }

    /// Record a notice without parameters.
    pub fn notify(&mut self, id: u16, subject: Subject) -> anyhow::Result<()> {
        self.notify_with(id, subject, &[])
    }

    /// Record a notice. Severity comes from the catalog — fixed per id —
    /// so an id missing from the catalog is a programming error.
    pub fn notify_with(
        &mut self,
        id: u16,
        subject: Subject,
        params: &[(&str, String)],
    ) -> anyhow::Result<()> {
        let severity = self
            .catalog
            .severity(id)
            .ok_or_else(|| anyhow!("notice id {} not present in catalog", id))?;
        let params: BTreeMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.notices.push(Notice {
            id,
            severity,
            subject,
            params,
        });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_notices(self) -> Vec<Notice> {
        self.notices
    }
}

/// The process-wide check registry plus its evaluation schedule.
pub struct Registry {
    checks: &'static [&'static dyn Check],
    schedule: Vec<usize>,
    catalog: NoticeCatalog,
    options: AnalysisOptions,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Build a registry over the built-in checks and catalog.
    pub fn builtin(options: AnalysisOptions) -> anyhow::Result<Self> {
        Self::new(CHECKS, NoticeCatalog::builtin()?, options)
    }

    /// Build a registry, validating the fact graph: every key has at most
    /// one writer, and writer→reader edges form no cycle. Both are
    /// configuration errors that fail here, at startup — never mid-analysis.
    pub fn new(
        checks: &'static [&'static dyn Check],
        catalog: NoticeCatalog,
        options: AnalysisOptions,
    ) -> anyhow::Result<Self> {
        let mut writer: HashMap<FactKey, usize> = HashMap::new();
        for (i, check) in checks.iter().enumerate() {
            for &key in check.writes() {
                if let Some(prev) = writer.insert(key, i) {
                    bail!(
                        "fact key '{}' has two writers: '{}' and '{}'",
                        key,
                        checks[prev].name(),
                        check.name()
                    );
                }
            }
        }

        // Readers wait for writers: edge writer -> reader. Reads with no
        // registered writer are soft and impose no ordering.
        let mut edges: Vec<HashSet<usize>> = vec![HashSet::new(); checks.len()];
        let mut indegree = vec![0usize; checks.len()];
        for (i, check) in checks.iter().enumerate() {
            for &key in check.reads() {
                if let Some(&w) = writer.get(key) {
                    if w != i && edges[w].insert(i) {
                        indegree[i] += 1;
                    }
                }
            }
        }

        // Kahn's algorithm, stable by registration index for determinism.
        let mut schedule = Vec::with_capacity(checks.len());
        let mut placed = vec![false; checks.len()];
        while schedule.len() < checks.len() {
            let next = (0..checks.len()).find(|&i| !placed[i] && indegree[i] == 0);
            let Some(i) = next else {
                let stuck: Vec<&str> = (0..checks.len())
                    .filter(|&i| !placed[i])
                    .map(|i| checks[i].name())
                    .collect();
                bail!("fact dependency cycle among checks: {}", stuck.join(", "));
            };
            placed[i] = true;
            schedule.push(i);
            for &r in &edges[i] {
                indegree[r] -= 1;
            }
        }

        Ok(Self {
            checks,
            schedule,
            catalog,
            options,
        })
    }

    pub fn catalog(&self) -> &NoticeCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze one exchange: evaluate every applicable check in dependency
    /// order and return the ordered notice sequence.
    ///
    /// Total and deterministic: a check that fails or panics is isolated
    /// behind a debug-severity diagnostic and the remaining checks still
    /// run; identical exchange content yields an identical sequence.
    pub fn analyze(&self, exchange: &Exchange) -> Vec<Notice> {
        let span = tracing::debug_span!("analyze");
        let _guard = span.enter();

        let mut cx = Analysis::new(exchange, &self.catalog, &self.options);
        for &i in &self.schedule {
            let check = self.checks[i];
            let applicable = match check.applies_to() {
                Applicability::Request => exchange.request.is_some(),
                Applicability::Response => exchange.response.is_some(),
                Applicability::Exchange => true,
            };
            if !applicable {
                continue;
            }

            let before = cx.notices.len();
            let outcome = catch_unwind(AssertUnwindSafe(|| check.run(&mut cx)));
            // Within one check's emission batch, ascending id keeps the
            // sequence stable; discovery order orders the batches.
            cx.notices[before..].sort_by_key(|n| n.id);

            let failed = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(format!("{:#}", e)),
                Err(_) => Some("panic".to_string()),
            };
            if let Some(reason) = failed {
                tracing::error!(check = check.name(), reason = %reason, "check failed; continuing");
                cx.notices.push(Notice {
                    id: 1999,
                    severity: self.catalog.severity(1999).unwrap_or(Severity::Debug),
                    subject: Subject::Exchange,
                    params: BTreeMap::from([("check".to_string(), check.name().to_string())]),
                });
            }
        }
        tracing::debug!(notices = cx.notices.len(), "analysis complete");
        cx.notices
    }
}
