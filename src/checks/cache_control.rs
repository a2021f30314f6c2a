// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{wire_spelling, Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::exchange::{Fielded, Part};
use crate::facts::{field_ref, keys, FactKey, FactValue};
use crate::fields::cache_control;
use crate::notice::Subject;
use std::collections::BTreeSet;

/// Validate Cache-Control directive syntax, naming the first offending
/// directive. Claims the field from the generic grammar check.
pub struct CacheControlDirectives;

impl Check for CacheControlDirectives {
    fn name(&self) -> &'static str {
        "cache_control"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn writes(&self) -> &'static [FactKey] {
        &[keys::EXPLAINED_CACHE]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let mut explained = BTreeSet::new();
        for part in PARTS {
            let Some(joined) = joined_raw(cx, part) else {
                continue;
            };
            explained.insert(field_ref(part, "cache-control"));
            if let Err(directive) = cache_control::parse(&joined) {
                let spelling = wire_spelling(cx, part, "cache-control");
                cx.notify_with(
                    1112,
                    Subject::Field {
                        part,
                        name: spelling,
                    },
                    &[("directive", directive)],
                )?;
            }
        }
        cx.publish(keys::EXPLAINED_CACHE, FactValue::FieldSet(explained))
    }
}

/// Comma-join all raw occurrences, the list-combination rule the parser
/// registry applies; done here directly so the error can name a directive.
fn joined_raw(cx: &Analysis<'_>, part: Part) -> Option<String> {
    let values: Vec<String> = match part {
        Part::Request => cx
            .request()?
            .field_entries("cache-control")
            .map(|f| f.value_text())
            .collect(),
        Part::Response => cx
            .response()?
            .field_entries("cache-control")
            .map(|f| f.value_text())
            .collect(),
    };
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}
