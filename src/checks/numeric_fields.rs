// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{display_name, wire_spelling, Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::exchange::{Fielded, Part};
use crate::facts::{field_ref, keys, FactKey, FactValue};
use crate::fields::FieldValue;
use crate::notice::Subject;
use std::collections::BTreeSet;

const NUMERIC_FIELDS: &[&str] = &["age", "content-length", "max-forwards"];

/// Validate delta-seconds and count fields: non-negative integers only.
/// Claims these fields from the generic grammar check via the explained set.
pub struct NumericFields;

impl Check for NumericFields {
    fn name(&self) -> &'static str {
        "numeric_fields"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn writes(&self) -> &'static [FactKey] {
        &[keys::EXPLAINED_NUMERICS]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let mut explained = BTreeSet::new();
        for part in PARTS {
            for &name in NUMERIC_FIELDS {
                let Some(parsed) = cx.parsed(part, name) else {
                    continue;
                };
                explained.insert(field_ref(part, name));
                if matches!(*parsed, FieldValue::Malformed) {
                    let raw = first_raw_value(cx, part, name);
                    let spelling = wire_spelling(cx, part, name);
                    cx.notify_with(
                        1108,
                        Subject::Field {
                            part,
                            name: spelling,
                        },
                        &[("field", display_name(name)), ("value", raw)],
                    )?;
                }
            }
        }
        cx.publish(keys::EXPLAINED_NUMERICS, FactValue::FieldSet(explained))
    }
}

fn first_raw_value(cx: &Analysis<'_>, part: Part, name: &str) -> String {
    let message = match part {
        Part::Request => cx.request().map(|r| r.field_entries(name).next()),
        Part::Response => cx.response().map(|r| r.field_entries(name).next()),
    };
    message
        .flatten()
        .map(|f| f.value_text().trim().to_string())
        .unwrap_or_default()
}
