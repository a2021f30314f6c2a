// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{display_name, wire_spelling, Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::facts::{field_ref, keys, FactKey, FactValue};
use crate::fields::FieldValue;
use crate::notice::Subject;
use std::collections::BTreeSet;

const DATE_FIELDS: &[&str] = &[
    "date",
    "expires",
    "last-modified",
    "if-modified-since",
    "if-unmodified-since",
    "retry-after",
];

/// Validate every date-typed field against the HTTP-date grammar.
/// Retry-After also accepts its delta-seconds form.
///
/// More specific than the generic grammar check: it claims these fields by
/// publishing the explained-set fact, so a malformed `Expires` is reported
/// exactly once, as a bad date.
pub struct DateFields;

impl Check for DateFields {
    fn name(&self) -> &'static str {
        "date_fields"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn writes(&self) -> &'static [FactKey] {
        &[keys::EXPLAINED_DATES]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let mut explained = BTreeSet::new();
        for part in PARTS {
            for &name in DATE_FIELDS {
                let Some(parsed) = cx.parsed(part, name) else {
                    continue;
                };
                explained.insert(field_ref(part, name));
                if matches!(*parsed, FieldValue::Malformed) {
                    let spelling = wire_spelling(cx, part, name);
                    cx.notify_with(
                        1107,
                        Subject::Field {
                            part,
                            name: spelling,
                        },
                        &[("field", display_name(name))],
                    )?;
                }
            }
        }
        cx.publish(keys::EXPLAINED_DATES, FactValue::FieldSet(explained))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_exchange, run_check};
    use rstest::rstest;

    #[rstest]
    #[case("Expires", "not-a-date", true)]
    #[case("Expires", "Wed, 21 Oct 2015 07:28:00 GMT", false)]
    #[case("Last-Modified", "yesterday", true)]
    #[case("Date", "Wed, 21 Oct 2015 07:28:00 GMT", false)]
    #[case("Retry-After", "120", false)]
    #[case("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT", false)]
    #[case("Retry-After", "soon", true)]
    fn response_date_grammar_cases(
        #[case] field: &str,
        #[case] value: &str,
        #[case] expect_notice: bool,
    ) {
        let ex = make_exchange(&[], &[(field, value)]);
        let notices = run_check(&DateFields, &ex);
        if expect_notice {
            assert_eq!(notices.len(), 1, "expected one notice for {field}: {value}");
            assert_eq!(notices[0].id, 1107);
            assert_eq!(
                notices[0].params.get("field").map(String::as_str),
                Some(field)
            );
        } else {
            assert!(notices.is_empty());
        }
    }

    #[test]
    fn request_conditional_dates_are_checked() {
        let ex = make_exchange(&[("If-Modified-Since", "garbage")], &[]);
        let notices = run_check(&DateFields, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1107);
    }

    #[test]
    fn malformed_expires_yields_exactly_one_notice() {
        let ex = make_exchange(&[], &[("Expires", "0"), ("Date", "also bad")]);
        let notices = run_check(&DateFields, &ex);
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.id == 1107));
    }

    #[test]
    fn subject_keeps_the_wire_spelling() {
        let ex = make_exchange(&[], &[("EXPIRES", "garbage")]);
        let notices = run_check(&DateFields, &ex);
        assert_eq!(
            notices[0].subject,
            Subject::Field {
                part: crate::exchange::Part::Response,
                name: "EXPIRES".to_string(),
            }
        );
        // The message parameter stays in canonical display case.
        assert_eq!(
            notices[0].params.get("field").map(String::as_str),
            Some("Expires")
        );
    }

    #[test]
    fn absent_fields_publish_empty_explained_set() {
        // The fact must exist even with nothing to explain, so readers can
        // rely on the schedule rather than probing for the writer.
        let ex = make_exchange(&[], &[]);
        let notices = run_check(&DateFields, &ex);
        assert!(notices.is_empty());
    }
}
