// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::facts::{field_ref, keys, FactKey};
use crate::fields;
use crate::notice::Subject;

const EXPLAINED: &[FactKey] = &[
    keys::EXPLAINED_DATES,
    keys::EXPLAINED_NUMERICS,
    keys::EXPLAINED_MEDIA,
    keys::EXPLAINED_CACHE,
];

/// The generic grammar check: any field whose parser returned `Malformed`
/// and that no more specific check has already explained.
///
/// Also flags raw-value hygiene problems — non-ASCII bytes and values over
/// the configured length ceiling — which are reported instead of, not in
/// addition to, the generic grammar notice for the same field.
pub struct FieldGrammar;

impl Check for FieldGrammar {
    fn name(&self) -> &'static str {
        "field_grammar"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn reads(&self) -> &'static [FactKey] {
        EXPLAINED
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let max_len = cx.options().max_field_length;
        for part in PARTS {
            let Some(fields) = cx.exchange().part_fields(part) else {
                continue;
            };

            // Raw hygiene first, per occurrence.
            let mut raw_flagged: Vec<String> = Vec::new();
            let mut hygiene: Vec<(u16, String, String)> = Vec::new();
            for field in fields {
                let issues = fields::raw_issues(field, max_len);
                let name = field.name.as_str().to_string();
                if issues.non_ascii {
                    raw_flagged.push(field.name.lowered());
                    hygiene.push((1006, name.clone(), String::new()));
                }
                if issues.overlong {
                    hygiene.push((1007, name, max_len.to_string()));
                }
            }
            for (id, name, limit) in hygiene {
                let mut params = vec![("field", name.clone())];
                if !limit.is_empty() {
                    params.push(("limit", limit));
                }
                cx.notify_with(id, Subject::Field { part, name }, &params)?;
            }

            // Grammar, per distinct name, skipping explained fields and
            // fields whose root cause is already the raw non-ASCII notice.
            let mut seen: Vec<String> = Vec::new();
            let names: Vec<(String, String)> = fields
                .iter()
                .map(|f| (f.name.lowered(), f.name.as_str().to_string()))
                .collect();
            for (lowered, original) in names {
                if seen.contains(&lowered) || raw_flagged.contains(&lowered) {
                    continue;
                }
                seen.push(lowered.clone());
                if cx.facts().is_explained(EXPLAINED, &field_ref(part, &lowered)) {
                    continue;
                }
                let Some(parsed) = cx.parsed(part, &lowered) else {
                    continue;
                };
                if parsed.is_malformed() {
                    cx.notify_with(
                        1000,
                        Subject::Field {
                            part,
                            name: original.clone(),
                        },
                        &[("field", original)],
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::date_fields::DateFields;
    use crate::exchange::{Exchange, HeaderField, Part};
    use crate::test_helpers::{fixed_observed_at, make_exchange, make_response, run_check, run_checks};

    #[test]
    fn malformed_unclaimed_field_is_reported_generically() {
        let ex = make_exchange(&[], &[("Vary", "not a token list !!;")]);
        let notices = run_check(&FieldGrammar, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1000);
        assert_eq!(
            notices[0].params.get("field").map(String::as_str),
            Some("Vary")
        );
    }

    #[test]
    fn explained_field_is_not_double_reported() {
        // DateFields claims Expires; the generic check must stay quiet.
        let ex = make_exchange(&[], &[("Expires", "not-a-date")]);
        let notices = run_checks(&[&DateFields, &FieldGrammar], &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1107);
    }

    #[test]
    fn without_the_specific_check_the_generic_one_fires() {
        let ex = make_exchange(&[], &[("Expires", "not-a-date")]);
        let notices = run_check(&FieldGrammar, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1000);
    }

    #[test]
    fn non_ascii_value_gets_dedicated_notice_only() {
        let mut resp = make_response(200, &[]);
        resp.headers
            .push(HeaderField::new("ETag", vec![0xc3, 0xa9, 0x21]));
        let ex = Exchange::response_only(resp, fixed_observed_at());
        let notices = run_check(&FieldGrammar, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1006);
        assert_eq!(notices[0].subject.part(), Some(Part::Response));
    }

    #[test]
    fn overlong_value_is_flagged_with_limit() {
        let long = "a".repeat(5000);
        let ex = make_exchange(&[], &[("Server", long.as_str())]);
        let notices = run_check(&FieldGrammar, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, 1007);
        assert_eq!(
            notices[0].params.get("limit").map(String::as_str),
            Some("4096")
        );
    }

    #[test]
    fn well_formed_fields_are_quiet() {
        let ex = make_exchange(
            &[("Accept", "text/html, */*;q=0.5"), ("Host", "example.org")],
            &[("Vary", "accept"), ("ETag", "\"v1\"")],
        );
        assert!(run_check(&FieldGrammar, &ex).is_empty());
    }
}
