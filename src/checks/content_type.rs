// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{wire_spelling, Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::exchange::Part;
use crate::facts::{field_ref, keys, FactKey, FactValue};
use crate::fields::FieldValue;
use crate::notice::Subject;
use std::collections::BTreeSet;

/// Validate Content-Type syntax and derive the final body charset for
/// downstream body checks.
pub struct ContentTypeWellFormed;

impl Check for ContentTypeWellFormed {
    fn name(&self) -> &'static str {
        "content_type"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn writes(&self) -> &'static [FactKey] {
        &[keys::EXPLAINED_MEDIA, keys::BODY_CHARSET]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let mut explained = BTreeSet::new();
        let mut charset: Option<String> = None;

        for part in PARTS {
            let Some(parsed) = cx.parsed(part, "content-type") else {
                continue;
            };
            explained.insert(field_ref(part, "content-type"));
            match &*parsed {
                FieldValue::Malformed => {
                    let spelling = wire_spelling(cx, part, "content-type");
                    cx.notify(
                        1110,
                        Subject::Field {
                            part,
                            name: spelling,
                        },
                    )?;
                }
                FieldValue::MediaType(mt) if part == Part::Response => {
                    charset = mt.charset();
                }
                _ => {}
            }
        }

        cx.publish(keys::EXPLAINED_MEDIA, FactValue::FieldSet(explained))?;
        if let Some(charset) = charset {
            cx.publish(keys::BODY_CHARSET, FactValue::Text(charset))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;
    use crate::test_helpers::{make_exchange, run_check};
    use rstest::rstest;

    fn ids(notices: &[Notice]) -> Vec<u16> {
        notices.iter().map(|n| n.id).collect()
    }

    #[rstest]
    #[case("text/html; charset=utf-8", false)]
    #[case("application/json", false)]
    #[case("nonsense", true)]
    #[case("text/; charset=utf-8", true)]
    fn content_type_grammar_cases(#[case] value: &str, #[case] bad: bool) {
        let ex = make_exchange(&[], &[("Content-Type", value)]);
        let notices = run_check(&ContentTypeWellFormed, &ex);
        if bad {
            assert_eq!(ids(&notices), vec![1110]);
        } else {
            assert!(notices.is_empty());
        }
    }

    #[test]
    fn request_content_type_is_also_checked() {
        let ex = make_exchange(&[("Content-Type", "broken")], &[]);
        let notices = run_check(&ContentTypeWellFormed, &ex);
        assert_eq!(ids(&notices), vec![1110]);
        assert_eq!(
            notices[0].subject,
            Subject::Field {
                part: Part::Request,
                name: "Content-Type".to_string()
            }
        );
    }
}
