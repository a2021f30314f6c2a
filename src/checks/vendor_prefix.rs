// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::notice::Subject;

/// Flag header names carrying the deprecated `X-` vendor prefix
/// (RFC 6648). One notice per field occurrence name, on either side.
pub struct VendorPrefix;

impl Check for VendorPrefix {
    fn name(&self) -> &'static str {
        "vendor_prefix"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        for part in PARTS {
            let Some(fields) = cx.exchange().part_fields(part) else {
                continue;
            };
            let names: Vec<String> = fields
                .iter()
                .filter(|f| {
                    f.name.lowered().starts_with("x-") && !is_entrenched(&f.name.lowered())
                })
                .map(|f| f.name.as_str().to_string())
                .collect();
            for name in names {
                cx.notify_with(
                    1152,
                    Subject::Field {
                        part,
                        name: name.clone(),
                    },
                    &[("field", name)],
                )?;
            }
        }
        Ok(())
    }
}

/// Prefixed names so widely deployed that renaming them would do more harm
/// than good; RFC 6648 deprecates the convention, not these fields.
fn is_entrenched(lowered: &str) -> bool {
    matches!(
        lowered,
        "x-forwarded-for" | "x-forwarded-host" | "x-forwarded-proto" | "x-frame-options"
            | "x-content-type-options" | "x-requested-with" | "x-xss-protection"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::Part;
    use crate::test_helpers::{make_exchange, run_check};
    use rstest::rstest;

    #[test]
    fn one_notice_per_prefixed_field() {
        let ex = make_exchange(
            &[],
            &[
                ("X-Photo-Farm", "4"),
                ("X-Photo-Origin", "cdn-3"),
                ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ],
        );
        let notices = run_check(&VendorPrefix, &ex);
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.id == 1152));
        assert_eq!(
            notices[0].params.get("field").map(String::as_str),
            Some("X-Photo-Farm")
        );
        assert_eq!(
            notices[1].params.get("field").map(String::as_str),
            Some("X-Photo-Origin")
        );
    }

    #[test]
    fn request_side_fields_are_flagged_too() {
        let ex = make_exchange(&[("x-api-key", "s3cret")], &[]);
        let notices = run_check(&VendorPrefix, &ex);
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0].subject,
            Subject::Field {
                part: Part::Request,
                name: "x-api-key".to_string()
            }
        );
    }

    #[rstest]
    #[case("X-Frame-Options")]
    #[case("x-forwarded-for")]
    #[case("X-Content-Type-Options")]
    fn entrenched_names_are_not_flagged(#[case] name: &str) {
        let ex = make_exchange(&[], &[(name, "v")]);
        assert!(run_check(&VendorPrefix, &ex).is_empty());
    }

    #[test]
    fn unprefixed_names_are_quiet() {
        let ex = make_exchange(&[("Accept", "*/*")], &[("ETag", "\"a\"")]);
        assert!(run_check(&VendorPrefix, &ex).is_empty());
    }
}
