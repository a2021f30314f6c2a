// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::fields::{self, FieldKind};
use crate::notice::Subject;

/// Singleton fields occurring more than once. The parser only ever reads
/// the first occurrence; the duplicates themselves are the conformance
/// problem and are reported here, once per field name.
pub struct SingletonRepeated;

impl Check for SingletonRepeated {
    fn name(&self) -> &'static str {
        "singleton_repeated"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        for part in PARTS {
            let Some(fields) = cx.exchange().part_fields(part) else {
                continue;
            };
            let mut seen: Vec<String> = Vec::new();
            let mut reported: Vec<String> = Vec::new();
            for field in fields {
                let lowered = field.name.lowered();
                if fields::descriptor(&lowered).kind != FieldKind::Singleton {
                    continue;
                }
                if seen.contains(&lowered) {
                    if !reported.contains(&lowered) {
                        reported.push(lowered.clone());
                        let name = field.name.as_str().to_string();
                        cx.notify_with(
                            1013,
                            Subject::Field {
                                part,
                                name: name.clone(),
                            },
                            &[("field", name)],
                        )?;
                    }
                } else {
                    seen.push(lowered);
                }
            }
        }
        Ok(())
    }
}
