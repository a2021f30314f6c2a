// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check, PARTS};
use crate::engine::Analysis;
use crate::exchange::Part;
use crate::notice::Subject;

/// Fields that current HTTP revisions have deprecated or never defined in
/// the position they appear. `Pragma` was only ever a request directive;
/// `Warning` was dropped entirely by RFC 9111.
pub struct ObsoleteHeaders;

impl Check for ObsoleteHeaders {
    fn name(&self) -> &'static str {
        "obsolete_headers"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Exchange
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        for part in PARTS {
            let Some(fields) = cx.exchange().part_fields(part) else {
                continue;
            };
            let mut pragma_reported = false;
            let mut warning_reported = false;
            for field in fields {
                if part == Part::Response && field.name == "pragma" && !pragma_reported {
                    pragma_reported = true;
                    cx.notify(
                        1160,
                        Subject::Field {
                            part,
                            name: field.name.as_str().to_string(),
                        },
                    )?;
                }
                if field.name == "warning" && !warning_reported {
                    warning_reported = true;
                    cx.notify(
                        1161,
                        Subject::Field {
                            part,
                            name: field.name.as_str().to_string(),
                        },
                    )?;
                }
            }
        }
        Ok(())
    }
}
