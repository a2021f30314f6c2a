// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::exchange::Fielded;
use crate::notice::Subject;

/// Origin servers with a clock must send Date (RFC 9110 §6.6.1). Absence
/// alone never blocks analysis; it earns a comment.
pub struct ResponseDatePresent;

impl Check for ResponseDatePresent {
    fn name(&self) -> &'static str {
        "response_date"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Response
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let Some(resp) = cx.response() else {
            return Ok(());
        };
        // 1xx responses are exempt from the Date requirement.
        if !resp.is_informational() && !resp.has_field("date") {
            cx.notify(1154, Subject::Response)?;
        }
        Ok(())
    }
}
