// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::notice::Subject;

/// Status codes are three digits, 100 through 599. Anything outside that
/// range is not HTTP, whatever the wire said.
pub struct StatusCodeRange;

impl Check for StatusCodeRange {
    fn name(&self) -> &'static str {
        "status_code"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Response
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let Some(resp) = cx.response() else {
            return Ok(());
        };
        let status = resp.status;
        if !(100..=599).contains(&status) {
            cx.notify_with(1167, Subject::Response, &[("status", status.to_string())])?;
        }
        Ok(())
    }
}
