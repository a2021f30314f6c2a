// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::exchange::Fielded;
use crate::notice::Subject;

/// Requests should identify their client. Absence is worth a comment, not
/// an error — plenty of legitimate tooling omits it.
pub struct UserAgentPresent;

impl Check for UserAgentPresent {
    fn name(&self) -> &'static str {
        "user_agent"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Request
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let Some(req) = cx.request() else {
            return Ok(());
        };
        if !req.has_field("user-agent") {
            cx.notify(1153, Subject::Request)?;
        }
        Ok(())
    }
}
