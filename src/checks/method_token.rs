// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::fields::grammar::is_token;
use crate::notice::Subject;

/// Request method syntax. Methods are tokens and case-sensitive; `get` is
/// a different (unregistered) method than `GET`, which is almost never what
/// the sender meant.
pub struct MethodToken;

const WELL_KNOWN: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
];

impl Check for MethodToken {
    fn name(&self) -> &'static str {
        "method_token"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Request
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let Some(req) = cx.request() else {
            return Ok(());
        };
        let method = req.method.clone();

        if !is_token(&method) {
            cx.notify_with(1021, Subject::Request, &[("method", method)])?;
            return Ok(());
        }

        if !WELL_KNOWN.contains(&method.as_str()) {
            if let Some(expected) = WELL_KNOWN
                .iter()
                .find(|known| known.eq_ignore_ascii_case(&method))
            {
                cx.notify_with(
                    1022,
                    Subject::Request,
                    &[("method", method), ("expected", expected.to_string())],
                )?;
            }
        }
        Ok(())
    }
}
