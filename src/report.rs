// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Plain-text rendering of analysis results.
//!
//! Presentation only: consumes the engine's already-ordered notice
//! sequence and an immutable exchange, writes to any `fmt::Write`.

use std::fmt::Write;

use crate::exchange::{Exchange, Part};
use crate::notice::{Notice, NoticeCatalog, Subject};

const DIVIDER: &str = "================================";

/// Render one analyzed exchange as a human-readable block.
///
/// The request line is prefixed `>>`, the response line `<<`. Each notice
/// renders as `<severity-letter> <id> <message>`, grouped under the side
/// it concerns; exchange-level notices come last.
pub fn render_text(
    exchange: &Exchange,
    notices: &[Notice],
    catalog: &NoticeCatalog,
    out: &mut impl Write,
) -> std::fmt::Result {
    writeln!(out, "{DIVIDER}")?;

    if let Some(req) = &exchange.request {
        writeln!(out, ">> {} {} {}", req.method, req.target, req.version)?;
        for notice in notices {
            if concerns(notice, Part::Request) {
                write_notice(notice, catalog, out)?;
            }
        }
    }

    if let Some(resp) = &exchange.response {
        if resp.reason.is_empty() {
            writeln!(out, "<< {} {}", resp.version, resp.status)?;
        } else {
            writeln!(out, "<< {} {} {}", resp.version, resp.status, resp.reason)?;
        }
        for notice in notices {
            if concerns(notice, Part::Response) {
                write_notice(notice, catalog, out)?;
            }
        }
    }

    for notice in notices {
        if notice.subject == Subject::Exchange {
            write_notice(notice, catalog, out)?;
        }
    }

    Ok(())
}

fn concerns(notice: &Notice, part: Part) -> bool {
    notice.subject.part() == Some(part)
}

fn write_notice(
    notice: &Notice,
    catalog: &NoticeCatalog,
    out: &mut impl Write,
) -> std::fmt::Result {
    writeln!(
        out,
        "{} {} {}",
        notice.severity.letter(),
        notice.id,
        catalog.render(notice)
    )
}
