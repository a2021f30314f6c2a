// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::exchange::Part;
use crate::facts::{field_ref, keys, FactKey};
use crate::notice::Subject;

/// Content-Type/body consistency: a declared JSON syntax whose body bytes
/// fail to parse as JSON.
///
/// Reads the derived body charset; when the body is declared in a charset
/// this check cannot decode, it degrades to skipping rather than guessing.
pub struct BodyFormat;

const DECODABLE_CHARSETS: &[&str] = &["utf-8", "utf8", "us-ascii", "ascii"];

impl Check for BodyFormat {
    fn name(&self) -> &'static str {
        "body_format"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Response
    }

    fn reads(&self) -> &'static [FactKey] {
        &[keys::BODY_CHARSET, keys::EXPLAINED_MEDIA]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        // A malformed Content-Type is already reported; don't guess at the
        // body format it failed to declare.
        let reference = field_ref(Part::Response, "content-type");
        if cx
            .facts()
            .is_explained(&[keys::EXPLAINED_MEDIA], &reference)
        {
            let parsed = cx.parsed(Part::Response, "content-type");
            if parsed.map(|p| p.is_malformed()).unwrap_or(true) {
                return Ok(());
            }
        }

        let Some(parsed) = cx.parsed(Part::Response, "content-type") else {
            return Ok(());
        };
        let Some(media_type) = parsed.as_media_type() else {
            return Ok(());
        };
        if !media_type.claims_json() {
            return Ok(());
        }

        if let Some(charset) = cx.facts().text(keys::BODY_CHARSET) {
            if !DECODABLE_CHARSETS.contains(&charset) {
                return Ok(());
            }
        }

        let Some(body) = cx.exchange().part_body(Part::Response) else {
            return Ok(());
        };
        if body.is_empty() {
            return Ok(());
        }

        if serde_json::from_slice::<serde_json::Value>(body).is_err() {
            let essence = media_type.essence();
            cx.notify_with(1038, Subject::Response, &[("media_type", essence)])?;
        }
        Ok(())
    }
}
