// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::checks::{Applicability, Check};
use crate::engine::Analysis;
use crate::exchange::Part;
use crate::facts::{field_ref, keys, FactKey, FactValue};
use crate::notice::Subject;
use chrono::{DateTime, Utc};

/// Cross-field temporal consistency: `Date` plus `Age` yields the implied
/// current time at the cache that served the response. If that instant lies
/// beyond the observation time plus the configured skew tolerance, the
/// response claims to come from the future.
///
/// Skips when either input field was already explained as malformed — the
/// arithmetic would only restate a reported problem.
pub struct FreshnessArithmetic;

impl Check for FreshnessArithmetic {
    fn name(&self) -> &'static str {
        "freshness"
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Response
    }

    fn reads(&self) -> &'static [FactKey] {
        &[keys::EXPLAINED_DATES, keys::EXPLAINED_NUMERICS]
    }

    fn writes(&self) -> &'static [FactKey] {
        &[keys::GENERATION_TIME]
    }

    fn run(&self, cx: &mut Analysis<'_>) -> anyhow::Result<()> {
        let explained = [keys::EXPLAINED_DATES, keys::EXPLAINED_NUMERICS];
        for name in ["date", "age"] {
            let reference = field_ref(Part::Response, name);
            if cx.facts().is_explained(&explained, &reference) {
                let parsed = cx.parsed(Part::Response, name);
                if parsed.map(|p| p.is_malformed()).unwrap_or(false) {
                    return Ok(());
                }
            }
        }

        let Some(date) = cx.parsed(Part::Response, "date").and_then(|p| p.as_date()) else {
            return Ok(());
        };
        let Some(age) = cx.parsed(Part::Response, "age").and_then(|p| p.as_integer()) else {
            return Ok(());
        };

        // Whole-second arithmetic on Unix timestamps: delta types overflow
        // on extreme but grammar-valid Age values.
        let age = i64::try_from(age).unwrap_or(i64::MAX);
        let skew = i64::try_from(cx.options().clock_skew_secs).unwrap_or(i64::MAX);
        let observed = cx.observed_at().timestamp();
        let threshold = observed.saturating_add(skew);

        let implied = date.timestamp().checked_add(age);
        if let Some(instant) = implied.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
            cx.publish(keys::GENERATION_TIME, FactValue::Time(instant))?;
        }

        let ahead = match implied {
            Some(ts) if ts <= threshold => return Ok(()),
            Some(ts) => ts.saturating_sub(observed),
            // Addition overflow puts the instant far past any observation.
            None => i64::MAX,
        };
        cx.notify_with(1164, Subject::Response, &[("seconds", ahead.to_string())])?;
        Ok(())
    }
}
