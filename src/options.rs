// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Analysis options. Callers deserialize these from their own config
//! surface; the core only consumes the resulting values.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisOptions {
    /// Tolerated clock skew, in seconds, for cross-field temporal checks
    /// such as the Date/Age freshness computation.
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_secs: u64,

    /// Length ceiling for a single raw header value; longer values are
    /// flagged (never rejected).
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
}

fn default_clock_skew_secs() -> u64 {
    10
}

fn default_max_field_length() -> usize {
    4096
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            clock_skew_secs: default_clock_skew_secs(),
            max_field_length: default_max_field_length(),
        }
    }
}
