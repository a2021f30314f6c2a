// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! HTTP-date (IMF-fixdate and obsolete forms) parsing.

use chrono::{DateTime, Utc};

/// Parse an HTTP-date string into a `chrono::DateTime<Utc>`.
///
/// Accepts the three date forms of RFC 9110 §5.6.7. Returns `None` on any
/// grammar violation; date parsing is total, never an error path.
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    httpdate::parse_http_date(s.trim())
        .ok()
        .map(DateTime::<Utc>::from)
}
