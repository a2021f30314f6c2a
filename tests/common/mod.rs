// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared builders for the integration tests.

use chrono::{DateTime, TimeZone, Utc};
use httplint::exchange::{Exchange, HeaderField, Request, Response};

/// Opt-in log output for test debugging via RUST_LOG.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two minutes after the canonical "Wed, 21 Oct 2015 07:28:00 GMT" date
/// used in header fixtures.
pub fn observed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 10, 21, 7, 30, 0).unwrap()
}

pub fn headers(pairs: &[(&str, &[u8])]) -> Vec<HeaderField> {
    pairs
        .iter()
        .map(|(k, v)| HeaderField::new(*k, v.to_vec()))
        .collect()
}

pub fn text_headers(pairs: &[(&str, &str)]) -> Vec<HeaderField> {
    pairs
        .iter()
        .map(|(k, v)| HeaderField::new(*k, v.as_bytes().to_vec()))
        .collect()
}

pub fn request(headers: Vec<HeaderField>) -> Request {
    Request {
        method: "GET".to_string(),
        target: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: None,
    }
}

pub fn response(status: u16, headers: Vec<HeaderField>) -> Response {
    Response {
        status,
        reason: "OK".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: None,
    }
}

pub fn exchange(req: Vec<HeaderField>, resp: Vec<HeaderField>) -> Exchange {
    Exchange::paired(request(req), response(200, resp), observed_at())
}
