// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use crate::checks::Check;
use crate::engine::Analysis;
use crate::exchange::{Exchange, HeaderField, Request, Response};
use crate::notice::{Notice, NoticeCatalog};
use crate::options::AnalysisOptions;
use chrono::{DateTime, TimeZone, Utc};

/// The observation instant used across tests: two minutes after the
/// canonical "Wed, 21 Oct 2015 07:28:00 GMT" header date.
pub fn fixed_observed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 10, 21, 7, 30, 0).unwrap()
}

pub fn make_headers(pairs: &[(&str, &str)]) -> Vec<HeaderField> {
    pairs
        .iter()
        .map(|(k, v)| HeaderField::new(*k, v.as_bytes().to_vec()))
        .collect()
}

pub fn make_request(method: &str, target: &str, headers: &[(&str, &str)]) -> Request {
    Request {
        method: method.to_string(),
        target: target.to_string(),
        version: "HTTP/1.1".to_string(),
        headers: make_headers(headers),
        body: None,
    }
}

pub fn make_response(status: u16, headers: &[(&str, &str)]) -> Response {
    Response {
        status,
        reason: "OK".to_string(),
        version: "HTTP/1.1".to_string(),
        headers: make_headers(headers),
        body: None,
    }
}

/// A paired GET-/-200 exchange with the given header sets.
pub fn make_exchange(req_headers: &[(&str, &str)], resp_headers: &[(&str, &str)]) -> Exchange {
    Exchange::paired(
        make_request("GET", "/", req_headers),
        make_response(200, resp_headers),
        fixed_observed_at(),
    )
}

/// Run a slice of checks in the given order against one exchange and
/// collect their notices. Panics on check errors; tests want those loud.
pub fn run_checks(checks: &[&dyn Check], exchange: &Exchange) -> Vec<Notice> {
    let catalog = NoticeCatalog::builtin().expect("builtin catalog");
    let options = AnalysisOptions::default();
    let mut cx = Analysis::new(exchange, &catalog, &options);
    for check in checks {
        check.run(&mut cx).expect("check ran");
    }
    cx.into_notices()
}

/// Run a single check in isolation.
pub fn run_check(check: &dyn Check, exchange: &Exchange) -> Vec<Notice> {
    run_checks(&[check], exchange)
}
