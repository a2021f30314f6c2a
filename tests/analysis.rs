// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! End-to-end analysis scenarios over the built-in registry.

mod common;

use bytes::Bytes;
use httplint::engine::Registry;
use httplint::exchange::{Exchange, Part};
use httplint::notice::{Notice, NoticeCatalog, Severity, Subject};
use httplint::options::AnalysisOptions;

use common::{exchange, headers, init_tracing, observed_at, request, response, text_headers};

fn analyze(ex: &Exchange) -> Vec<Notice> {
    init_tracing();
    let registry = Registry::builtin(AnalysisOptions::default()).expect("builtin registry");
    registry.analyze(ex)
}

fn ids_with(notices: &[Notice], id: u16) -> Vec<&Notice> {
    notices.iter().filter(|n| n.id == id).collect()
}

#[test]
fn vendor_prefixed_fields_each_earn_a_comment() {
    let ex = exchange(
        text_headers(&[("Host", "example.org"), ("User-Agent", "demo/1.0")]),
        text_headers(&[
            ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ("X-Photo-Width", "1024"),
            ("X-Photo-Height", "768"),
        ]),
    );
    let notices = analyze(&ex);
    let prefixed = ids_with(&notices, 1152);
    assert_eq!(prefixed.len(), 2);
    assert!(prefixed.iter().all(|n| n.severity == Severity::Comment));
    assert!(prefixed.iter().all(|n| matches!(
        &n.subject,
        Subject::Field { part: Part::Response, .. }
    )));
}

#[test]
fn malformed_expires_is_one_date_error() {
    let ex = exchange(
        text_headers(&[("Host", "example.org"), ("User-Agent", "demo/1.0")]),
        text_headers(&[
            ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ("Expires", "sometime next week"),
        ]),
    );
    let notices = analyze(&ex);
    let bad_dates = ids_with(&notices, 1107);
    assert_eq!(bad_dates.len(), 1);
    assert_eq!(
        bad_dates[0].subject,
        Subject::Field {
            part: Part::Response,
            name: "Expires".to_string(),
        }
    );
    assert_eq!(
        bad_dates[0].params.get("field").map(String::as_str),
        Some("Expires")
    );
    // The specific date notice covers the field; no generic grammar error.
    assert!(ids_with(&notices, 1000).is_empty());
}

#[test]
fn date_plus_age_in_the_future_is_one_error() {
    let ex = exchange(
        text_headers(&[("Host", "example.org"), ("User-Agent", "demo/1.0")]),
        text_headers(&[
            ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ("Age", "600"),
        ]),
    );
    let notices = analyze(&ex);
    let future = ids_with(&notices, 1164);
    assert_eq!(future.len(), 1);
    assert_eq!(future[0].severity, Severity::Error);
    assert_eq!(
        future[0].params.get("seconds").map(String::as_str),
        Some("480")
    );
}

#[test]
fn missing_user_agent_is_a_comment_not_an_error() {
    let ex = exchange(
        text_headers(&[("Host", "example.org")]),
        text_headers(&[("Date", "Wed, 21 Oct 2015 07:28:00 GMT")]),
    );
    let notices = analyze(&ex);
    assert_eq!(ids_with(&notices, 1153).len(), 1);
    assert!(notices.iter().all(|n| n.severity < Severity::Error));
}

#[test]
fn json_content_type_with_non_json_body_is_flagged() {
    let mut resp = response(
        200,
        text_headers(&[
            ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
            ("Content-Type", "application/json"),
        ]),
    );
    resp.body = Some(Bytes::from_static(b"<html>not json</html>"));
    let ex = Exchange::paired(
        request(text_headers(&[
            ("Host", "example.org"),
            ("User-Agent", "demo/1.0"),
        ])),
        resp,
        observed_at(),
    );
    let notices = analyze(&ex);
    let bad_body = ids_with(&notices, 1038);
    assert_eq!(bad_body.len(), 1);
    assert_eq!(
        bad_body[0].params.get("media_type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn identical_content_yields_byte_identical_output() {
    let build = || {
        exchange(
            text_headers(&[("Host", "example.org")]),
            text_headers(&[
                ("Date", "Wed, 21 Oct 2015 07:28:00 GMT"),
                ("X-Photo-Width", "1024"),
                ("Expires", "garbage"),
                ("Age", "600"),
            ]),
        )
    };
    let first = serde_json::to_vec(&analyze(&build())).expect("serialize");
    let second = serde_json::to_vec(&analyze(&build())).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn severity_is_stable_per_id() {
    let catalog = NoticeCatalog::builtin().expect("builtin catalog");
    let ex = exchange(
        text_headers(&[]),
        text_headers(&[("Expires", "garbage"), ("X-Thing", "1")]),
    );
    for notice in analyze(&ex) {
        assert_eq!(catalog.severity(notice.id), Some(notice.severity));
    }
}

#[test]
fn arbitrary_header_bytes_never_panic() {
    let samples: &[&[u8]] = &[
        b"",
        b"\x00\x01\x02",
        b"\xff\xfe\xfd",
        b"a, b, \"unterminated",
        b"W/\"half",
        b"text/;;=",
        b"Mon, 99 Foo 9999 99:99:99 GMT",
        b"-42",
        b"18446744073709551616",
        b"no-cache, =, max-age=",
    ];
    let names = [
        "Date", "Expires", "Age", "Content-Length", "Content-Type", "ETag", "Cache-Control",
        "Accept", "Vary", "X-Custom", "Whatever",
    ];
    for name in names {
        for sample in samples {
            let ex = exchange(
                headers(&[("Host", b"example.org")]),
                headers(&[(name, sample)]),
            );
            // Any notices are fine; only a panic or a fatal would fail.
            let _ = analyze(&ex);
        }
    }
}

#[test]
fn one_registry_serves_many_threads() {
    let registry = Registry::builtin(AnalysisOptions::default()).expect("builtin registry");
    let ex = exchange(
        text_headers(&[("Host", "example.org")]),
        text_headers(&[("Expires", "garbage")]),
    );
    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            let registry = &registry;
            let ex = &ex;
            handles.push(scope.spawn(move || registry.analyze(ex)));
        }
        let baseline = registry.analyze(&ex);
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), baseline);
        }
    });
}
