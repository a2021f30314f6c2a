// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Offline HTTP conformance analyzer.
//!
//! Takes complete request/response exchanges (however captured), parses
//! their header fields with total parsers, runs a registry of conformance
//! checks over them, and yields a deterministic sequence of notices with
//! stable numeric ids.

pub mod checks;
pub mod engine;
pub mod exchange;
pub mod facts;
pub mod fields;
pub mod notice;
pub mod options;
pub mod report;
pub mod source;

#[cfg(test)]
pub mod test_helpers;
