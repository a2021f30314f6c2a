// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Adapter seam between capture formats and the analyzer.
//!
//! Decoding a capture format (HAR files, proxy logs, pcap dissections) is
//! the adapter's business; the analyzer only ever sees [`Exchange`] values.
//! An adapter that cannot decode its input reports a hard error for that
//! input rather than fabricating a partial exchange.

use crate::exchange::Exchange;

pub trait ExchangeSource {
    fn exchanges(&mut self) -> anyhow::Result<Vec<Exchange>>;
}

/// In-memory source, mainly for embedding and tests.
pub struct VecSource {
    items: Vec<Exchange>,
}

impl VecSource {
    pub fn new(items: Vec<Exchange>) -> Self {
        Self { items }
    }
}

impl ExchangeSource for VecSource {
    fn exchanges(&mut self) -> anyhow::Result<Vec<Exchange>> {
        Ok(std::mem::take(&mut self.items))
    }
}
