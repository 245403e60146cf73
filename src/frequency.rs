use std::collections::BTreeMap;

use log::debug;

use crate::error::{HuffmanError, Result};

/// Occurrence count per distinct byte, iterated in ascending byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let counts = bytes
            .iter()
            .copied()
            .fold(BTreeMap::new(), |mut acc, byte| {
                *acc.entry(byte).or_insert(0u64) += 1;
                acc
            });

        debug!(
            "Counted {} distinct symbols over {} bytes",
            counts.len(),
            bytes.len()
        );
        FrequencyTable { counts }
    }

    /// Rebuilds a table from stored `(symbol, count)` pairs. Pairs must be
    /// strictly ascending by symbol and every count must be non-zero.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut last: Option<u8> = None;
        let mut total = 0u64;

        for (symbol, count) in pairs {
            if count == 0 {
                return Err(HuffmanError::invalid_header(format!(
                    "symbol {symbol:#04x} stored with zero count"
                )));
            }
            if last.is_some_and(|prev| prev >= symbol) {
                return Err(HuffmanError::invalid_header(format!(
                    "symbol {symbol:#04x} out of order"
                )));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| HuffmanError::invalid_header("symbol counts overflow"))?;
            last = Some(symbol);
            counts.insert(symbol, count);
        }

        Ok(FrequencyTable { counts })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the analysed input.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}
