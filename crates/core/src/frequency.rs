//! Byte frequency analysis.

use crate::error::{Error, Result};

/// Occurrence count for each byte value present in an input.
///
/// Enumeration order is ascending byte value. Counts are `u32` because that
/// is what the container records; symbols with a zero count are only present
/// when a decoded table says so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; 256],
    present: [bool; 256],
    len: usize,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    ///
    /// # Errors
    /// `Error::InputTooLarge` if one byte value occurs more than `u32::MAX`
    /// times.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut wide = [0u64; 256];
        for &byte in data {
            wide[byte as usize] += 1;
        }

        let mut table = Self::empty();
        for (symbol, &count) in wide.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let count = u32::try_from(count).map_err(|_| Error::InputTooLarge {
                symbol: symbol as u8,
                count,
            })?;
            table.insert(symbol as u8, count);
        }
        Ok(table)
    }

    /// Build a table from explicit (symbol, count) entries.
    ///
    /// On a repeated symbol, returns that symbol as the error.
    pub fn from_entries<I>(entries: I) -> std::result::Result<Self, u8>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut table = Self::empty();
        for (symbol, count) in entries {
            if table.present[symbol as usize] {
                return Err(symbol);
            }
            table.insert(symbol, count);
        }
        Ok(table)
    }

    fn empty() -> Self {
        Self {
            counts: [0; 256],
            present: [false; 256],
            len: 0,
        }
    }

    fn insert(&mut self, symbol: u8, count: u32) {
        self.counts[symbol as usize] = count;
        self.present[symbol as usize] = true;
        self.len += 1;
    }

    /// Count recorded for `symbol`, if it is part of the table.
    pub fn get(&self, symbol: u8) -> Option<u32> {
        self.present[symbol as usize].then(|| self.counts[symbol as usize])
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of all counts, i.e. the length of the input the table describes.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| count as u64).sum()
    }

    /// Iterate (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (0..=255u8)
            .filter(|&symbol| self.present[symbol as usize])
            .map(|symbol| (symbol, self.counts[symbol as usize]))
    }
}
