//! Container serialization and parsing.
//!
//! A container packages the packed payload with everything a decoder needs
//! to rebuild the Huffman tree. The tree itself is not stored; the decoder
//! rebuilds it from the frequency table.
//!
//! # Container Format
//!
//! All integers are little-endian.
//!
//! ```text
//! +----------------------+
//! | padding (4)          |  u32, 0..=7 filler bits in the last payload byte
//! +----------------------+
//! | table_size (4)       |  u32, 1..=256 distinct byte values
//! +----------------------+
//! | symbol (1)           |  \
//! | count (4)            |   } table_size entries, ascending symbol order
//! +----------------------+  /
//! | payload              |  packed code bits, MSB-first
//! | (remaining bytes)    |
//! +----------------------+
//! ```
//!
//! There is no magic number or checksum. Parsing validates every length
//! against the buffer before reading it.

use crate::bitio::PackedPayload;
use crate::error::{ContainerError, Result};
use crate::frequency::FrequencyTable;

/// Size of the fixed header (padding + table_size) in bytes
pub const HEADER_SIZE: usize = 8;

/// Size of one frequency table entry (symbol + count) in bytes
pub const ENTRY_SIZE: usize = 5;

/// Largest number of entries a table can hold
pub const MAX_TABLE_SIZE: u32 = 256;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Frequencies the Huffman tree is built from
    pub freqs: FrequencyTable,

    /// Packed code bits and their padding
    pub payload: PackedPayload,
}

impl Container {
    pub fn new(freqs: FrequencyTable, payload: PackedPayload) -> Self {
        Self { freqs, payload }
    }

    /// Total size of the serialized container in bytes.
    pub fn serialized_len(&self) -> usize {
        HEADER_SIZE + ENTRY_SIZE * self.freqs.len() + self.payload.bytes.len()
    }

    /// Serialize the container.
    ///
    /// The whole container is built in memory; nothing is written anywhere
    /// until the caller does so with the returned buffer.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());

        out.extend_from_slice(&(self.payload.padding as u32).to_le_bytes());
        out.extend_from_slice(&(self.freqs.len() as u32).to_le_bytes());

        for (symbol, count) in self.freqs.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }

        out.extend_from_slice(&self.payload.bytes);
        out
    }

    /// Parse a container from bytes.
    ///
    /// # Errors
    /// - `ContainerError::HeaderTruncated` if the buffer is shorter than the header
    /// - `ContainerError::InvalidPadding` if padding is above 7
    /// - `ContainerError::InvalidTableSize` if table_size is 0 or above 256
    /// - `ContainerError::TableTruncated` if the buffer ends inside the table
    /// - `ContainerError::DuplicateSymbol` if a symbol is listed twice
    /// - `ContainerError::PaddingWithoutPayload` if padding is set but the
    ///   payload is empty
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(ContainerError::HeaderTruncated {
                required: HEADER_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let padding = read_u32(bytes, 0);
        let table_size = read_u32(bytes, 4);

        if padding > 7 {
            return Err(ContainerError::InvalidPadding(padding).into());
        }
        if table_size == 0 || table_size > MAX_TABLE_SIZE {
            return Err(ContainerError::InvalidTableSize(table_size).into());
        }

        let table_end = HEADER_SIZE + ENTRY_SIZE * table_size as usize;
        if bytes.len() < table_end {
            return Err(ContainerError::TableTruncated {
                required: table_end,
                actual: bytes.len(),
            }
            .into());
        }

        let freqs = FrequencyTable::from_entries(
            bytes[HEADER_SIZE..table_end]
                .chunks_exact(ENTRY_SIZE)
                .map(|entry| (entry[0], read_u32(entry, 1))),
        )
        .map_err(ContainerError::DuplicateSymbol)?;

        let payload = &bytes[table_end..];
        if payload.is_empty() && padding > 0 {
            return Err(ContainerError::PaddingWithoutPayload { padding }.into());
        }

        log::trace!(
            "parsed container: padding={}, table_size={}, payload={} bytes",
            padding,
            table_size,
            payload.len()
        );

        Ok(Self {
            freqs,
            payload: PackedPayload {
                bytes: payload.to_vec(),
                padding: padding as u8,
            },
        })
    }
}

/// Read a little-endian u32 at `offset`. Callers check the bounds first.
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
