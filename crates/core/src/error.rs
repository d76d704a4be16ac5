//! Error types for huffpack.
//!
//! All operations return structured errors rather than panicking.
//! Each failure domain has its own enum; the top-level [`Error`] wraps them
//! so callers can match as coarsely or as finely as they need.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Variants map onto the failure taxonomy of the tool:
/// - `EmptyInput`: there is nothing to compress
/// - `Container`: the compressed blob is malformed or truncated
/// - `IoUnavailable`: a file could not be read or written
///
/// The remaining variants are internal invariants surfaced instead of panics.
#[derive(Debug, Error)]
pub enum Error {
    /// Compression was asked to encode zero bytes
    #[error("input is empty: nothing to compress")]
    EmptyInput,

    /// A single byte value occurs more often than the 4-byte count field holds
    #[error("byte {symbol:#04x} occurs {count} times, more than the container can record")]
    InputTooLarge { symbol: u8, count: u64 },

    /// Malformed, truncated or inconsistent container
    #[error("corrupt container: {0}")]
    Container(#[from] ContainerError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman tree or code table error
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// A file could not be opened, read, written or persisted
    #[error("cannot access {}: {source}", .path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::IoUnavailable {
            path: path.into(),
            source,
        }
    }

    /// True if this error means the container bytes could not be trusted.
    pub fn is_corrupt_container(&self) -> bool {
        matches!(self, Error::Container(_))
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Padding must be below 8 and cannot exceed the buffer
    #[error("invalid padding {padding} for a {len}-byte buffer")]
    InvalidPadding { padding: u8, len: usize },
}

/// Huffman tree and code table errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols in the frequency table (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// Symbol was not part of the alphabet the code table was built from
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),

    /// Code length exceeds what a single code word can hold
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },
}

/// Container parsing and consistency errors.
///
/// Every variant means the same thing to a user: the bytes handed to
/// `decompress` are not a valid container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Buffer is too short to hold the fixed header
    #[error("header truncated: need at least {required} bytes, got {actual}")]
    HeaderTruncated { required: usize, actual: usize },

    /// Padding field outside 0..=7
    #[error("padding {0} out of range 0..=7")]
    InvalidPadding(u32),

    /// Table size field outside 1..=256
    #[error("table size {0} out of range 1..=256")]
    InvalidTableSize(u32),

    /// Buffer ends before the declared frequency table does
    #[error("frequency table truncated: header declares {required} bytes, got {actual}")]
    TableTruncated { required: usize, actual: usize },

    /// The same byte value appears twice in the table
    #[error("byte {0:#04x} appears more than once in the frequency table")]
    DuplicateSymbol(u8),

    /// Padding declared but no payload byte to hold it
    #[error("padding {padding} declared for an empty payload")]
    PaddingWithoutPayload { padding: u32 },

    /// Payload bit length disagrees with what the table predicts
    #[error("payload holds {actual} bits, frequency table requires {expected}")]
    PayloadLengthMismatch { expected: u64, actual: u64 },

    /// Payload ended in the middle of a code
    #[error("payload ends mid-code at bit position {position}")]
    IncompleteCode { position: usize },

    /// Decoded symbol count disagrees with the frequency table total
    #[error("decoded length mismatch: table says {expected} bytes, payload holds {actual}")]
    DecodedLengthMismatch { expected: u64, actual: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
