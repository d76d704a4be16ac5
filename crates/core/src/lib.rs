//! huffpack-core: byte-oriented Huffman compression
//!
//! This library turns a byte buffer into a self-describing container and
//! back:
//! - Counts byte frequencies
//! - Builds a Huffman tree with a fixed tie-break rule, so both sides of the
//!   container derive the same tree from the same table
//! - Packs code bits MSB-first with an explicit padding count
//! - Serializes the frequency table, padding and payload into one blob
//!
//! # Architecture
//!
//! - `frequency`: byte counting
//! - `tree`: deterministic Huffman tree in an index arena
//! - `codes`: code table derived from the tree
//! - `bitio`: bit packing and unpacking
//! - `container`: binary container format
//! - `codec`: the compress/decompress pipelines
//! - `metrics`: per-run statistics
//!
//! # Example
//! ```
//! let packed = huffpack_core::compress(b"aaabbc").unwrap();
//! assert_eq!(huffpack_core::decompress(&packed).unwrap(), b"aaabbc");
//! ```

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod container;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress};
pub use container::Container;
pub use error::{Error, Result};
