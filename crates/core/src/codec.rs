//! Compression and decompression pipelines.
//!
//! ```text
//! compress:   bytes -> FrequencyTable -> HuffmanTree -> CodeTable
//!                   -> BitWriter -> PackedPayload -> Container -> bytes
//!
//! decompress: bytes -> Container -> HuffmanTree (from the stored table)
//!                   -> BitReader -> tree walk -> bytes
//! ```
//!
//! Every call builds and drops its own tree and tables; nothing is shared
//! between calls.

use crate::bitio::{BitReader, BitWriter};
use crate::codes::CodeTable;
use crate::container::Container;
use crate::error::{ContainerError, Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Compress `data` into a serialized container.
///
/// # Errors
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InputTooLarge` if a byte value occurs more than `u32::MAX` times
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.serialize())
}

/// Decompress a serialized container back into the original bytes.
///
/// # Errors
/// `Error::Container` if the buffer is not a valid container.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    decode(&Container::parse(bytes)?)
}

/// Encode `data` into an in-memory container.
pub fn encode(data: &[u8]) -> Result<Container> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let freqs = FrequencyTable::from_bytes(data)?;
    let tree = HuffmanTree::build(&freqs)?;
    let codes = CodeTable::from_tree(&tree)?;

    let bit_len = codes.encoded_bit_len(&freqs)?;
    let mut writer = BitWriter::with_capacity(bit_len.div_ceil(8) as usize);
    codes.encode_into(data, &mut writer)?;
    let payload = writer.finish();

    log::debug!(
        "encoded {} bytes: {} distinct symbols, {} bits, padding {}",
        data.len(),
        freqs.len(),
        bit_len,
        payload.padding
    );

    Ok(Container::new(freqs, payload))
}

/// Decode a parsed container.
///
/// The tree is rebuilt from the stored frequency table. Before walking the
/// payload, its bit length is checked against what the table predicts, so a
/// payload that was cut short or padded out is rejected up front.
///
/// # Errors
/// - `ContainerError::PayloadLengthMismatch` if the payload bit length is wrong
/// - `ContainerError::IncompleteCode` if the payload ends inside a code
/// - `ContainerError::DecodedLengthMismatch` if the symbol count differs from
///   the table total
pub fn decode(container: &Container) -> Result<Vec<u8>> {
    let freqs = &container.freqs;
    let payload = &container.payload;

    let tree = HuffmanTree::build(freqs)?;
    let codes = CodeTable::from_tree(&tree)?;

    let expected_bits = codes.encoded_bit_len(freqs)?;
    let actual_bits = payload.bit_len() as u64;
    if expected_bits != actual_bits {
        return Err(ContainerError::PayloadLengthMismatch {
            expected: expected_bits,
            actual: actual_bits,
        }
        .into());
    }

    let reader = BitReader::with_padding(&payload.bytes, payload.padding)?;
    let output = walk(&tree, reader)?;

    let expected_len = freqs.total();
    if output.len() as u64 != expected_len {
        return Err(ContainerError::DecodedLengthMismatch {
            expected: expected_len,
            actual: output.len() as u64,
        }
        .into());
    }

    log::debug!(
        "decoded {} bytes from {} payload bits",
        output.len(),
        actual_bits
    );
    Ok(output)
}

/// Walk the tree once per code, emitting a symbol at every leaf.
fn walk(tree: &HuffmanTree, reader: BitReader<'_>) -> Result<Vec<u8>> {
    let root = tree.root();
    let mut output = Vec::with_capacity(reader.len());

    // A lone leaf has the one-bit code "0"; every bit is one symbol.
    if let Node::Leaf { symbol, .. } = *tree.node(root) {
        output.resize(reader.len(), symbol);
        return Ok(output);
    }

    let total = reader.len();
    let mut node = root;
    for (position, bit) in reader.enumerate() {
        let next = tree
            .step(node, bit)
            .ok_or(ContainerError::IncompleteCode { position })?;
        match *tree.node(next) {
            Node::Leaf { symbol, .. } => {
                output.push(symbol);
                node = root;
            }
            Node::Internal { .. } => node = next,
        }
    }

    if node != root {
        return Err(ContainerError::IncompleteCode { position: total }.into());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::PackedPayload;

    #[test]
    fn test_round_trip() {
        let data = b"hello world! this is a test.";
        let compressed = compress(data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(compress(b""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress(b"A").unwrap();
        let container = Container::parse(&compressed).unwrap();
        assert_eq!(container.payload.bytes, vec![0]);
        assert_eq!(container.payload.padding, 7);
        assert_eq!(decompress(&compressed).unwrap(), b"A");
    }

    #[test]
    fn test_single_symbol_run() {
        let data = vec![b'X'; 65536];
        let compressed = compress(&data).unwrap();

        // One bit per byte plus a 13-byte header.
        assert_eq!(compressed.len(), 8 + 5 + 65536 / 8);
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_aaabbc_payload() {
        // a=0, c=10, b=11: 0 0 0 11 11 10 -> 00011111 0
        let container = encode(b"aaabbc").unwrap();
        assert_eq!(container.payload.bytes, vec![0b00011111, 0b00000000]);
        assert_eq!(container.payload.padding, 7);
        assert_eq!(decode(&container).unwrap(), b"aaabbc");
    }

    #[test]
    fn test_deterministic() {
        let data = b"abracadabra abracadabra";
        assert_eq!(compress(data).unwrap(), compress(data).unwrap());
    }

    #[test]
    fn test_payload_too_short() {
        let mut container = encode(b"aaabbc").unwrap();
        container.payload.bytes.pop();
        container.payload.padding = 0;
        assert!(matches!(
            decode(&container),
            Err(Error::Container(ContainerError::PayloadLengthMismatch {
                expected: 9,
                actual: 8
            }))
        ));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut compressed = compress(b"aaabbc").unwrap();
        compressed.push(0xFF);
        assert!(decompress(&compressed).unwrap_err().is_corrupt_container());
    }

    #[test]
    fn test_payload_ending_mid_code() {
        // Right bit length (9), but "111111111" never returns to the root.
        let freqs = FrequencyTable::from_bytes(b"aaabbc").unwrap();
        let payload = PackedPayload {
            bytes: vec![0xFF, 0x80],
            padding: 7,
        };
        let result = decode(&Container::new(freqs, payload));
        assert!(matches!(
            result,
            Err(Error::Container(ContainerError::IncompleteCode { position: 9 }))
        ));
    }

    #[test]
    fn test_symbol_count_mismatch() {
        // 9 bits of "0" decode to nine 'a's, but the table says six symbols.
        let freqs = FrequencyTable::from_bytes(b"aaabbc").unwrap();
        let payload = PackedPayload {
            bytes: vec![0x00, 0x00],
            padding: 7,
        };
        let result = decode(&Container::new(freqs, payload));
        assert!(matches!(
            result,
            Err(Error::Container(ContainerError::DecodedLengthMismatch {
                expected: 6,
                actual: 9
            }))
        ));
    }

    #[test]
    fn test_pipeline_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Container>();
        assert_send_sync::<HuffmanTree>();
        assert_send_sync::<CodeTable>();
        assert_send_sync::<Error>();
    }

    #[test]
    fn test_zero_count_table_decodes_to_nothing() {
        let freqs = FrequencyTable::from_entries([(b'z', 0)]).unwrap();
        let container = Container::new(freqs, PackedPayload::default());
        assert!(decode(&container).unwrap().is_empty());
    }
}
