//! Bit packing and unpacking.
//!
//! [`BitWriter`] packs a logical bit sequence into bytes and [`BitReader`]
//! expands bytes back into bits. Both operate in MSB-first (most significant
//! bit first) order.
//!
//! # Padding Rules
//! - BitWriter: the final partial byte is left-aligned and filled with zero
//!   bits; the number of filler bits (0-7) is reported as `padding`
//! - BitReader: given the same `padding`, stops exactly where the writer's
//!   last real bit was, so filler bits are never observed
//!
//! Packed bytes alone are ambiguous; the padding count must travel with them.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits: 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap();   // Write 2 bits: 1, 1
//! // Total: 10111 -> padded to 10111000, padding = 3
//!
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b10111000]);
//! assert_eq!(packed.padding, 3);
//!
//! let mut reader = BitReader::with_padding(&packed.bytes, packed.padding).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};

/// A bit sequence packed into bytes, with the count of filler bits in the
/// final byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedPayload {
    /// Packed bits, MSB-first
    pub bytes: Vec<u8>,
    /// Number of low-order filler bits in the last byte (0-7)
    pub padding: u8,
}

impl PackedPayload {
    /// Number of meaningful bits carried by the payload.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
/// When finished, pads the final partial byte with zeros.
///
/// # Invariants
/// - `bit_buffer` contains up to 7 bits (never a full byte)
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a BitWriter that can hold `bytes` output bytes without
    /// reallocating.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. For example, writing value=0b101 with count=3
    /// writes bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // How many bits fit in the current byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Take the top bits_to_write of what is left
            let shift = remaining - bits_to_write;
            let bits = ((value >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Finish writing and return the packed bytes with their padding count.
    ///
    /// If there are remaining bits in the buffer they are already
    /// left-aligned with trailing zeros; padding is `8 - bit_count`.
    pub fn finish(mut self) -> PackedPayload {
        let padding = if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            8 - self.bit_count
        } else {
            0
        };
        PackedPayload {
            bytes: self.bytes,
            padding,
        }
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// The reader knows how many trailing bits are padding and treats them as
/// past the end of the stream.
///
/// # Invariants
/// - `bit_position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// Number of meaningful bits in `data`
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
            bit_len: data.len() * 8,
        }
    }

    /// Create a BitReader that ignores the last `padding` bits of `data`.
    ///
    /// # Errors
    /// `BitIoError::InvalidPadding` if `padding` is 8 or more, or nonzero for
    /// an empty buffer.
    pub fn with_padding(data: &'a [u8], padding: u8) -> Result<Self> {
        if padding >= 8 || (data.is_empty() && padding > 0) {
            return Err(BitIoError::InvalidPadding {
                padding,
                len: data.len(),
            }
            .into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_len: data.len() * 8 - padding as usize,
        })
    }

    /// Read up to 64 bits from the input.
    ///
    /// Bits are read MSB-first. For example, reading 3 bits from byte 0b10110000
    /// returns 0b101.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte_idx = self.bit_position / 8;
            let bit_offset = self.bit_position % 8;

            // How many bits can we read from the current byte?
            let bits_in_byte = 8 - bit_offset;
            let bits_to_read = remaining.min(bits_in_byte);

            let byte = self.data[byte_idx];
            let mask = ((1u16 << bits_to_read) - 1) as u8;
            let bits = (byte >> (bits_in_byte - bits_to_read)) & mask;

            result = (result << bits_to_read) | bits as u64;

            self.bit_position += bits_to_read;
            remaining -= bits_to_read;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_empty() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Return the number of meaningful bits remaining.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if every meaningful bit has been read.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits_remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Pack a logical bit sequence into bytes.
pub fn pack<I>(bits: I) -> PackedPayload
where
    I: IntoIterator<Item = bool>,
{
    let mut writer = BitWriter::new();
    for bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand a packed payload back into its logical bit sequence.
pub fn unpack(payload: &PackedPayload) -> Result<Vec<bool>> {
    Ok(BitReader::with_padding(&payload.bytes, payload.padding)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10110011]);
        assert_eq!(packed.padding, 0);

        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
    }

    #[test]
    fn test_write_read_partial_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        writer.write_bits(0b000, 3).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10111000]);
        assert_eq!(packed.padding, 0);

        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert_eq!(reader.read_bits(3).unwrap(), 0b000);
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10000000]);
        assert_eq!(packed.padding, 7);
        assert_eq!(packed.bit_len(), 1);
    }

    #[test]
    fn test_padding_matches_bit_length() {
        for len in 0..40usize {
            let mut writer = BitWriter::new();
            for i in 0..len {
                writer.write_bit(i % 3 == 0);
            }
            let packed = writer.finish();
            assert_eq!(packed.padding as usize, (8 - len % 8) % 8, "len {len}");
            assert_eq!(packed.bytes.len(), len.div_ceil(8));
            assert_eq!(packed.bit_len(), len);
        }
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010101111110000, 16).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10101011, 0b11110000]);

        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(16).unwrap(), 0b1010101111110000);
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(8).unwrap(), 0b10101010);
        assert!(reader.read_bits(1).is_err());
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_padding_hides_filler_bits() {
        let data = [0b11010000];
        let mut reader = BitReader::with_padding(&data, 4).unwrap();
        assert_eq!(reader.bits_remaining(), 4);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1101);
        assert!(reader.is_empty());
        assert!(matches!(
            reader.read_bit(),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_invalid_padding() {
        assert!(matches!(
            BitReader::with_padding(&[0xFF], 8),
            Err(Error::BitIo(BitIoError::InvalidPadding { padding: 8, len: 1 }))
        ));
        assert!(BitReader::with_padding(&[], 1).is_err());
        assert!(BitReader::with_padding(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_zero_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 0).unwrap();
        let packed = writer.finish();
        assert!(packed.bytes.is_empty());
        assert_eq!(packed.padding, 0);

        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
    }

    #[test]
    fn test_too_many_bits() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        let val = 0x123456789ABCDEF0u64;
        writer.write_bits(val, 64).unwrap();

        let packed = writer.finish();
        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(64).unwrap(), val);
    }

    #[test]
    fn test_bit_by_bit() {
        let bits = [true, false, true, true, false, false, true, false];
        let packed = pack(bits);
        assert_eq!(packed.bytes, vec![0b10110010]);

        let reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.collect::<Vec<_>>(), bits);
    }

    #[test]
    fn test_unpack_is_inverse_of_pack() {
        let bits: Vec<bool> = (0..29).map(|i| (i * 7) % 5 < 2).collect();
        let packed = pack(bits.iter().copied());
        assert_eq!(packed.padding, 3);
        assert_eq!(unpack(&packed).unwrap(), bits);
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        assert_eq!(reader.len(), 16);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bits_remaining(), 11);
        assert_eq!(reader.position(), 5);
        reader.read_bits(11).unwrap();
        assert_eq!(reader.bits_remaining(), 0);
        assert!(reader.is_empty());
    }
}
