//! Code generation: from a Huffman tree to a per-symbol code table.
//!
//! Codes are read off root-to-leaf paths, `0` for a left branch and `1` for a
//! right branch. Only leaves carry codes, so the table is prefix-free.
//! A tree that is a single leaf gets the one-bit code `0`, since a
//! zero-length code could not be decoded.

use std::fmt;

use crate::bitio::BitWriter;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node, NodeId};

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A single code word: the low `len` bits of `bits`, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Build a code from its bit value and length.
    pub fn new(bits: u64, len: u8) -> Self {
        debug_assert!(len as usize <= MAX_CODE_LEN);
        Self { bits, len }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    fn child(&self, bit: bool) -> Result<Self> {
        let len = self.len as usize + 1;
        if len > MAX_CODE_LEN {
            return Err(HuffmanError::CodeLengthTooLong { length: len }.into());
        }
        Ok(Self {
            bits: (self.bits << 1) | bit as u64,
            len: len as u8,
        })
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Derive the code table from a tree.
    ///
    /// The walk uses an explicit stack, so tree depth is bounded only by
    /// `MAX_CODE_LEN`.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf lies deeper than
    /// `MAX_CODE_LEN`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            codes[symbol as usize] = Some(Code::new(0, 1));
            return Ok(Self { codes });
        }

        let mut stack: Vec<(NodeId, Code)> = vec![(tree.root(), Code::default())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(code),
                Node::Internal { left, right, .. } => {
                    // Right first so the left subtree is visited first.
                    stack.push((right, code.child(true)?));
                    stack.push((left, code.child(false)?));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for `symbol`, if it is in the alphabet.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// Number of bits needed to encode an input with these frequencies.
    ///
    /// # Errors
    /// `HuffmanError::UnknownSymbol` if the table lacks a code for one of
    /// the symbols.
    pub fn encoded_bit_len(&self, freqs: &FrequencyTable) -> Result<u64> {
        freqs.iter().try_fold(0u64, |total, (symbol, count)| {
            let code = self.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
            Ok(total + count as u64 * code.len() as u64)
        })
    }

    /// Append the code of every byte in `data`, in order, to `writer`.
    pub fn encode_into(&self, data: &[u8], writer: &mut BitWriter) -> Result<()> {
        for &byte in data {
            let code = self.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
            writer.write_bits(code.bits(), code.len())?;
        }
        Ok(())
    }
}
