use std::collections::BTreeMap;

use log::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

pub const MAX_CODE_LEN: usize = 64;

/// The low `len` bits of `bits`, read most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codeword {
    pub bits: u64,
    pub len: u8,
}

impl Codeword {
    pub fn new(bits: u64, len: u8) -> Self {
        Codeword { bits, len }
    }

    fn push(self, bit: bool) -> Self {
        Codeword {
            bits: (self.bits << 1) | bit as u64,
            len: self.len + 1,
        }
    }

    /// True when `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len
            && shifted(other.bits, (other.len - self.len) as u32) == self.bits
    }
}

impl std::fmt::Display for Codeword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in (0..self.len).rev() {
            f.write_str(if shifted(self.bits, pos as u32) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// `bits >> by`, treating positions past the 64th as zero.
fn shifted(bits: u64, by: u32) -> u64 {
    bits.checked_shr(by).unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Codeword>,
}

impl CodeTable {
    /// Left edges append 0, right edges append 1. A tree made of a single
    /// leaf assigns its symbol the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        match &tree.root {
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Codeword::new(0, 1));
            }
            root => generate_table(root, &mut codes, Codeword::new(0, 0))?,
        }

        let table = CodeTable { codes };
        debug!(
            "Assigned {} codes, longest {} bits",
            table.len(),
            table.max_len()
        );
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(|c| c.len as usize).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.codes.iter().map(|(&s, &c)| (s, c))
    }

    /// Bits needed to encode input with the given frequencies. Symbols
    /// missing from the table contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|c| c.len as u64 * count))
            .sum()
    }

    pub fn reverse(&self) -> ReverseCodeTable {
        ReverseCodeTable {
            lookup: self.codes.iter().map(|(&s, &c)| (c, s)).collect(),
            max_len: self.max_len(),
        }
    }
}

fn generate_table(
    node: &HuffNode,
    table: &mut BTreeMap<u8, Codeword>,
    code: Codeword,
) -> Result<()> {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            table.insert(*symbol, code);
        }
        HuffNode::Internal { left, right, .. } => {
            if code.len as usize >= MAX_CODE_LEN {
                return Err(HuffmanError::CodeTooLong {
                    len: code.len as usize + 1,
                });
            }
            generate_table(left, table, code.push(false))?;
            generate_table(right, table, code.push(true))?;
        }
    }
    Ok(())
}

/// Codeword to symbol lookup used by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseCodeTable {
    lookup: BTreeMap<Codeword, u8>,
    max_len: usize,
}

impl ReverseCodeTable {
    pub fn get(&self, code: &Codeword) -> Option<u8> {
        self.lookup.get(code).copied()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
