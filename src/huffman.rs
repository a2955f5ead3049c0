//! Canonical Huffman decode tables for DEFLATE.
//!
//! A table holds only the number of codes of each bit length and the
//! symbols sorted by (code length, symbol value). No tree is built; the
//! canonical ordering is enough for [`BitCursor::decode_symbol`].
//!
//! [`BitCursor::decode_symbol`]: crate::bit_reader::BitCursor::decode_symbol

use std::sync::OnceLock;

use crate::error::{DataError, Result};

/// Maximum code length for DEFLATE (15 bits for literals/lengths and distances).
pub const MAX_CODE_LENGTH: usize = 15;

/// Size of the literal/length alphabet, the largest DEFLATE alphabet.
pub const MAX_SYMBOLS: usize = 288;

/// Number of distance symbols (30 usable, 2 reserved).
pub const NUM_DISTANCE_SYMBOLS: usize = 32;

/// Symbol marking the end of a compressed block.
pub const END_OF_BLOCK: u16 = 256;

/// Canonical Huffman decode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    /// Number of codes of each length; index 0 is always zero.
    counts: [u16; MAX_CODE_LENGTH + 1],
    /// Symbols in canonical code order.
    symbols: [u16; MAX_SYMBOLS],
}

impl HuffmanTable {
    fn empty() -> Self {
        Self {
            counts: [0; MAX_CODE_LENGTH + 1],
            symbols: [0; MAX_SYMBOLS],
        }
    }

    /// Build a table from per-symbol code lengths. Length 0 means the
    /// symbol is unused.
    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        let mut table = Self::empty();
        table.build(lengths)?;
        Ok(table)
    }

    /// Rebuild this table in place from per-symbol code lengths.
    pub fn build(&mut self, lengths: &[u8]) -> Result<()> {
        if lengths.len() > MAX_SYMBOLS {
            return Err(DataError::InvalidCode);
        }

        self.counts = [0; MAX_CODE_LENGTH + 1];
        for &len in lengths {
            let len = len as usize;
            if len > MAX_CODE_LENGTH {
                return Err(DataError::InvalidCode);
            }
            self.counts[len] += 1;
        }
        self.counts[0] = 0;

        // Starting rank of each length group.
        let mut offsets = [0u16; MAX_CODE_LENGTH + 1];
        let mut sum = 0u16;
        for (offset, &count) in offsets.iter_mut().zip(self.counts.iter()) {
            *offset = sum;
            sum += count;
        }

        for (symbol, &len) in lengths.iter().enumerate() {
            if len != 0 {
                let slot = &mut offsets[len as usize];
                self.symbols[*slot as usize] = symbol as u16;
                *slot += 1;
            }
        }

        Ok(())
    }

    /// Number of codes of each bit length, indexed by length.
    pub fn length_counts(&self) -> &[u16; MAX_CODE_LENGTH + 1] {
        &self.counts
    }

    /// Symbols in canonical code order. Only the first
    /// `length_counts().iter().sum()` entries are meaningful.
    pub fn symbols(&self) -> &[u16; MAX_SYMBOLS] {
        &self.symbols
    }

    /// Number of symbols that have a code.
    pub fn num_codes(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Fixed literal/length table (RFC 1951 §3.2.6).
    pub fn fixed_literal() -> &'static HuffmanTable {
        &fixed_tables().0
    }

    /// Fixed distance table (RFC 1951 §3.2.6).
    pub fn fixed_distance() -> &'static HuffmanTable {
        &fixed_tables().1
    }
}

static FIXED_TABLES: OnceLock<(HuffmanTable, HuffmanTable)> = OnceLock::new();

fn fixed_tables() -> &'static (HuffmanTable, HuffmanTable) {
    FIXED_TABLES.get_or_init(build_fixed_tables)
}

/// Populate the fixed tables directly in canonical order:
/// 7-bit codes 256..=279, 8-bit codes 0..=143 then 280..=287,
/// 9-bit codes 144..=255, and 32 five-bit distance codes.
fn build_fixed_tables() -> (HuffmanTable, HuffmanTable) {
    let mut lit = HuffmanTable::empty();
    lit.counts[7] = 24;
    lit.counts[8] = 152;
    lit.counts[9] = 112;

    let order = (256..280).chain(0..144).chain(280..288).chain(144..256);
    for (slot, symbol) in lit.symbols.iter_mut().zip(order) {
        *slot = symbol;
    }

    let mut dist = HuffmanTable::empty();
    dist.counts[5] = NUM_DISTANCE_SYMBOLS as u16;
    for (slot, symbol) in dist.symbols.iter_mut().zip(0..NUM_DISTANCE_SYMBOLS as u16) {
        *slot = symbol;
    }

    (lit, dist)
}
