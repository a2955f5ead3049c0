//! Bit-level reader for DEFLATE streams.
//!
//! DEFLATE packs data elements LSB-first, while Huffman codes are packed
//! starting with the most significant bit of the code. The cursor keeps a
//! small accumulator (`tag`) that is refilled a byte at a time.

use crate::error::{DataError, Result};
use crate::huffman::{HuffmanTable, MAX_CODE_LENGTH};

/// Refill target: enough buffered bits for any single read of up to 16 bits.
const REFILL_BITS: u32 = 24;

/// Widest field `read_bits` accepts.
const MAX_READ_BITS: u8 = 16;

/// Cursor over a compressed DEFLATE byte stream.
///
/// Refills read zero bytes past the end of `source`; those padding bytes
/// are accounted for so that consuming any of their bits reports
/// [`DataError::UnexpectedEof`].
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    source: &'a [u8],
    /// Next byte to load into `tag`. May run past `source.len()`.
    source_index: usize,
    tag: u32,
    /// Number of valid low bits in `tag`.
    bit_count: u32,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            source_index: 0,
            tag: 0,
            bit_count: 0,
        }
    }

    #[inline]
    fn next_byte(&mut self) -> u32 {
        let byte = self.source.get(self.source_index).copied().unwrap_or(0);
        self.source_index += 1;
        byte as u32
    }

    #[inline]
    fn refill(&mut self) {
        while self.bit_count < REFILL_BITS {
            self.tag |= self.next_byte() << self.bit_count;
            self.bit_count += 8;
        }
    }

    /// Fail if any consumed bit came from padding past the end of input.
    #[inline]
    fn check_overrun(&self) -> Result<()> {
        let padded = self.source_index.saturating_sub(self.source.len());
        if (self.bit_count as usize) < padded * 8 {
            return Err(DataError::UnexpectedEof);
        }
        Ok(())
    }

    /// Read a single bit.
    pub fn get_bit(&mut self) -> Result<u32> {
        if self.bit_count == 0 {
            self.tag = self.next_byte();
            self.bit_count = 8;
        }
        let bit = self.tag & 1;
        self.tag >>= 1;
        self.bit_count -= 1;
        self.check_overrun()?;
        Ok(bit)
    }

    /// Read `n` bits (LSB-first) and add `base` to the value.
    ///
    /// Reading zero bits returns `base` without touching the stream. Fields
    /// wider than 16 bits do not occur in DEFLATE and fail with
    /// [`DataError::InvalidCode`].
    pub fn read_bits(&mut self, n: u8, base: u32) -> Result<u32> {
        if n == 0 {
            return Ok(base);
        }
        if n > MAX_READ_BITS {
            return Err(DataError::InvalidCode);
        }
        self.refill();

        let n = n as u32;
        let value = self.tag & ((1u32 << n) - 1);
        self.tag >>= n;
        self.bit_count -= n;
        self.check_overrun()?;
        Ok(value + base)
    }

    /// Decode one symbol with a canonical Huffman table.
    ///
    /// Walks the code one bit at a time. After `len` bits, `cur` is the
    /// code value relative to the first code of that length; it turns
    /// negative exactly when the code falls inside the length group, and
    /// `sum + cur` is then the symbol's rank in the translation table.
    pub fn decode_symbol(&mut self, table: &HuffmanTable) -> Result<u16> {
        self.refill();

        let counts = table.length_counts();
        let mut sum: i32 = 0;
        let mut cur: i32 = 0;
        let mut len: usize = 0;

        loop {
            cur = 2 * cur + (self.tag & 1) as i32;
            self.tag >>= 1;
            len += 1;
            if len > MAX_CODE_LENGTH {
                return Err(DataError::InvalidCode);
            }
            let count = counts[len] as i32;
            sum += count;
            cur -= count;
            if cur < 0 {
                break;
            }
        }

        self.bit_count -= len as u32;
        self.check_overrun()?;
        Ok(table.symbols()[(sum + cur) as usize])
    }

    /// Drop partially consumed bits and give back whole buffered bytes,
    /// leaving the cursor on the next byte boundary.
    pub fn align_to_byte(&mut self) {
        while self.bit_count >= 8 {
            self.source_index -= 1;
            self.bit_count -= 8;
        }
        self.tag = 0;
        self.bit_count = 0;
    }

    /// Take `n` raw bytes. The cursor must be byte-aligned.
    pub fn read_aligned(&mut self, n: usize) -> Result<&'a [u8]> {
        debug_assert_eq!(self.bit_count, 0);
        let end = self
            .source_index
            .checked_add(n)
            .filter(|&end| end <= self.source.len())
            .ok_or(DataError::UnexpectedEof)?;
        let bytes = &self.source[self.source_index..end];
        self.source_index = end;
        Ok(bytes)
    }

    /// Number of source bytes consumed so far, counting a partially read
    /// byte as consumed and excluding buffered whole bytes.
    pub fn position(&self) -> usize {
        let buffered = (self.bit_count / 8) as usize;
        self.source_index
            .saturating_sub(buffered)
            .min(self.source.len())
    }
}
