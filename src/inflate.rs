//! DEFLATE decompression (RFC 1951).
//!
//! Inflates a raw DEFLATE stream (no zlib or gzip wrapper) into an output
//! buffer whose capacity the caller knows up front. Each call owns its
//! cursor, dynamic tables and scratch buffers; only the fixed tables are
//! shared.

use std::fmt;

use tracing::{debug, trace};

use crate::bit_reader::BitCursor;
use crate::error::{DataError, Result};
use crate::huffman::{HuffmanTable, END_OF_BLOCK, MAX_SYMBOLS, NUM_DISTANCE_SYMBOLS};
use crate::tables::{CODE_LENGTH_ORDER, DISTANCE_BASE, DISTANCE_EXTRA, LENGTH_BASE, LENGTH_EXTRA};

/// Number of symbols in the code-length alphabet.
const NUM_CODE_LENGTH_SYMBOLS: usize = 19;

/// Highest literal/length symbol that encodes a match.
const MAX_LENGTH_SYMBOL: u16 = 285;

/// Highest usable distance symbol.
const MAX_DISTANCE_SYMBOL: u16 = 29;

/// Options for a decompression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateOptions {
    /// Upper bound on the decompressed size in bytes.
    pub capacity: usize,
    /// Require the output to be exactly `capacity` bytes.
    pub exact_size: bool,
}

impl InflateOptions {
    /// Options with the given capacity and no exact-size requirement.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            exact_size: false,
        }
    }

    /// Require the decompressed size to equal the capacity.
    pub fn exact_size(mut self, exact: bool) -> Self {
        self.exact_size = exact;
        self
    }
}

/// DEFLATE block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Uncompressed, byte-aligned block (BTYPE 0).
    Stored,
    /// Block using the fixed Huffman codes (BTYPE 1).
    Fixed,
    /// Block carrying its own Huffman codes (BTYPE 2).
    Dynamic,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Stored => write!(f, "stored"),
            BlockKind::Fixed => write!(f, "fixed"),
            BlockKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Number of blocks of each kind seen in a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCounts {
    /// Stored blocks.
    pub stored: usize,
    /// Fixed Huffman blocks.
    pub fixed: usize,
    /// Dynamic Huffman blocks.
    pub dynamic: usize,
}

impl BlockCounts {
    fn record(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Stored => self.stored += 1,
            BlockKind::Fixed => self.fixed += 1,
            BlockKind::Dynamic => self.dynamic += 1,
        }
    }

    /// Total number of blocks.
    pub fn total(&self) -> usize {
        self.stored + self.fixed + self.dynamic
    }
}

/// Result of a successful decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflated {
    /// Decompressed bytes.
    pub data: Vec<u8>,
    /// Source bytes occupied by the stream, up to the end of the final block.
    pub consumed: usize,
    /// Blocks decoded, by kind.
    pub blocks: BlockCounts,
}

/// Summary of a stream inflated into a caller buffer.
#[derive(Debug, Clone, Copy)]
struct StreamSummary {
    written: usize,
    consumed: usize,
    blocks: BlockCounts,
}

/// Per-call decode state: the cursor and the output written so far.
struct DecodeContext<'a, 'b> {
    cursor: BitCursor<'a>,
    dest: &'b mut [u8],
    dest_len: usize,
}

impl DecodeContext<'_, '_> {
    #[inline]
    fn ensure_room(&self, n: usize) -> Result<()> {
        if n > self.dest.len() - self.dest_len {
            return Err(DataError::OutputOverflow {
                capacity: self.dest.len(),
            });
        }
        Ok(())
    }

    /// Copy a stored block straight from the source.
    fn inflate_stored(&mut self) -> Result<()> {
        self.cursor.align_to_byte();

        let header = self.cursor.read_aligned(4)?;
        let len = u16::from_le_bytes([header[0], header[1]]);
        let nlen = u16::from_le_bytes([header[2], header[3]]);
        if len != !nlen {
            return Err(DataError::StoredLengthMismatch { len, nlen });
        }

        let len = len as usize;
        self.ensure_room(len)?;
        let bytes = self.cursor.read_aligned(len)?;
        self.dest[self.dest_len..self.dest_len + len].copy_from_slice(bytes);
        self.dest_len += len;

        Ok(())
    }

    /// Decode literals and matches until the end-of-block symbol.
    fn inflate_block(&mut self, lit: &HuffmanTable, dist: &HuffmanTable) -> Result<()> {
        loop {
            let symbol = self.cursor.decode_symbol(lit)?;

            if symbol == END_OF_BLOCK {
                return Ok(());
            }

            if symbol < END_OF_BLOCK {
                self.ensure_room(1)?;
                self.dest[self.dest_len] = symbol as u8;
                self.dest_len += 1;
                continue;
            }

            if symbol > MAX_LENGTH_SYMBOL {
                return Err(DataError::InvalidCode);
            }
            let len_idx = (symbol - 257) as usize;
            let length = self
                .cursor
                .read_bits(LENGTH_EXTRA[len_idx], LENGTH_BASE[len_idx] as u32)?
                as usize;

            let dist_symbol = self.cursor.decode_symbol(dist)?;
            if dist_symbol > MAX_DISTANCE_SYMBOL {
                return Err(DataError::InvalidCode);
            }
            let dist_idx = dist_symbol as usize;
            let distance = self
                .cursor
                .read_bits(DISTANCE_EXTRA[dist_idx], DISTANCE_BASE[dist_idx] as u32)?
                as usize;

            if distance > self.dest_len {
                return Err(DataError::DistanceTooFar {
                    distance,
                    available: self.dest_len,
                });
            }
            self.ensure_room(length)?;

            // Forward byte copy: source and destination overlap when
            // distance < length, repeating the last `distance` bytes.
            let offset = self.dest_len - distance;
            for i in 0..length {
                self.dest[self.dest_len + i] = self.dest[offset + i];
            }
            self.dest_len += length;
        }
    }
}

/// Read a dynamic block header and build its literal/length and distance
/// tables.
pub(crate) fn decode_trees(cursor: &mut BitCursor<'_>) -> Result<(HuffmanTable, HuffmanTable)> {
    let hlit = cursor.read_bits(5, 257)? as usize;
    let hdist = cursor.read_bits(5, 1)? as usize;
    let hclen = cursor.read_bits(4, 4)? as usize;
    trace!(hlit, hdist, hclen, "Dynamic block header");

    let mut code_lengths = [0u8; NUM_CODE_LENGTH_SYMBOLS];
    for &idx in CODE_LENGTH_ORDER.iter().take(hclen) {
        code_lengths[idx] = cursor.read_bits(3, 0)? as u8;
    }
    let code_table = HuffmanTable::from_lengths(&code_lengths)?;

    let total = hlit + hdist;
    let mut lengths = [0u8; MAX_SYMBOLS + NUM_DISTANCE_SYMBOLS];
    let mut num = 0;
    while num < total {
        let symbol = cursor.decode_symbol(&code_table)?;

        let (value, repeat) = match symbol {
            0..=15 => {
                lengths[num] = symbol as u8;
                num += 1;
                continue;
            }
            16 => {
                if num == 0 {
                    return Err(DataError::RepeatWithoutPrevious);
                }
                (lengths[num - 1], cursor.read_bits(2, 3)?)
            }
            17 => (0, cursor.read_bits(3, 3)?),
            18 => (0, cursor.read_bits(7, 11)?),
            _ => return Err(DataError::InvalidCode),
        };

        let repeat = repeat as usize;
        if num + repeat > total {
            return Err(DataError::CodeLengthOverflow);
        }
        lengths[num..num + repeat].fill(value);
        num += repeat;
    }

    let lit = HuffmanTable::from_lengths(&lengths[..hlit])?;
    let dist = HuffmanTable::from_lengths(&lengths[hlit..total])?;
    Ok((lit, dist))
}

/// Run the block loop over `source`, writing into `dest`.
fn inflate_stream(source: &[u8], dest: &mut [u8]) -> Result<StreamSummary> {
    let mut ctx = DecodeContext {
        cursor: BitCursor::new(source),
        dest,
        dest_len: 0,
    };
    let mut blocks = BlockCounts::default();

    loop {
        let is_final = ctx.cursor.get_bit()? == 1;
        let kind = match ctx.cursor.read_bits(2, 0)? {
            0 => BlockKind::Stored,
            1 => BlockKind::Fixed,
            2 => BlockKind::Dynamic,
            _ => return Err(DataError::ReservedBlockType),
        };

        match kind {
            BlockKind::Stored => ctx.inflate_stored()?,
            BlockKind::Fixed => {
                ctx.inflate_block(HuffmanTable::fixed_literal(), HuffmanTable::fixed_distance())?
            }
            BlockKind::Dynamic => {
                let (lit, dist) = decode_trees(&mut ctx.cursor)?;
                ctx.inflate_block(&lit, &dist)?;
            }
        }
        blocks.record(kind);

        debug!(
            kind = %kind,
            is_final,
            output = ctx.dest_len,
            "Inflated block"
        );

        if is_final {
            break;
        }
    }

    let summary = StreamSummary {
        written: ctx.dest_len,
        consumed: ctx.cursor.position(),
        blocks,
    };
    debug!(
        consumed = summary.consumed,
        written = summary.written,
        blocks = blocks.total(),
        "Inflated stream"
    );
    Ok(summary)
}

/// Inflate a raw DEFLATE stream with the given options.
pub fn decompress_with(source: &[u8], options: &InflateOptions) -> Result<Inflated> {
    let mut data = Vec::new();
    data
        .try_reserve_exact(options.capacity)
        .map_err(|_| DataError::CapacityTooLarge {
            capacity: options.capacity,
        })?;
    data.resize(options.capacity, 0);
    let summary = inflate_stream(source, &mut data)?;

    if options.exact_size && summary.written != options.capacity {
        return Err(DataError::SizeMismatch {
            expected: options.capacity,
            actual: summary.written,
        });
    }

    data.truncate(summary.written);
    Ok(Inflated {
        data,
        consumed: summary.consumed,
        blocks: summary.blocks,
    })
}

/// Inflate a raw DEFLATE stream whose decompressed size is at most
/// `capacity` bytes.
///
/// Returns exactly the decompressed bytes.
pub fn decompress(source: &[u8], capacity: usize) -> Result<Vec<u8>> {
    decompress_with(source, &InflateOptions::new(capacity)).map(|inflated| inflated.data)
}

/// Inflate a raw DEFLATE stream into `dest`, returning the number of bytes
/// written. `dest.len()` is the capacity.
///
/// On error the contents of `dest` are unspecified.
pub fn decompress_into(source: &[u8], dest: &mut [u8]) -> Result<usize> {
    inflate_stream(source, dest).map(|summary| summary.written)
}
