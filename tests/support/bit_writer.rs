//! Hand-built DEFLATE streams.
//!
//! Writes fixed-Huffman and stored blocks bit by bit so tests can pin down
//! exact stream layouts that an encoder would not necessarily produce.

#![allow(dead_code)]

use tinflate::tables::{DISTANCE_BASE, DISTANCE_EXTRA, LENGTH_BASE, LENGTH_EXTRA};

/// A bit writer that packs bits into bytes, LSB first.
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    current_byte: u8,
    bit_position: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the low `num_bits` of `value`, LSB first.
    pub fn write_bits(&mut self, value: u32, num_bits: u8) {
        let mut value = value;
        let mut remaining = num_bits;

        while remaining > 0 {
            let available = 8 - self.bit_position;
            let to_write = remaining.min(available);

            let mask = (1u32 << to_write) - 1;
            let bits = (value & mask) as u8;
            self.current_byte |= bits << self.bit_position;

            self.bit_position += to_write;
            value >>= to_write;
            remaining -= to_write;

            if self.bit_position == 8 {
                self.buffer.push(self.current_byte);
                self.current_byte = 0;
                self.bit_position = 0;
            }
        }
    }

    /// Write a Huffman code, most significant bit first.
    pub fn write_code(&mut self, code: u32, len: u8) {
        for i in (0..len).rev() {
            self.write_bits((code >> i) & 1, 1);
        }
    }

    /// Pad the current byte with zeros.
    pub fn align(&mut self) {
        if self.bit_position > 0 {
            self.buffer.push(self.current_byte);
            self.current_byte = 0;
            self.bit_position = 0;
        }
    }

    pub fn bit_position(&self) -> u8 {
        self.bit_position
    }

    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.buffer
    }
}

/// Fixed literal/length code for `symbol` as (code, length).
pub fn fixed_literal_code(symbol: u16) -> (u32, u8) {
    let s = symbol as u32;
    match symbol {
        0..=143 => (0x30 + s, 8),
        144..=255 => (0x190 + s - 144, 9),
        256..=279 => (s - 256, 7),
        _ => (0xC0 + s - 280, 8),
    }
}

/// Writes DEFLATE blocks on top of [`BitWriter`].
#[derive(Debug, Default)]
pub struct StreamWriter {
    bits: BitWriter,
}

impl StreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block header: BFINAL then a 2-bit BTYPE.
    pub fn header(&mut self, is_final: bool, btype: u32) -> &mut Self {
        self.bits.write_bits(is_final as u32, 1);
        self.bits.write_bits(btype, 2);
        self
    }

    pub fn fixed_block(&mut self, is_final: bool) -> &mut Self {
        self.header(is_final, 1)
    }

    pub fn symbol(&mut self, symbol: u16) -> &mut Self {
        let (code, len) = fixed_literal_code(symbol);
        self.bits.write_code(code, len);
        self
    }

    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.symbol(byte as u16)
    }

    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.literal(b);
        }
        self
    }

    /// Match with the canonical length and distance codes.
    pub fn copy(&mut self, length: u16, distance: u16) -> &mut Self {
        let len_idx = (0..29)
            .rev()
            .find(|&i| LENGTH_BASE[i] <= length)
            .expect("length >= 3");
        self.symbol(257 + len_idx as u16);
        self.bits.write_bits(
            (length - LENGTH_BASE[len_idx]) as u32,
            LENGTH_EXTRA[len_idx],
        );

        let dist_idx = (0..30)
            .rev()
            .find(|&i| DISTANCE_BASE[i] <= distance)
            .expect("distance >= 1");
        self.distance_symbol(dist_idx as u16);
        self.bits.write_bits(
            (distance - DISTANCE_BASE[dist_idx]) as u32,
            DISTANCE_EXTRA[dist_idx],
        );
        self
    }

    /// Fixed distance code: 5 bits, MSB-first.
    pub fn distance_symbol(&mut self, symbol: u16) -> &mut Self {
        self.bits.write_code(symbol as u32, 5);
        self
    }

    pub fn end_of_block(&mut self) -> &mut Self {
        self.symbol(256)
    }

    /// Stored block with correct LEN/NLEN.
    pub fn stored_block(&mut self, is_final: bool, data: &[u8]) -> &mut Self {
        let len = data.len() as u16;
        self.stored_block_raw(is_final, len, !len, data)
    }

    /// Stored block with explicit LEN and NLEN fields.
    pub fn stored_block_raw(
        &mut self,
        is_final: bool,
        len: u16,
        nlen: u16,
        data: &[u8],
    ) -> &mut Self {
        self.header(is_final, 0);
        self.bits.align();
        self.bits.write_bits(len as u32, 16);
        self.bits.write_bits(nlen as u32, 16);
        for &b in data {
            self.bits.write_bits(b as u32, 8);
        }
        self
    }

    pub fn bit_position(&self) -> u8 {
        self.bits.bit_position()
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bits).finish()
    }
}
