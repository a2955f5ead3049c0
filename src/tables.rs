//! Static DEFLATE code tables (RFC 1951 §3.2.5 and §3.2.7).
//!
//! Built at compile time and never mutated, so they are shared freely
//! across threads.

/// Number of entries in the length and distance extra-bit/base tables.
pub const TABLE_SIZE: usize = 30;

/// Order in which code-length-alphabet lengths are transmitted.
pub const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Extra bits and base value tables for a code alphabet.
///
/// The first `delta` codes carry no extra bits; after that every `delta`
/// codes the extra-bit count grows by one, and each base is the previous
/// base plus the number of values the previous code covers.
const fn build_bits_base(delta: usize, first: u16) -> ([u8; TABLE_SIZE], [u16; TABLE_SIZE]) {
    let mut bits = [0u8; TABLE_SIZE];
    let mut base = [0u16; TABLE_SIZE];

    let mut i = delta;
    while i < TABLE_SIZE {
        bits[i] = ((i - delta) / delta) as u8;
        i += 1;
    }

    let mut sum = first;
    let mut i = 0;
    while i < TABLE_SIZE {
        base[i] = sum;
        sum = sum.wrapping_add(1 << bits[i]);
        i += 1;
    }

    (bits, base)
}

const fn build_length_tables() -> ([u8; TABLE_SIZE], [u16; TABLE_SIZE]) {
    let (mut bits, mut base) = build_bits_base(4, 3);
    // Code 285 is length 258 with no extra bits, off the generic progression.
    bits[28] = 0;
    base[28] = 258;
    (bits, base)
}

const LENGTH_TABLES: ([u8; TABLE_SIZE], [u16; TABLE_SIZE]) = build_length_tables();
const DISTANCE_TABLES: ([u8; TABLE_SIZE], [u16; TABLE_SIZE]) = build_bits_base(2, 1);

/// Extra bits for length codes 257..=286, indexed by `symbol - 257`.
pub const LENGTH_EXTRA: [u8; TABLE_SIZE] = LENGTH_TABLES.0;

/// Base match length for length codes, indexed by `symbol - 257`.
pub const LENGTH_BASE: [u16; TABLE_SIZE] = LENGTH_TABLES.1;

/// Extra bits for distance codes 0..30.
pub const DISTANCE_EXTRA: [u8; TABLE_SIZE] = DISTANCE_TABLES.0;

/// Base match distance for distance codes 0..30.
pub const DISTANCE_BASE: [u16; TABLE_SIZE] = DISTANCE_TABLES.1;
