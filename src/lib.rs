//! # tinflate
//!
//! A small, safe decompressor for raw DEFLATE (RFC 1951) streams.
//!
//! The engine inflates a complete stream in one synchronous call into an
//! output buffer whose maximum size the caller already knows, such as a
//! compressed binary blob embedded in a larger artifact. There is no zlib
//! or gzip container handling, no checksum verification and no streaming
//! across calls.
//!
//! ## Features
//!
//! - **Stored, fixed-Huffman and dynamic-Huffman blocks**
//! - **Canonical Huffman decoding** straight from per-length code counts
//! - **No unsafe code**, no panics on malformed input
//! - Shared fixed tables, everything else allocated per call
//!
//! ## Example
//!
//! ```rust
//! // A final stored block holding "hello".
//! let stream = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'h', b'e', b'l', b'l', b'o'];
//!
//! let output = tinflate::decompress(&stream, 64).unwrap();
//! assert_eq!(output, b"hello");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bit_reader;
pub mod error;
pub mod huffman;
pub mod inflate;
pub mod tables;

pub use bit_reader::BitCursor;
pub use error::{DataError, Result};
pub use huffman::HuffmanTable;
pub use inflate::{
    decompress, decompress_into, decompress_with, BlockCounts, BlockKind, InflateOptions,
    Inflated,
};
