//! Fuzz target for encoder/decoder agreement.
//!
//! Compresses arbitrary data with flate2 and checks that it inflates back
//! to the original bytes.

#![no_main]

use std::io::Write;

use arbitrary::Arbitrary;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;

/// Structured input for round-trip fuzzing.
#[derive(Arbitrary, Debug)]
struct RoundtripInput {
    /// Compression level (0-9)
    level: u8,
    /// Raw data to compress
    data: Vec<u8>,
}

fuzz_target!(|input: RoundtripInput| {
    // Limit input size to avoid OOM
    if input.data.len() > 1024 * 1024 {
        return;
    }

    let level = (input.level % 10) as u32;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(&input.data).unwrap();
    let compressed = encoder.finish().unwrap();

    let decompressed = tinflate::decompress(&compressed, input.data.len()).unwrap();
    assert_eq!(decompressed, input.data);
});
