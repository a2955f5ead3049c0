//! Fuzz target for raw DEFLATE decompression.
//!
//! Arbitrary streams must either inflate within the capacity or return a
//! data error; never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Structured input for inflate fuzzing.
#[derive(Arbitrary, Debug)]
struct InflateInput {
    /// Output capacity, kept small to avoid OOM
    capacity: u16,
    /// Compressed stream
    data: Vec<u8>,
}

fuzz_target!(|input: InflateInput| {
    let capacity = input.capacity as usize;

    if let Ok(output) = tinflate::decompress(&input.data, capacity) {
        assert!(output.len() <= capacity, "output exceeds capacity");
    }

    // The buffer API must agree with the allocating one.
    let mut dest = vec![0u8; capacity];
    let into = tinflate::decompress_into(&input.data, &mut dest);
    let alloc = tinflate::decompress(&input.data, capacity);
    match (into, alloc) {
        (Ok(n), Ok(out)) => assert_eq!(&dest[..n], out.as_slice()),
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("mismatch: {a:?} vs {b:?}"),
    }
});
