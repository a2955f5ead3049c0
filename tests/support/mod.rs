//! Shared helpers for integration tests.

pub mod bit_writer;
