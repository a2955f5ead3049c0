//! Error types for the tinflate library.

use std::fmt;

/// Result type alias for tinflate operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// The DEFLATE stream is structurally invalid.
///
/// Every variant aborts the whole decompression; no partial output is
/// returned. Corruption is not transient, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Block header carried the reserved block type 3.
    ReservedBlockType,
    /// Stored block LEN is not the one's complement of NLEN.
    StoredLengthMismatch {
        /// LEN field.
        len: u16,
        /// NLEN field.
        nlen: u16,
    },
    /// Code-length symbol 16 appeared before any length it could repeat.
    RepeatWithoutPrevious,
    /// A code-length repeat ran past HLIT + HDIST entries.
    CodeLengthOverflow,
    /// Bit pattern with no assigned code, or a reserved symbol.
    InvalidCode,
    /// Back-reference points before the start of the output.
    DistanceTooFar {
        /// Match distance.
        distance: usize,
        /// Bytes written so far.
        available: usize,
    },
    /// Output would exceed the caller-supplied capacity.
    OutputOverflow {
        /// Destination capacity in bytes.
        capacity: usize,
    },
    /// The output buffer for the requested capacity could not be allocated.
    CapacityTooLarge {
        /// Requested capacity in bytes.
        capacity: usize,
    },
    /// Stream ended before the final block was complete.
    UnexpectedEof,
    /// Output size differs from the size the caller required.
    SizeMismatch {
        /// Required size.
        expected: usize,
        /// Bytes actually produced.
        actual: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::ReservedBlockType => write!(f, "Data error: reserved block type"),
            DataError::StoredLengthMismatch { len, nlen } => {
                write!(
                    f,
                    "Data error: stored block LEN {:#06x} does not match NLEN {:#06x}",
                    len, nlen
                )
            }
            DataError::RepeatWithoutPrevious => {
                write!(f, "Data error: repeat code with no previous length")
            }
            DataError::CodeLengthOverflow => write!(f, "Data error: too many code lengths"),
            DataError::InvalidCode => write!(f, "Data error: invalid Huffman code"),
            DataError::DistanceTooFar {
                distance,
                available,
            } => {
                write!(
                    f,
                    "Data error: distance {} exceeds {} bytes of output",
                    distance, available
                )
            }
            DataError::OutputOverflow { capacity } => {
                write!(f, "Data error: output exceeds capacity of {} bytes", capacity)
            }
            DataError::CapacityTooLarge { capacity } => {
                write!(f, "Data error: cannot allocate output of {} bytes", capacity)
            }
            DataError::UnexpectedEof => write!(f, "Data error: unexpected end of stream"),
            DataError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Data error: decompressed size mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DataError {}
