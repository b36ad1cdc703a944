//! Encoder error types.

use thiserror::Error;

/// Errors raised by the byte sink and the RLP encoder.
///
/// Every failing call leaves the encoder exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncoderError {
    /// Missing or malformed argument (zero capacity, bad checkpoint, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Not enough room left in the caller-supplied buffer
    #[error("Buffer overflow: need {needed} more bytes, {available} available")]
    BufferOverflow {
        /// Bytes the failing write required
        needed: usize,
        /// Bytes left before reaching capacity
        available: usize,
    },

    /// `end_list` was called with a marker other than the innermost open list
    #[error("List marker mismatch: innermost open list at {expected}, got {got}")]
    MarkerMismatch {
        /// Offset of the innermost open list
        expected: usize,
        /// Offset carried by the marker passed in
        got: usize,
    },

    /// `end_list` was called while no list is open
    #[error("No open list to close")]
    NoOpenList,

    /// List nesting exceeded the fixed marker stack
    #[error("List nesting too deep (max {max})")]
    TooDeep {
        /// Maximum supported nesting depth
        max: usize,
    },
}
