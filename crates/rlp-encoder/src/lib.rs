//! # RLP Encoder
//!
//! Streaming Recursive Length Prefix encoding into caller-supplied,
//! fixed-capacity buffers.
//!
//! ## Components
//!
//! | Module | Type | Role |
//! |--------|------|------|
//! | `sink` | [`ByteSink`] | Bounds-checked append-only buffer |
//! | `encoder` | [`RlpEncoder`] | Integers, byte strings, backpatched lists |
//!
//! ## Guarantees
//!
//! - No allocation: output capacity is fixed by the caller
//! - A failing call leaves the cursor exactly where it was
//! - Lists close in strict LIFO order; out-of-order `end_list` is rejected
//!
//! ## Example
//!
//! ```
//! use rlp_encoder::RlpEncoder;
//!
//! let mut buf = [0u8; 16];
//! let mut enc = RlpEncoder::from_buffer(&mut buf).unwrap();
//! let list = enc.begin_list().unwrap();
//! enc.encode_bytes(b"cat").unwrap();
//! enc.encode_bytes(b"dog").unwrap();
//! enc.end_list(list).unwrap();
//! assert_eq!(enc.as_bytes(), b"\xc8\x83cat\x83dog");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoder;
pub mod error;
pub mod sink;

// Re-exports
pub use encoder::{minimal_be, Checkpoint, ListMarker, RlpEncoder, MAX_DEPTH};
pub use error::EncoderError;
pub use sink::ByteSink;
