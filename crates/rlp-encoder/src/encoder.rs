//! # RLP Encoder
//!
//! Streams RLP items into a [`ByteSink`].
//!
//! ## Encoding rules
//!
//! - Single byte [0x00, 0x7f]: itself
//! - String 0-55 bytes: 0x80 + len, then data
//! - String 56+ bytes: 0xb7 + len_of_len, then len, then data
//! - List payload 0-55 bytes: 0xc0 + len, then items
//! - List payload 56+ bytes: 0xf7 + len_of_len, then len, then items
//!
//! ## Lists
//!
//! A list's payload length is unknown when it starts, so `begin_list`
//! reserves a single prefix byte and `end_list` patches it. When the payload
//! turns out to be 56 bytes or longer the payload is moved right to make room
//! for the length bytes. Inner lists always sit after every enclosing list's
//! prefix, so closing them in LIFO order never invalidates an outer marker.

use crate::error::EncoderError;
use crate::sink::ByteSink;

/// Maximum list nesting depth.
pub const MAX_DEPTH: usize = 16;

/// Empty string / integer zero.
pub const EMPTY_STRING: u8 = 0x80;
/// Base of the long-string prefix range.
pub const LONG_STRING_BASE: u8 = 0xb7;
/// Empty list, also the base of the short-list prefix range.
pub const EMPTY_LIST: u8 = 0xc0;
/// Base of the long-list prefix range.
pub const LONG_LIST_BASE: u8 = 0xf7;

/// Payloads shorter than this use the single-byte prefix form.
const SHORT_LIMIT: usize = 56;

/// Handle to an open list: the offset of its reserved prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker(usize);

impl ListMarker {
    /// Offset of the list's prefix byte in the output.
    pub fn offset(&self) -> usize {
        self.0
    }
}

/// Snapshot of encoder state used to undo a partially written item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
    depth: usize,
    innermost: Option<usize>,
}

/// Streaming RLP encoder over a fixed-capacity buffer.
#[derive(Debug)]
pub struct RlpEncoder<'a> {
    sink: ByteSink<'a>,
    open: [usize; MAX_DEPTH],
    depth: usize,
}

impl<'a> RlpEncoder<'a> {
    /// Create an encoder writing into `sink`.
    pub fn new(sink: ByteSink<'a>) -> Self {
        Self {
            sink,
            open: [0; MAX_DEPTH],
            depth: 0,
        }
    }

    /// Create an encoder over the whole of `buf`.
    pub fn from_buffer(buf: &'a mut [u8]) -> Result<Self, EncoderError> {
        Ok(Self::new(ByteSink::new(buf)?))
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.sink.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sink.is_empty()
    }

    /// The encoded output so far.
    ///
    /// While lists are still open their prefixes are placeholders.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.sink.as_slice()
    }

    /// Number of lists begun but not yet ended.
    #[inline]
    pub fn open_lists(&self) -> usize {
        self.depth
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &ByteSink<'a> {
        &self.sink
    }

    /// Write raw, already-encoded bytes (e.g. a transaction type tag).
    pub fn append_raw(&mut self, bytes: &[u8]) -> Result<(), EncoderError> {
        self.sink.append(bytes)
    }

    /// Encode an unsigned integer.
    ///
    /// Zero is the empty string (`0x80`); anything else is its minimal
    /// big-endian form encoded as a byte string.
    pub fn encode_uint(&mut self, value: u64) -> Result<(), EncoderError> {
        let (bytes, start) = minimal_be(value);
        self.encode_bytes(&bytes[start..])
    }

    /// Encode a single byte with integer semantics: `0` becomes `0x80`.
    pub fn encode_byte(&mut self, value: u8) -> Result<(), EncoderError> {
        self.encode_uint(u64::from(value))
    }

    /// Encode a big-endian integer of any width, dropping leading zero bytes.
    pub fn encode_uint_bytes(&mut self, be: &[u8]) -> Result<(), EncoderError> {
        let start = be.iter().position(|&b| b != 0).unwrap_or(be.len());
        self.encode_bytes(&be[start..])
    }

    /// Encode a byte string.
    pub fn encode_bytes(&mut self, data: &[u8]) -> Result<(), EncoderError> {
        if data.len() == 1 && data[0] < EMPTY_STRING {
            return self.sink.append_byte(data[0]);
        }

        if data.len() < SHORT_LIMIT {
            return self
                .sink
                .append_parts(&[&[EMPTY_STRING + data.len() as u8], data]);
        }

        let (len_bytes, start) = minimal_be(data.len() as u64);
        let len_bytes = &len_bytes[start..];
        let prefix = LONG_STRING_BASE + len_bytes.len() as u8;
        self.sink.append_parts(&[&[prefix], len_bytes, data])
    }

    /// Encode a flat list of byte strings.
    pub fn encode_list(&mut self, items: &[&[u8]]) -> Result<(), EncoderError> {
        let checkpoint = self.checkpoint();
        let result = self.write_list(items);
        if result.is_err() {
            self.restore(checkpoint);
        }
        result
    }

    fn write_list(&mut self, items: &[&[u8]]) -> Result<(), EncoderError> {
        let marker = self.begin_list()?;
        for item in items {
            self.encode_bytes(item)?;
        }
        self.end_list(marker)
    }

    /// Start a list, reserving one prefix byte.
    pub fn begin_list(&mut self) -> Result<ListMarker, EncoderError> {
        if self.depth == MAX_DEPTH {
            return Err(EncoderError::TooDeep { max: MAX_DEPTH });
        }

        let offset = self.sink.len();
        self.sink.append_byte(EMPTY_LIST)?;
        self.open[self.depth] = offset;
        self.depth += 1;
        Ok(ListMarker(offset))
    }

    /// Close the innermost open list and write its final prefix.
    ///
    /// `marker` must be the one returned by the matching `begin_list`.
    pub fn end_list(&mut self, marker: ListMarker) -> Result<(), EncoderError> {
        let innermost = match self.depth {
            0 => return Err(EncoderError::NoOpenList),
            d => self.open[d - 1],
        };
        if marker.0 != innermost {
            return Err(EncoderError::MarkerMismatch {
                expected: innermost,
                got: marker.0,
            });
        }

        let payload_len = self.sink.len() - marker.0 - 1;
        if payload_len < SHORT_LIMIT {
            self.sink
                .overwrite(marker.0, &[EMPTY_LIST + payload_len as u8]);
        } else {
            let (len_bytes, start) = minimal_be(payload_len as u64);
            let len_bytes = &len_bytes[start..];

            self.sink.open_gap(marker.0 + 1, len_bytes.len())?;
            self.sink
                .overwrite(marker.0, &[LONG_LIST_BASE + len_bytes.len() as u8]);
            self.sink.overwrite(marker.0 + 1, len_bytes);

            tracing::trace!(
                offset = marker.0,
                payload_len,
                shift = len_bytes.len(),
                "long list prefix backpatched"
            );
        }

        self.depth -= 1;
        Ok(())
    }

    /// Record the current state so a failed multi-item write can be undone.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.sink.len(),
            depth: self.depth,
            innermost: self.depth.checked_sub(1).map(|d| self.open[d]),
        }
    }

    /// Return to `checkpoint`, discarding everything written since.
    ///
    /// Fails if a list that was open at the checkpoint has since been closed.
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> Result<(), EncoderError> {
        let still_open = self.depth >= checkpoint.depth
            && checkpoint.depth.checked_sub(1).map(|d| self.open[d]) == checkpoint.innermost;
        if !still_open || checkpoint.len > self.sink.len() {
            return Err(EncoderError::InvalidArgument(
                "checkpoint no longer reachable",
            ));
        }
        self.restore(checkpoint);
        Ok(())
    }

    /// Finish encoding and return the number of bytes written.
    ///
    /// Fails with `InvalidArgument` if a list is still open.
    pub fn finish(&self) -> Result<usize, EncoderError> {
        if self.depth != 0 {
            return Err(EncoderError::InvalidArgument("unclosed list"));
        }
        Ok(self.sink.len())
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.sink.truncate(checkpoint.len);
        self.depth = checkpoint.depth;
    }
}

/// Minimal big-endian form of `value` as `(bytes, first_significant)`.
///
/// `&bytes[first_significant..]` is empty for zero.
pub fn minimal_be(value: u64) -> ([u8; 8], usize) {
    let bytes = value.to_be_bytes();
    let start = (value.leading_zeros() / 8) as usize;
    (bytes, start)
}
