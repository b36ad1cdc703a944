//! # Byte Sink
//!
//! Bounded, append-only view over a caller-supplied buffer.
//!
//! All mutation goes through [`ByteSink::append_parts`] (or the in-place
//! helpers used by list backpatching), each of which checks capacity up front
//! so a write either lands completely or not at all.

use crate::error::EncoderError;

/// Append-only byte buffer with a fixed capacity.
///
/// The sink never grows: capacity is chosen by the caller at construction.
#[derive(Debug)]
pub struct ByteSink<'a> {
    buf: &'a mut [u8],
    capacity: usize,
    len: usize,
}

impl<'a> ByteSink<'a> {
    /// Wrap the whole buffer.
    pub fn new(buf: &'a mut [u8]) -> Result<Self, EncoderError> {
        let capacity = buf.len();
        Self::with_capacity(buf, capacity)
    }

    /// Wrap the first `capacity` bytes of the buffer.
    ///
    /// Fails with `InvalidArgument` when `capacity` is zero or larger than
    /// the buffer.
    pub fn with_capacity(buf: &'a mut [u8], capacity: usize) -> Result<Self, EncoderError> {
        if capacity == 0 {
            return Err(EncoderError::InvalidArgument("capacity must be non-zero"));
        }
        if capacity > buf.len() {
            return Err(EncoderError::InvalidArgument(
                "capacity exceeds buffer length",
            ));
        }
        Ok(Self {
            buf,
            capacity,
            len: 0,
        })
    }

    /// Reset the write cursor to the start of the buffer.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Current write cursor (bytes written so far).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed capacity of the sink.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes left before reaching capacity.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Append `bytes` at the cursor.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), EncoderError> {
        self.append_parts(&[bytes])
    }

    /// Append a single byte at the cursor.
    pub fn append_byte(&mut self, byte: u8) -> Result<(), EncoderError> {
        self.ensure(1)?;
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Append several slices back to back, all or nothing.
    pub fn append_parts(&mut self, parts: &[&[u8]]) -> Result<(), EncoderError> {
        let total = parts
            .iter()
            .try_fold(0usize, |acc, p| acc.checked_add(p.len()))
            .ok_or(EncoderError::BufferOverflow {
                needed: usize::MAX,
                available: self.remaining(),
            })?;
        self.ensure(total)?;

        for part in parts {
            let end = self.len + part.len();
            self.buf[self.len..end].copy_from_slice(part);
            self.len = end;
        }
        Ok(())
    }

    /// Fail with `BufferOverflow` unless `additional` bytes still fit.
    pub(crate) fn ensure(&self, additional: usize) -> Result<(), EncoderError> {
        if additional > self.remaining() {
            return Err(EncoderError::BufferOverflow {
                needed: additional,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Overwrite bytes already written, starting at `offset`.
    pub(crate) fn overwrite(&mut self, offset: usize, bytes: &[u8]) {
        debug_assert!(offset + bytes.len() <= self.len);
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Open a `gap`-byte hole at `offset` by moving `[offset, len)` right.
    ///
    /// The hole's contents are unspecified until overwritten.
    pub(crate) fn open_gap(&mut self, offset: usize, gap: usize) -> Result<(), EncoderError> {
        debug_assert!(offset <= self.len);
        self.ensure(gap)?;
        self.buf.copy_within(offset..self.len, offset + gap);
        self.len += gap;
        Ok(())
    }

    /// Move the cursor back to `len`, discarding everything after it.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }
}
