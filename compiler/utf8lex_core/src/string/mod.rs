//! Bounded byte strings backing lexer buffers.
//!
//! Content is expected to be UTF-8 but is not validated here: malformed
//! sequences surface as `BAD_UTF8` when the grapheme reader reaches them.

use std::fmt;

use crate::error::{ErrorCode, LexError, LexResult};

/// A byte string with a fixed maximum capacity.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct ByteString {
    bytes: Vec<u8>,
    max_capacity: usize,
}

impl ByteString {
    /// Empty string that accepts up to `max_capacity` bytes.
    pub fn with_capacity(max_capacity: usize) -> Self {
        ByteString {
            bytes: Vec::with_capacity(max_capacity),
            max_capacity,
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append bytes, failing with `BAD_LENGTH` past `max_capacity`.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> LexResult<()> {
        let needed = self.bytes.len() + bytes.len();
        if needed > self.max_capacity {
            return Err(LexError::at(ErrorCode::BadLength, needed));
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    pub fn push_str(&mut self, text: &str) -> LexResult<()> {
        self.push_bytes(text.as_bytes())
    }

    /// Drop everything from `len` on. Used when a buffer's tail moves into
    /// its successor.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    /// Put `prefix` in front of the current content, growing the capacity
    /// by the same amount.
    pub(crate) fn prepend(&mut self, prefix: &[u8]) {
        let mut bytes = Vec::with_capacity(prefix.len() + self.bytes.len());
        bytes.extend_from_slice(prefix);
        bytes.extend_from_slice(&self.bytes);
        self.bytes = bytes;
        self.max_capacity += prefix.len();
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        let max_capacity = bytes.len();
        ByteString {
            bytes,
            max_capacity,
        }
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString::from(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(text: &str) -> Self {
        ByteString::from(text.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(text: String) -> Self {
        ByteString::from(text.into_bytes())
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteString({:?}, {}/{})",
            String::from_utf8_lossy(&self.bytes),
            self.bytes.len(),
            self.max_capacity
        )
    }
}

#[cfg(test)]
mod tests;
