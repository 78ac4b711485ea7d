//! Input buffers and the append-only chain that links them.
//!
//! A [`Buffer`] owns one [`ByteString`] and records how much of it lexing
//! has consumed, in all four units. Buffers are appended to a
//! [`BufferChain`], never inserted; the lexer walks the chain front to back.
//!
//! # Continuation
//!
//! A token may straddle two buffers. When a matcher answers `MORE` at the
//! end of a buffer that already has a successor, [`BufferChain::splice_next`]
//! moves the unconsumed tail into the front of the successor and lexing
//! retries there, so matchers always see contiguous bytes.

use tracing::debug;

use crate::error::{ErrorCode, LexError, LexResult};
use crate::location::Locations;
use crate::string::ByteString;

/// Default cap on the number of buffers in one chain.
pub const MAX_BUFFERS: usize = 4096;

/// One chunk of input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Buffer {
    string: ByteString,
    is_eof: bool,
    /// Consumed extent, relative to the start of this buffer.
    loc: Locations,
}

impl Buffer {
    /// Wrap `string`. `is_eof` marks the last buffer of the input.
    pub fn new(string: impl Into<ByteString>, is_eof: bool) -> Self {
        Buffer {
            string: string.into(),
            is_eof,
            loc: Locations::ORIGIN,
        }
    }

    /// The whole input in one buffer.
    pub fn complete(string: impl Into<ByteString>) -> Self {
        Buffer::new(string, true)
    }

    /// A chunk that more input will follow.
    pub fn partial(string: impl Into<ByteString>) -> Self {
        Buffer::new(string, false)
    }

    #[inline]
    pub fn string(&self) -> &ByteString {
        &self.string
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.string.as_bytes()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.is_eof
    }

    /// Consumed extent within this buffer.
    #[inline]
    pub fn loc(&self) -> &Locations {
        &self.loc
    }

    /// Byte offset of the next unconsumed byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.loc.bytes()
    }

    /// Bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        &self.bytes()[self.offset()..]
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset() >= self.string.len()
    }

    /// Mark `consumed` (a token's extent) as read.
    pub(crate) fn consume(&mut self, consumed: &Locations) -> LexResult<()> {
        let mut next = self.loc;
        next.extend(consumed);
        if next.bytes() > self.string.len() {
            return Err(LexError::at(ErrorCode::BadLength, next.bytes()));
        }
        self.loc = next;
        Ok(())
    }
}

/// Append-only sequence of buffers with a read cursor.
#[derive(Clone, Debug)]
pub struct BufferChain {
    buffers: Vec<Buffer>,
    current: usize,
    max_buffers: usize,
}

impl BufferChain {
    pub fn new(first: Buffer, max_buffers: usize) -> Self {
        BufferChain {
            buffers: vec![first],
            current: 0,
            max_buffers,
        }
    }

    /// Number of buffers ever appended (consumed ones included).
    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }

    /// The buffer lexing reads from.
    pub fn current(&self) -> LexResult<&Buffer> {
        self.buffers
            .get(self.current)
            .ok_or(LexError::new(ErrorCode::State))
    }

    pub(crate) fn current_mut(&mut self) -> LexResult<&mut Buffer> {
        self.buffers
            .get_mut(self.current)
            .ok_or(LexError::new(ErrorCode::State))
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// `true` if a buffer follows the current one.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.buffers.len()
    }

    /// The last buffer of the chain.
    pub fn tail(&self) -> Option<&Buffer> {
        self.buffers.last()
    }

    /// Append `buffer` at the end of the chain.
    ///
    /// Fails with `CHAIN_INSERT` once the chain is full or after a buffer
    /// that was marked as end of input.
    pub fn append(&mut self, buffer: Buffer) -> LexResult<()> {
        if self.buffers.len() >= self.max_buffers {
            return Err(LexError::with_detail(
                ErrorCode::ChainInsert,
                format!("buffer chain is limited to {} buffers", self.max_buffers),
            ));
        }
        if self.tail().is_some_and(Buffer::is_eof) {
            return Err(LexError::with_detail(
                ErrorCode::ChainInsert,
                "cannot append after the end-of-input buffer",
            ));
        }
        debug!(
            index = self.buffers.len(),
            bytes = buffer.string.len(),
            is_eof = buffer.is_eof,
            "append buffer"
        );
        self.buffers.push(buffer);
        Ok(())
    }

    /// Drop every buffer. The chain accepts appends again afterwards.
    pub fn clear(&mut self) {
        debug!(buffers = self.buffers.len(), "clear buffer chain");
        self.buffers.clear();
        self.current = 0;
    }

    /// Move to the next buffer. Only valid once the current one is exhausted.
    pub(crate) fn advance(&mut self) -> LexResult<()> {
        if !self.has_next() || !self.current()?.is_exhausted() {
            return Err(LexError::new(ErrorCode::State));
        }
        self.current += 1;
        debug!(index = self.current, "switch to next buffer");
        Ok(())
    }

    /// Move the unconsumed tail of the current buffer into the front of its
    /// successor and make the successor current.
    pub(crate) fn splice_next(&mut self) -> LexResult<()> {
        if !self.has_next() {
            return Err(LexError::new(ErrorCode::State));
        }
        let index = self.current;
        let offset = self.buffers[index].offset();
        let tail = self.buffers[index].remaining().to_vec();
        self.buffers[index].string.truncate(offset);
        self.buffers[index + 1].string.prepend(&tail);
        self.current += 1;
        debug!(
            from = index,
            moved = tail.len(),
            "splice unconsumed bytes into next buffer"
        );
        Ok(())
    }
}
