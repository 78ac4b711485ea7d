//! One-grapheme-at-a-time UTF-8 reader.
//!
//! [`read_grapheme`] decodes the extended grapheme cluster (UAX #29) that
//! starts at a byte offset and reports its extent in bytes and code points,
//! the leading code point and that code point's general category. It is a
//! pure function: the caller applies the result with
//! [`Locations::record`](crate::location::Locations::record) only on success,
//! so a failed read never leaves partial state behind.
//!
//! # Buffer ends
//!
//! A cluster can always be extended by a following combining code point, so
//! the last cluster of a buffer that is not at end of input is never
//! reported: the reader answers `MORE` instead. The same goes for a UTF-8
//! sequence cut off by the buffer end.

use unicode_segmentation::UnicodeSegmentation;

use crate::cat::{category_of, Cat};
use crate::error::{ErrorCode, LexError, LexResult};

/// Bytes decoded up front when looking for the next cluster boundary.
const DECODE_WINDOW: usize = 64;

/// A decoded grapheme cluster.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Grapheme {
    /// UTF-8 bytes in the cluster.
    pub bytes: usize,
    /// Code points in the cluster.
    pub chars: usize,
    /// First code point of the cluster.
    pub codepoint: char,
    /// Category of `codepoint`, plus [`Cat::NEWLINE`] for line breaks.
    pub category: Cat,
    /// Wrapping sum of the cluster's bytes.
    pub byte_sum: u64,
    /// Wrapping sum of the cluster's code points.
    pub char_sum: u64,
}

impl Grapheme {
    /// LF, CR, CRLF, NEL, LS, PS, FF or VT.
    #[inline]
    pub fn is_line_break(&self) -> bool {
        self.category.contains(Cat::NEWLINE)
    }

    /// Measure a complete cluster.
    fn measure(cluster: &str) -> Option<Self> {
        let codepoint = cluster.chars().next()?;
        let mut category = category_of(codepoint);
        if is_line_break(cluster) {
            category |= Cat::NEWLINE;
        }

        Some(Grapheme {
            bytes: cluster.len(),
            chars: cluster.chars().count(),
            codepoint,
            category,
            byte_sum: cluster
                .bytes()
                .fold(0u64, |sum, b| sum.wrapping_add(u64::from(b))),
            char_sum: cluster
                .chars()
                .fold(0u64, |sum, c| sum.wrapping_add(u64::from(u32::from(c)))),
        })
    }
}

/// Line-break clusters. CR LF is a single cluster; LF CR is two.
fn is_line_break(cluster: &str) -> bool {
    matches!(
        cluster,
        "\n" | "\r" | "\r\n" | "\u{0085}" | "\u{2028}" | "\u{2029}" | "\u{000C}" | "\u{000B}"
    )
}

/// Read the grapheme cluster starting at `bytes[offset]`.
///
/// # Errors
///
/// - `BAD_START` if `offset` lies past the end of `bytes`.
/// - `EOF` at the end of `bytes` when `is_eof`; `MORE` otherwise.
/// - `MORE` when the cluster (or its UTF-8 encoding) reaches the end of
///   `bytes` and `is_eof` is false.
/// - `BAD_UTF8` (with the offset of the bad byte) when nothing decodable
///   starts at `offset`. Bytes after a valid cluster are left for the next
///   call.
pub fn read_grapheme(bytes: &[u8], offset: usize, is_eof: bool) -> LexResult<Grapheme> {
    if offset > bytes.len() {
        return Err(LexError::at(ErrorCode::BadStart, offset));
    }
    let tail = &bytes[offset..];
    if tail.is_empty() {
        return Err(if is_eof {
            LexError::eof()
        } else {
            LexError::more()
        });
    }

    // Only a window of the tail is decoded; it doubles while the first
    // cluster could still run past it.
    let mut window = DECODE_WINDOW;
    loop {
        let at_end = window >= tail.len();
        let head = if at_end { tail } else { &tail[..window] };
        let (text, stops_at_invalid, truncated) = decode_prefix(head, offset)?;

        // A cluster running up to the end of the decoded text could still
        // be extended, unless an undecodable byte follows.
        let cluster = text.graphemes(true).next();
        let complete = cluster.is_some_and(|c| c.len() < text.len() || stops_at_invalid);
        if !complete && !at_end {
            window *= 2;
            continue;
        }

        let Some(cluster) = cluster else {
            if truncated && !is_eof {
                return Err(LexError::more());
            }
            return Err(LexError::at(ErrorCode::BadUtf8, offset));
        };
        if !complete && !is_eof {
            return Err(LexError::more());
        }
        return Grapheme::measure(cluster).ok_or(LexError::at(ErrorCode::BadLength, offset));
    }
}

/// Longest valid UTF-8 prefix of `head`, whether an undecodable byte ends it,
/// and whether it ends in the middle of a sequence instead.
fn decode_prefix(head: &[u8], offset: usize) -> LexResult<(&str, bool, bool)> {
    match std::str::from_utf8(head) {
        Ok(text) => Ok((text, false, false)),
        Err(error) => {
            let text = std::str::from_utf8(&head[..error.valid_up_to()])
                .map_err(|_| LexError::at(ErrorCode::BadUtf8, offset))?;
            let truncated = error.error_len().is_none();
            Ok((text, !truncated, truncated))
        }
    }
}

/// Category of the code point starting at `bytes[offset]`, without waiting
/// for the rest of its cluster.
///
/// Later code points never change a cluster's leading code point, so a
/// caller that only needs the category can decide even when
/// [`read_grapheme`] would answer `MORE`. Returns `None` if no complete code
/// point starts at `offset`.
pub fn peek_category(bytes: &[u8], offset: usize) -> Option<Cat> {
    let tail = bytes.get(offset..)?;
    let head = &tail[..tail.len().min(4)];
    let valid = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(error) => std::str::from_utf8(&head[..error.valid_up_to()]).ok()?,
    };
    let codepoint = valid.chars().next()?;
    let mut category = category_of(codepoint);
    if is_line_break(codepoint.encode_utf8(&mut [0; 4])) {
        category |= Cat::NEWLINE;
    }
    Some(category)
}

/// Iterate over the clusters of a complete text, yielding `(offset, grapheme)`.
///
/// Stops at the first error, which is yielded as the final item (except
/// `EOF`, which simply ends iteration).
pub fn graphemes(bytes: &[u8]) -> Graphemes<'_> {
    Graphemes {
        bytes,
        offset: 0,
        done: false,
    }
}

/// Iterator returned by [`graphemes`].
pub struct Graphemes<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl Iterator for Graphemes<'_> {
    type Item = LexResult<(usize, Grapheme)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_grapheme(self.bytes, self.offset, true) {
            Ok(grapheme) => {
                let start = self.offset;
                self.offset += grapheme.bytes;
                Some(Ok((start, grapheme)))
            }
            Err(error) if error.is_eof() => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
