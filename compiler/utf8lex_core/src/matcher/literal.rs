//! Literal matching.

use super::Input;
use crate::definition::LiteralPattern;
use crate::error::{LexError, LexResult};
use crate::location::Locations;

/// Compare the literal byte for byte. A buffer that ends partway through a
/// possible match answers `MORE` unless it is the end of input.
pub(super) fn match_literal(
    literal: &LiteralPattern,
    input: Input<'_>,
    offset: usize,
    at: Locations,
) -> LexResult<Locations> {
    let text = literal.as_bytes();
    let available = &input.bytes[offset..];

    if available.starts_with(text) {
        let mut loc = at;
        loc.extend(literal.extent());
        Ok(loc)
    } else if !input.is_eof && text.starts_with(available) {
        Err(LexError::more())
    } else {
        Err(LexError::no_match())
    }
}
