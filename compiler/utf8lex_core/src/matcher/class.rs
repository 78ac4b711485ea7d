//! Category-class matching.

use super::Input;
use crate::definition::ClassPattern;
use crate::error::{ErrorCode, LexError, LexResult};
use crate::grapheme::{peek_category, read_grapheme};
use crate::location::Locations;

/// Consume graphemes while their category is in `class.cat`, up to
/// `class.max`, and require at least `class.min` of them.
///
/// Malformed UTF-8 after at least one grapheme simply ends the match; the
/// bad byte is reported by whatever tries to match next.
pub(super) fn match_class(
    class: &ClassPattern,
    input: Input<'_>,
    offset: usize,
    at: Locations,
) -> LexResult<Locations> {
    let mut loc = at;
    let mut pos = offset;
    let mut count = 0;

    while class.max.map_or(true, |max| count < max) {
        let grapheme = match read_grapheme(input.bytes, pos, input.is_eof) {
            Ok(grapheme) => grapheme,
            Err(error) if error.is_eof() => break,
            Err(error) if error.is_more() => match peek_category(input.bytes, pos) {
                // The leading code point already rules the cluster out.
                Some(cat) if !cat.intersects(class.cat) => break,
                _ => return Err(error),
            },
            Err(error) if error.code == ErrorCode::BadUtf8 && count > 0 => break,
            Err(error) => return Err(error),
        };
        if !grapheme.category.intersects(class.cat) {
            break;
        }
        loc.record(&grapheme);
        pos += grapheme.bytes;
        count += 1;
    }

    if count < class.min {
        return Err(LexError::no_match());
    }
    Ok(loc)
}
