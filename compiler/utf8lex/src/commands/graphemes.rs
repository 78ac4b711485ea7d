//! `utf8lex graphemes <file>`: one line per grapheme cluster.

use std::fmt::Write;

use utf8lex_core::{graphemes, printable, LexResult, PrintableFlags};

/// `offset  "text"  bytes chars  CATEGORY` for every cluster of `source`.
pub fn render_graphemes(source: &[u8]) -> LexResult<String> {
    let mut out = String::new();
    for item in graphemes(source) {
        let (offset, grapheme) = item?;
        let text = printable(
            &source[offset..offset + grapheme.bytes],
            PrintableFlags::DOUBLE_QUOTE,
        );
        let _ = writeln!(
            out,
            "{offset:>8}  \"{text}\"  {}b {}c  U+{:04X} {}",
            grapheme.bytes,
            grapheme.chars,
            u32::from(grapheme.codepoint),
            grapheme.category
        );
    }
    Ok(out)
}
