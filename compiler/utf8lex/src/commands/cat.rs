//! `utf8lex cat <expr>`: normalize a category expression.

use utf8lex_core::{format_cat, parse_cat, LexResult};

/// Parse `expr` and print it back in its shortest form, with the raw bits.
pub fn format_category(expr: &str) -> LexResult<String> {
    let cat = parse_cat(expr)?;
    Ok(format!("{}  (0x{:08X})", format_cat(cat), cat.bits()))
}
