//! Command handlers for the utf8lex CLI.
//!
//! Each command renders into a `String` so it can be tested without a
//! terminal; `main` decides where the text goes.

use std::io::Read;

mod cat;
mod graphemes;
mod tokens;

pub use cat::format_category;
pub use graphemes::render_graphemes;
pub use tokens::{lex_files, lex_source, render_diagnostic, render_tokens, LexOutcome};

/// Read a file, or standard input for `-`.
pub fn read_input(path: &str) -> Result<Vec<u8>, String> {
    if path == "-" {
        let mut content = Vec::new();
        return std::io::stdin()
            .read_to_end(&mut content)
            .map(|_| content)
            .map_err(|e| format!("error reading standard input: {e}"));
    }
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        _ => format!("error reading '{path}': {e}"),
    })
}
