//! Command-line driver for the utf8lex core.
//!
//! Lexes files with a built-in demonstration grammar, feeding them through
//! the buffer chain in fixed-size chunks, and exposes the category and
//! grapheme helpers of the core for inspection.

use std::sync::Once;

pub mod commands;
pub mod grammar;
mod options;

pub use grammar::Grammar;
pub use options::{parse_options, Options, DEFAULT_CHUNK};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=utf8lex_core=debug`; `trace` adds one line per
/// token and a nested span per multi-definition.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_indent_lines(true);
            tracing_subscriber::registry().with(tree).with(filter).init();
        }
    });
}
