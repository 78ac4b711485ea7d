//! Unicode-aware lexer core.
//!
//! Rules match UTF-8 input one token at a time, tracking every position in
//! bytes, code points, grapheme clusters and lines. A grammar is built from
//! four kinds of [`Pattern`]:
//!
//! - category classes (`[NUM]{1,}`), matched grapheme by grapheme,
//! - literals,
//! - regexes, anchored at the current position,
//! - multi-definitions: alternation or sequence over other definitions,
//!   producing nested sub-tokens.
//!
//! Input arrives in [`Buffer`]s appended to a [`State`]. A token that needs
//! bytes past the last buffer makes [`Lexer::lex`] answer `MORE`; the caller
//! appends another buffer and lexing resumes where it stopped.
//!
//! ```text
//! Registry + RuleSet ──► Lexer ──lex(&mut State)──► Token
//!                                      ▲
//!                         Buffer ──────┘ append
//! ```

mod buffer;
mod cat;
mod definition;
mod error;
mod grapheme;
mod lexer;
mod location;
mod matcher;
mod printable;
mod rule;
mod settings;
mod stack;
mod state;
mod string;
mod token;

pub use buffer::{Buffer, BufferChain, MAX_BUFFERS};
pub use cat::{category_of, format_cat, parse_cat, Cat};
pub use definition::{
    ClassPattern, Definition, DefinitionId, LiteralPattern, MultiKind, MultiPattern, Pattern,
    Reference, RegexPattern, Registry, Scope, MAX_DEFINITIONS,
};
pub use error::{error_string, ErrorCode, ErrorKind, LexError, LexResult};
pub use grapheme::{graphemes, peek_category, read_grapheme, Grapheme, Graphemes};
pub use lexer::{Lexer, Tokens};
pub use location::{Location, Locations, Unit, UNIT_COUNT};
pub use printable::{printable, printable_str, unescape_printable, PrintableFlags};
pub use rule::{Rule, RuleId, RuleSet};
pub use settings::{Settings, DEFAULT_MAX_REPETITIONS, DEFAULT_MAX_STACK_DEPTH};
pub use stack::ensure_sufficient_stack;
pub use state::State;
pub use string::ByteString;
pub use token::{sub_token_find, Token};

// Grammars are shared across threads; only `State` is per session.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<RuleSet>();
    assert_send_sync::<Token>();
};
