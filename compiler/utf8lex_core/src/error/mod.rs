//! Result codes shared by every layer of the lexer.
//!
//! Every fallible operation returns [`LexResult`]. Control outcomes (`EOF`,
//! `MORE`) and match failures (`NO_MATCH`) travel as `Err` values too, so a
//! matcher can bail out with `?` and the caller decides whether the code is
//! terminal. [`ErrorCode`] ordinals are stable and form the boundary surface
//! that generated drivers compare against.

use std::fmt;

/// Stable result codes.
///
/// The discriminants are part of the embedding surface; never reorder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ErrorCode {
    Ok = 0,
    Eof = 1,
    More = 2,
    NoMatch = 3,
    NullPointer = 4,
    ChainInsert = 5,
    Cat = 6,
    PatternType = 7,
    EmptyLiteral = 8,
    Regex = 9,
    Unit = 10,
    InfiniteLoop = 11,
    BadLength = 12,
    BadOffset = 13,
    BadStart = 14,
    BadMin = 15,
    BadMax = 16,
    BadRegex = 17,
    BadUtf8 = 18,
    BadError = 19,
    State = 20,
    NotFound = 21,
}

/// Coarse grouping of [`ErrorCode`]s.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// `OK`, `EOF`, `MORE`: not failures, they steer the caller.
    Control,
    /// `NO_MATCH`, `NOT_FOUND`.
    MatchFailure,
    /// Malformed user input: text, regex, category expression, literal.
    InputMalformed,
    /// A caller broke an argument or state contract.
    Argument,
    /// Chain or recursion structure is broken.
    Structural,
    /// The regex engine or the error table itself failed.
    Engine,
}

impl ErrorCode {
    /// Every code in ordinal order.
    pub const ALL: [ErrorCode; 22] = [
        ErrorCode::Ok,
        ErrorCode::Eof,
        ErrorCode::More,
        ErrorCode::NoMatch,
        ErrorCode::NullPointer,
        ErrorCode::ChainInsert,
        ErrorCode::Cat,
        ErrorCode::PatternType,
        ErrorCode::EmptyLiteral,
        ErrorCode::Regex,
        ErrorCode::Unit,
        ErrorCode::InfiniteLoop,
        ErrorCode::BadLength,
        ErrorCode::BadOffset,
        ErrorCode::BadStart,
        ErrorCode::BadMin,
        ErrorCode::BadMax,
        ErrorCode::BadRegex,
        ErrorCode::BadUtf8,
        ErrorCode::BadError,
        ErrorCode::State,
        ErrorCode::NotFound,
    ];

    /// Look up a code by its ordinal. Unknown ordinals map to `BAD_ERROR`.
    pub fn from_ordinal(ordinal: u8) -> ErrorCode {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .unwrap_or(ErrorCode::BadError)
    }

    /// The stable ordinal.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Upper-case name as printed in diagnostics and generated drivers.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::Eof => "EOF",
            ErrorCode::More => "MORE",
            ErrorCode::NoMatch => "NO_MATCH",
            ErrorCode::NullPointer => "NULL_POINTER",
            ErrorCode::ChainInsert => "CHAIN_INSERT",
            ErrorCode::Cat => "CAT",
            ErrorCode::PatternType => "PATTERN_TYPE",
            ErrorCode::EmptyLiteral => "EMPTY_LITERAL",
            ErrorCode::Regex => "REGEX",
            ErrorCode::Unit => "UNIT",
            ErrorCode::InfiniteLoop => "INFINITE_LOOP",
            ErrorCode::BadLength => "BAD_LENGTH",
            ErrorCode::BadOffset => "BAD_OFFSET",
            ErrorCode::BadStart => "BAD_START",
            ErrorCode::BadMin => "BAD_MIN",
            ErrorCode::BadMax => "BAD_MAX",
            ErrorCode::BadRegex => "BAD_REGEX",
            ErrorCode::BadUtf8 => "BAD_UTF8",
            ErrorCode::BadError => "BAD_ERROR",
            ErrorCode::State => "STATE",
            ErrorCode::NotFound => "NOT_FOUND",
        }
    }

    /// Which taxonomy bucket this code belongs to.
    pub const fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::Ok | ErrorCode::Eof | ErrorCode::More => ErrorKind::Control,
            ErrorCode::NoMatch | ErrorCode::NotFound => ErrorKind::MatchFailure,
            ErrorCode::BadUtf8
            | ErrorCode::BadRegex
            | ErrorCode::Cat
            | ErrorCode::EmptyLiteral => ErrorKind::InputMalformed,
            ErrorCode::NullPointer
            | ErrorCode::BadLength
            | ErrorCode::BadOffset
            | ErrorCode::BadStart
            | ErrorCode::BadMin
            | ErrorCode::BadMax
            | ErrorCode::Unit
            | ErrorCode::PatternType
            | ErrorCode::State => ErrorKind::Argument,
            ErrorCode::ChainInsert | ErrorCode::InfiniteLoop => ErrorKind::Structural,
            ErrorCode::Regex | ErrorCode::BadError => ErrorKind::Engine,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error-to-string helper for raw ordinals coming back from generated code.
pub fn error_string(ordinal: u8) -> &'static str {
    ErrorCode::from_ordinal(ordinal).as_str()
}

/// An error (or control outcome) from any lexer operation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// WHAT happened.
    pub code: ErrorCode,
    /// WHERE, as a byte offset, when the failing operation knows it.
    ///
    /// Buffer-relative inside matchers; the lex loop rewrites it to an
    /// absolute offset before returning.
    pub offset: Option<usize>,
    /// Extra text from the regex engine or the category parser.
    pub detail: Option<String>,
}

/// Result alias used throughout the crate.
pub type LexResult<T> = Result<T, LexError>;

impl LexError {
    #[inline]
    pub const fn new(code: ErrorCode) -> Self {
        LexError {
            code,
            offset: None,
            detail: None,
        }
    }

    #[inline]
    pub const fn at(code: ErrorCode, offset: usize) -> Self {
        LexError {
            code,
            offset: Some(offset),
            detail: None,
        }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        LexError {
            code,
            offset: None,
            detail: Some(detail.into()),
        }
    }

    #[inline]
    pub const fn eof() -> Self {
        Self::new(ErrorCode::Eof)
    }

    #[inline]
    pub const fn more() -> Self {
        Self::new(ErrorCode::More)
    }

    #[inline]
    pub const fn no_match() -> Self {
        Self::new(ErrorCode::NoMatch)
    }

    #[inline]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.code == ErrorCode::Eof
    }

    #[inline]
    pub fn is_more(&self) -> bool {
        self.code == ErrorCode::More
    }

    #[inline]
    pub fn is_no_match(&self) -> bool {
        self.code == ErrorCode::NoMatch
    }

    /// Replace the offset, keeping code and detail.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl From<ErrorCode> for LexError {
    fn from(code: ErrorCode) -> Self {
        LexError::new(code)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(offset) = self.offset {
            write!(f, " at byte {offset}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LexError {}
