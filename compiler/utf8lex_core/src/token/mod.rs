//! Tokens produced by the lexer.

use std::fmt;
use std::sync::Arc;

use crate::definition::DefinitionId;
use crate::error::{ErrorCode, LexError, LexResult};
use crate::location::Locations;
use crate::rule::RuleId;

/// One match: the rule and definition that produced it, where it sits in
/// the input, a copy of its bytes, and one sub-token per matched reference
/// when the definition is a multi-definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub rule: RuleId,
    pub definition: DefinitionId,
    /// Name of `definition`.
    pub name: Arc<str>,
    /// Absolute position from the start of the input.
    pub loc: Locations,
    pub bytes: Vec<u8>,
    pub sub_tokens: Vec<Token>,
}

impl Token {
    /// Byte length.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The token text, lossily decoded.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Copy the token bytes into `dest`, returning the number written.
    ///
    /// Fails with `BAD_LENGTH` if `dest` is too small; nothing is written then.
    pub fn copy_string(&self, dest: &mut [u8]) -> LexResult<usize> {
        let len = self.bytes.len();
        let available = dest.len();
        let Some(dest) = dest.get_mut(..len) else {
            return Err(LexError::with_detail(
                ErrorCode::BadLength,
                format!("token needs {len} bytes, destination holds {available}"),
            ));
        };
        dest.copy_from_slice(&self.bytes);
        Ok(len)
    }

    /// The `nth` (0-based) direct sub-token named `name`.
    pub fn sub_token(&self, name: &str, nth: usize) -> LexResult<&Token> {
        sub_token_find(&self.sub_tokens, name, nth)
    }
}

/// The `nth` (0-based) token named `name` in `tokens`.
pub fn sub_token_find<'a>(tokens: &'a [Token], name: &str, nth: usize) -> LexResult<&'a Token> {
    tokens
        .iter()
        .filter(|token| &*token.name == name)
        .nth(nth)
        .ok_or_else(|| {
            LexError::with_detail(
                ErrorCode::NotFound,
                format!("no sub-token \"{name}\" #{nth}"),
            )
        })
}

impl fmt::Display for Token {
    /// `name "text" (byte 0+6, char 0+6, grapheme 0+6, line 0+0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} ({})", self.name, self.text(), self.loc)
    }
}

#[cfg(test)]
mod tests;
