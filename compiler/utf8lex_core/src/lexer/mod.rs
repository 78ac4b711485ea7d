//! The lexing loop.
//!
//! [`Lexer::lex`] produces one token per call from the current position of
//! a [`State`]:
//!
//! 1. An exhausted buffer hands over to its successor; without one the call
//!    ends with `EOF` (end of input) or `MORE` (append another buffer).
//! 2. Rules are tried in order. Zero-length matches are skipped; the first
//!    non-empty match becomes the token.
//! 3. A `MORE` from a matcher with a successor buffer queued splices the
//!    unconsumed tail into that successor and retries from step 1.
//! 4. The token is committed: buffer and state both move past it.
//!
//! Error offsets are absolute byte offsets into the whole input.

use tracing::{debug, trace};

use crate::definition::Registry;
use crate::error::{ErrorCode, LexError, LexResult};
use crate::location::Unit;
use crate::matcher::{Input, Matcher};
use crate::rule::RuleSet;
use crate::state::State;
use crate::token::Token;

/// A grammar ready to lex: definitions plus rules in priority order.
#[derive(Copy, Clone, Debug)]
pub struct Lexer<'g> {
    registry: &'g Registry,
    rules: &'g RuleSet,
}

impl<'g> Lexer<'g> {
    pub fn new(registry: &'g Registry, rules: &'g RuleSet) -> Self {
        Lexer { registry, rules }
    }

    #[inline]
    pub fn registry(&self) -> &'g Registry {
        self.registry
    }

    #[inline]
    pub fn rules(&self) -> &'g RuleSet {
        self.rules
    }

    /// Read the next token.
    ///
    /// # Errors
    ///
    /// `EOF` once the input is consumed, `MORE` when the last buffer is not
    /// the end of input and the next token needs more bytes, `NO_MATCH` (at
    /// the offending byte) when no rule matches, or whatever a matcher
    /// reports for malformed input or grammar.
    pub fn lex(&self, state: &mut State) -> LexResult<Token> {
        loop {
            let buffer = state.chain.current()?;
            if buffer.is_exhausted() {
                if state.chain.has_next() {
                    state.chain.advance()?;
                    continue;
                }
                return Err(if buffer.is_eof() {
                    LexError::eof()
                } else {
                    LexError::more()
                });
            }

            match self.scan(state) {
                Ok(token) => {
                    state.commit(&token.loc)?;
                    trace!(
                        rule = token.rule.raw(),
                        name = %token.name,
                        start = token.loc[Unit::Byte].start,
                        len = token.len(),
                        "token"
                    );
                    return Ok(token);
                }
                Err(error) if error.is_more() && state.chain.has_next() => {
                    debug!(
                        index = state.chain.current_index(),
                        "token crosses buffer boundary"
                    );
                    state.chain.splice_next()?;
                }
                Err(error) => return Err(state.absolute(error)),
            }
        }
    }

    /// Try every rule at the current position without committing.
    fn scan(&self, state: &mut State) -> LexResult<Token> {
        let State {
            settings,
            chain,
            loc,
            stack_depth,
            caches,
        } = state;
        let buffer = chain.current()?;
        let input = Input {
            bytes: buffer.bytes(),
            is_eof: buffer.is_eof(),
        };
        let offset = buffer.offset();
        let mut matcher = Matcher::new(self.registry, settings, caches, stack_depth);

        for rule in self.rules {
            let found = match matcher.match_rule(rule, input, offset, *loc) {
                Ok(found) => found,
                Err(error) if error.is_no_match() => continue,
                Err(error) => return Err(error),
            };
            if found.loc.is_empty() {
                trace!(rule = %rule.name, "skip zero-length match");
                continue;
            }
            let definition = self.registry.get(rule.definition)?;
            return found.into_token(rule.id, definition, input.bytes, offset);
        }
        Err(LexError::at(ErrorCode::NoMatch, offset))
    }

    /// Iterate over tokens until `EOF`. Any other error is yielded once and
    /// ends the iteration; after `MORE` the state can take another buffer
    /// and a fresh iterator picks up where this one stopped.
    pub fn tokens<'s>(&self, state: &'s mut State) -> Tokens<'g, 's> {
        Tokens {
            lexer: *self,
            state,
            done: false,
        }
    }
}

/// Iterator returned by [`Lexer::tokens`].
pub struct Tokens<'g, 's> {
    lexer: Lexer<'g>,
    state: &'s mut State,
    done: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lexer.lex(self.state) {
            Ok(token) => Some(Ok(token)),
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

#[cfg(test)]
mod tests;
