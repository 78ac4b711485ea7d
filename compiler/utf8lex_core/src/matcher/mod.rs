//! Matching definitions against buffered input.
//!
//! Every matcher is anchored at a byte offset into one contiguous slice and
//! answers with the extent it covers, or with:
//!
//! - `NO_MATCH` when the definition does not match here,
//! - `MORE` when the answer depends on bytes past the end of a buffer that
//!   is not the end of input,
//! - any other error code for malformed input or a malformed grammar.
//!
//! Positions are absolute: callers pass zero-length [`Locations`] for the
//! starting point and get back records that cover the match.

mod class;
mod literal;
mod regex;

use tracing::trace;

use crate::definition::{Definition, DefinitionId, MultiKind, MultiPattern, Pattern, Registry};
use crate::error::{ErrorCode, LexError, LexResult};
use crate::location::Locations;
use crate::rule::{Rule, RuleId};
use crate::settings::Settings;
use crate::stack::ensure_sufficient_stack;
use crate::token::Token;

pub(crate) use regex::RegexCaches;

/// Bytes visible to a matcher.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Input<'a> {
    pub bytes: &'a [u8],
    /// No bytes follow `bytes`.
    pub is_eof: bool,
}

/// Extent of a successful match plus the sub-tokens of a multi-definition.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Match {
    pub loc: Locations,
    pub sub_tokens: Vec<Token>,
}

impl Match {
    fn leaf(loc: Locations) -> Self {
        Match {
            loc,
            sub_tokens: Vec::new(),
        }
    }

    /// Turn the match of `definition` starting at `bytes[offset]` into a token.
    pub(crate) fn into_token(
        self,
        rule: RuleId,
        definition: &Definition,
        bytes: &[u8],
        offset: usize,
    ) -> LexResult<Token> {
        let end = offset + self.loc.bytes();
        let bytes = bytes
            .get(offset..end)
            .ok_or(LexError::at(ErrorCode::BadLength, end))?;
        Ok(Token {
            rule,
            definition: definition.id,
            name: definition.name.clone(),
            loc: self.loc,
            bytes: bytes.to_vec(),
            sub_tokens: self.sub_tokens,
        })
    }
}

/// Matches definitions of one registry, sharing regex caches and the
/// nesting counter of one lexer state.
pub(crate) struct Matcher<'a> {
    registry: &'a Registry,
    settings: &'a Settings,
    caches: &'a mut RegexCaches,
    depth: &'a mut usize,
    rule: RuleId,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(
        registry: &'a Registry,
        settings: &'a Settings,
        caches: &'a mut RegexCaches,
        depth: &'a mut usize,
    ) -> Self {
        Matcher {
            registry,
            settings,
            caches,
            depth,
            rule: RuleId::new(0),
        }
    }

    /// Match the definition of `rule`. Sub-tokens are tagged with the rule.
    pub(crate) fn match_rule(
        &mut self,
        rule: &Rule,
        input: Input<'_>,
        offset: usize,
        at: Locations,
    ) -> LexResult<Match> {
        self.rule = rule.id;
        self.match_definition(rule.definition, input, offset, at)
    }

    pub(crate) fn match_definition(
        &mut self,
        id: DefinitionId,
        input: Input<'_>,
        offset: usize,
        at: Locations,
    ) -> LexResult<Match> {
        if offset > input.bytes.len() {
            return Err(LexError::at(ErrorCode::BadOffset, offset));
        }
        let registry = self.registry;
        let definition = registry.get(id)?;
        match &definition.pattern {
            Pattern::Class(class) => class::match_class(class, input, offset, at).map(Match::leaf),
            Pattern::Literal(literal) => {
                literal::match_literal(literal, input, offset, at).map(Match::leaf)
            }
            Pattern::Regex(regex) => {
                let cache = self.caches.get(id, regex.dfa());
                regex::match_regex(regex, cache, input, offset, at).map(Match::leaf)
            }
            Pattern::Multi(multi) => self.match_multi(definition, multi, input, offset, at),
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(name = %definition.name, kind = %multi.kind, offset = offset)
    )]
    fn match_multi(
        &mut self,
        definition: &Definition,
        multi: &MultiPattern,
        input: Input<'_>,
        offset: usize,
        at: Locations,
    ) -> LexResult<Match> {
        if *self.depth >= self.settings.max_stack_depth {
            return Err(LexError::with_detail(
                ErrorCode::InfiniteLoop,
                format!(
                    "\"{}\" nested deeper than {} levels",
                    definition.name, self.settings.max_stack_depth
                ),
            ));
        }
        trace!(depth = *self.depth, "enter");

        *self.depth += 1;
        let result = ensure_sufficient_stack(|| match multi.kind {
            MultiKind::Or => self.match_or(multi, input, offset, at),
            MultiKind::Sequence => self.match_sequence(multi, input, offset, at),
        });
        *self.depth -= 1;
        result
    }

    /// First reference that matches, as the single sub-token.
    fn match_or(
        &mut self,
        multi: &MultiPattern,
        input: Input<'_>,
        offset: usize,
        at: Locations,
    ) -> LexResult<Match> {
        for reference in &multi.references {
            let target = reference.target()?;
            match self.match_definition(target, input, offset, at) {
                Ok(found) => {
                    let loc = found.loc;
                    let sub = self.sub_token(target, found, input, offset)?;
                    return Ok(Match {
                        loc,
                        sub_tokens: vec![sub],
                    });
                }
                Err(error) if error.is_no_match() => {}
                Err(error) => return Err(error),
            }
        }
        Err(LexError::no_match())
    }

    /// Every reference in order, each repeated greedily between its bounds.
    /// Every repetition becomes one sub-token.
    fn match_sequence(
        &mut self,
        multi: &MultiPattern,
        input: Input<'_>,
        offset: usize,
        at: Locations,
    ) -> LexResult<Match> {
        let mut loc = at;
        let mut pos = offset;
        let mut sub_tokens = Vec::new();

        for reference in &multi.references {
            let target = reference.target()?;
            let limit = reference.max.unwrap_or(self.settings.max_repetitions);
            let mut count = 0;

            while count < limit {
                let found = match self.match_definition(target, input, pos, loc.following()) {
                    Ok(found) => found,
                    Err(error) if error.is_no_match() => break,
                    Err(error) => return Err(error),
                };
                let found_loc = found.loc;
                sub_tokens.push(self.sub_token(target, found, input, pos)?);
                loc.extend(&found_loc);
                pos += found_loc.bytes();
                count += 1;
                let empty = found_loc.is_empty();
                if empty && count >= reference.min {
                    break;
                }
            }

            if count < reference.min {
                return Err(LexError::no_match());
            }
        }

        Ok(Match { loc, sub_tokens })
    }

    fn sub_token(
        &self,
        target: DefinitionId,
        found: Match,
        input: Input<'_>,
        offset: usize,
    ) -> LexResult<Token> {
        let definition = self.registry.get(target)?;
        found.into_token(self.rule, definition, input.bytes, offset)
    }
}
