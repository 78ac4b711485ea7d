//! Lexing session state.
//!
//! A [`State`] owns the buffer chain, the absolute position of the next
//! token, the [`Settings`] it was created with, and per-session matcher
//! scratch (regex caches and the multi-definition nesting counter). A
//! grammar ([`Registry`](crate::Registry) plus [`RuleSet`](crate::RuleSet))
//! can be shared by any number of states.

use crate::buffer::{Buffer, BufferChain};
use crate::error::{LexError, LexResult};
use crate::location::{Locations, Unit};
use crate::matcher::RegexCaches;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct State {
    pub(crate) settings: Settings,
    pub(crate) chain: BufferChain,
    /// Zero-length records at the start of the next token.
    pub(crate) loc: Locations,
    pub(crate) stack_depth: usize,
    pub(crate) caches: RegexCaches,
}

impl State {
    /// Start a session on `first`.
    pub fn new(settings: Settings, first: Buffer) -> Self {
        let chain = BufferChain::new(first, settings.max_buffers);
        State {
            settings,
            chain,
            loc: Locations::ORIGIN,
            stack_depth: 0,
            caches: RegexCaches::default(),
        }
    }

    /// Queue `buffer` after the last one (see [`BufferChain::append`]).
    pub fn append(&mut self, buffer: Buffer) -> LexResult<()> {
        self.chain.append(buffer)
    }

    /// Drop all buffers and rewind to the origin. Lexing fails with `STATE`
    /// until a buffer is appended.
    pub fn clear(&mut self) {
        self.chain.clear();
        self.loc = Locations::ORIGIN;
        self.stack_depth = 0;
        self.caches.clear();
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn chain(&self) -> &BufferChain {
        &self.chain
    }

    /// Absolute position of the next token.
    #[inline]
    pub fn loc(&self) -> &Locations {
        &self.loc
    }

    /// Multi-definition nesting of the match in progress; 0 between tokens.
    #[inline]
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    /// Advance past a token that covers `consumed`.
    pub(crate) fn commit(&mut self, consumed: &Locations) -> LexResult<()> {
        self.chain.current_mut()?.consume(consumed)?;
        self.loc = consumed.following();
        Ok(())
    }

    /// Rebase an offset relative to the current buffer onto the whole input.
    pub(crate) fn absolute(&self, error: LexError) -> LexError {
        let Some(offset) = error.offset else {
            return error;
        };
        let base = self.chain.current().map_or(0, Buffer::offset);
        let absolute = self.loc[Unit::Byte].start + offset.saturating_sub(base);
        error.with_offset(absolute)
    }
}
