//! Regex matching on a lazy DFA.
//!
//! The search is driven byte by byte instead of through `find`, so that
//! running off the end of a partial buffer while the automaton is still
//! alive can be reported as `MORE`. A match the next byte cannot extend is
//! final even at a partial buffer end.

use regex_automata::hybrid::dfa::{Cache, DFA};
use regex_automata::hybrid::LazyStateID;
use regex_automata::{Anchored, Input as Haystack};
use rustc_hash::FxHashMap;

use super::Input;
use crate::definition::{DefinitionId, RegexPattern};
use crate::error::{ErrorCode, LexError, LexResult};
use crate::grapheme::read_grapheme;
use crate::location::Locations;

/// Lazy DFA caches, one per regex definition.
#[derive(Clone, Debug, Default)]
pub(crate) struct RegexCaches {
    caches: FxHashMap<DefinitionId, Cache>,
}

impl RegexCaches {
    pub(crate) fn get(&mut self, id: DefinitionId, dfa: &DFA) -> &mut Cache {
        self.caches.entry(id).or_insert_with(|| dfa.create_cache())
    }

    pub(crate) fn clear(&mut self) {
        self.caches.clear();
    }
}

fn engine_error(error: impl std::fmt::Display) -> LexError {
    LexError::with_detail(ErrorCode::Regex, error.to_string())
}

/// Longest leftmost-first match anchored at `offset`. Empty matches count
/// as no match.
pub(super) fn match_regex(
    regex: &RegexPattern,
    cache: &mut Cache,
    input: Input<'_>,
    offset: usize,
    at: Locations,
) -> LexResult<Locations> {
    let dfa = regex.dfa();
    let bytes = input.bytes;
    let haystack = Haystack::new(bytes)
        .span(offset..bytes.len())
        .anchored(Anchored::Yes);

    let mut sid = dfa
        .start_state_forward(cache, &haystack)
        .map_err(engine_error)?;
    // Length of the latest match. Match states trail by one byte.
    let mut matched = None;
    let mut dead = false;

    for (i, &byte) in bytes[offset..].iter().enumerate() {
        sid = dfa.next_state(cache, sid, byte).map_err(engine_error)?;
        if sid.is_tagged() {
            if sid.is_match() {
                matched = Some(i);
            } else if sid.is_dead() {
                dead = true;
                break;
            } else if sid.is_quit() {
                return Err(LexError::at(ErrorCode::Regex, offset + i));
            }
        }
    }

    if !dead {
        if input.is_eof {
            sid = dfa.next_eoi_state(cache, sid).map_err(engine_error)?;
            if sid.is_match() {
                matched = Some(bytes.len() - offset);
            }
        } else if can_extend(dfa, cache, sid)? {
            return Err(LexError::more());
        }
    }

    match matched {
        Some(len) if len > 0 => measure(bytes, offset, len, at),
        _ => Err(LexError::no_match()),
    }
}

/// Whether anything after the buffer end could still change the answer:
/// a byte that keeps the automaton alive, or end of input completing a match.
fn can_extend(dfa: &DFA, cache: &mut Cache, sid: LazyStateID) -> LexResult<bool> {
    for byte in 0..=u8::MAX {
        let next = dfa.next_state(cache, sid, byte).map_err(engine_error)?;
        if !next.is_dead() {
            return Ok(true);
        }
    }
    let eoi = dfa.next_eoi_state(cache, sid).map_err(engine_error)?;
    Ok(eoi.is_match())
}

/// Account for `bytes[offset..offset + len]` grapheme by grapheme.
fn measure(bytes: &[u8], offset: usize, len: usize, at: Locations) -> LexResult<Locations> {
    let end = offset + len;
    let matched = &bytes[..end];
    let mut loc = at;
    let mut pos = offset;
    while pos < end {
        let grapheme = read_grapheme(matched, pos, true)?;
        loc.record(&grapheme);
        pos += grapheme.bytes;
    }
    Ok(loc)
}
