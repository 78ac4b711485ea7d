//! Named match specifications.
//!
//! A [`Definition`] pairs a name with a [`Pattern`], the closed set of
//! things the lexer knows how to match:
//!
//! - [`ClassPattern`]: `min..=max` graphemes whose category is in a set.
//! - [`LiteralPattern`]: an exact byte string.
//! - [`RegexPattern`]: a regex anchored at the current position.
//! - [`MultiPattern`]: alternation or sequence over [`Reference`]s to other
//!   definitions, with an optional nested scope of its own.
//!
//! Definitions live in a [`Registry`] arena and are addressed by
//! [`DefinitionId`].

mod registry;

use std::fmt;
use std::sync::Arc;

use regex_automata::hybrid::dfa::DFA;

use crate::cat::Cat;
use crate::error::{ErrorCode, LexError, LexResult};
use crate::grapheme::read_grapheme;
use crate::location::Locations;

pub use registry::{Registry, Scope, MAX_DEFINITIONS};

/// Index into the definition arena. Ids are handed out in registration
/// order and double as the definition's unique id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DefinitionId(u32);

impl DefinitionId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        DefinitionId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefinitionId({})", self.0)
    }
}

/// Check a `(min, max)` repetition; `max = None` is unbounded.
fn check_repeat(min: usize, max: Option<usize>) -> LexResult<()> {
    match max {
        Some(0) => Err(LexError::with_detail(ErrorCode::BadMax, "max must be at least 1")),
        Some(max) if min > max => Err(LexError::with_detail(
            ErrorCode::BadMin,
            format!("min {min} exceeds max {max}"),
        )),
        _ => Ok(()),
    }
}

/// Graphemes drawn from a category set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassPattern {
    pub cat: Cat,
    pub min: usize,
    pub max: Option<usize>,
}

/// An exact byte string, with its extent measured once up front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiteralPattern {
    text: Box<str>,
    extent: Locations,
}

impl LiteralPattern {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Per-unit lengths of the literal, starting at the origin.
    #[inline]
    pub fn extent(&self) -> &Locations {
        &self.extent
    }
}

/// A compiled regular expression.
#[derive(Clone, Debug)]
pub struct RegexPattern {
    source: Box<str>,
    dfa: DFA,
}

impl RegexPattern {
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub(crate) fn dfa(&self) -> &DFA {
        &self.dfa
    }
}

/// Multi-definition composition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MultiKind {
    /// First reference that matches wins.
    Or,
    /// Every reference in order.
    Sequence,
}

impl fmt::Display for MultiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MultiKind::Or => "OR",
            MultiKind::Sequence => "SEQUENCE",
        })
    }
}

/// A named use of a definition inside a multi-definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reference {
    pub name: Arc<str>,
    pub min: usize,
    pub max: Option<usize>,
    /// Bound by [`Registry::resolve_multi`]; `None` until then.
    pub definition: Option<DefinitionId>,
}

impl Reference {
    /// The bound definition, or `NULL_POINTER` for an unresolved reference.
    pub fn target(&self) -> LexResult<DefinitionId> {
        self.definition.ok_or_else(|| {
            LexError::with_detail(
                ErrorCode::NullPointer,
                format!("reference to \"{}\" is not resolved", self.name),
            )
        })
    }
}

/// Alternation or sequence over references.
#[derive(Clone, Debug)]
pub struct MultiPattern {
    pub kind: MultiKind,
    /// Enclosing multi-definition, for scope chaining.
    pub parent: Option<DefinitionId>,
    pub references: Vec<Reference>,
    /// Definitions registered inside this multi-definition.
    pub scope: Scope,
}

/// What a definition matches.
#[derive(Clone, Debug)]
pub enum Pattern {
    Class(ClassPattern),
    Literal(LiteralPattern),
    Regex(RegexPattern),
    Multi(MultiPattern),
}

impl Pattern {
    /// `min..=max` graphemes whose category intersects `cat`.
    pub fn class(cat: Cat, min: usize, max: Option<usize>) -> LexResult<Pattern> {
        if cat.is_empty() {
            return Err(LexError::with_detail(ErrorCode::Cat, "empty category set"));
        }
        check_repeat(min, max)?;
        Ok(Pattern::Class(ClassPattern { cat, min, max }))
    }

    /// Exact text. The extent is measured by reading it grapheme by grapheme.
    pub fn literal(text: &str) -> LexResult<Pattern> {
        if text.is_empty() {
            return Err(LexError::new(ErrorCode::EmptyLiteral));
        }
        let bytes = text.as_bytes();
        let mut extent = Locations::ORIGIN;
        let mut offset = 0;
        while offset < bytes.len() {
            let grapheme = read_grapheme(bytes, offset, true)?;
            extent.record(&grapheme);
            offset += grapheme.bytes;
        }
        Ok(Pattern::Literal(LiteralPattern {
            text: text.into(),
            extent,
        }))
    }

    /// Compile `source` for anchored, leftmost-first matching.
    pub fn regex(source: &str) -> LexResult<Pattern> {
        let dfa = DFA::builder()
            .configure(DFA::config().unicode_word_boundary(true))
            .build(source)
            .map_err(|error| LexError::with_detail(ErrorCode::BadRegex, error.to_string()))?;
        Ok(Pattern::Regex(RegexPattern {
            source: source.into(),
            dfa,
        }))
    }

    /// An empty multi-definition; add references with
    /// [`Registry::add_reference`].
    pub fn multi(kind: MultiKind) -> Pattern {
        Pattern::Multi(MultiPattern {
            kind,
            parent: None,
            references: Vec::new(),
            scope: Scope::default(),
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Pattern::Class(_) => "class",
            Pattern::Literal(_) => "literal",
            Pattern::Regex(_) => "regex",
            Pattern::Multi(_) => "multi",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Class(class) => {
                write!(f, "[{}]{{{},", class.cat, class.min)?;
                match class.max {
                    Some(max) => write!(f, "{max}}}"),
                    None => f.write_str("}"),
                }
            }
            Pattern::Literal(literal) => write!(f, "{:?}", literal.text()),
            Pattern::Regex(regex) => write!(f, "/{}/", regex.source()),
            Pattern::Multi(multi) => {
                let separator = match multi.kind {
                    MultiKind::Or => " | ",
                    MultiKind::Sequence => " ",
                };
                for (i, reference) in multi.references.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    f.write_str(&reference.name)?;
                }
                Ok(())
            }
        }
    }
}

/// A named pattern registered in a [`Registry`].
#[derive(Clone, Debug)]
pub struct Definition {
    pub id: DefinitionId,
    pub name: Arc<str>,
    pub pattern: Pattern,
    /// Multi-definition whose scope holds this definition; `None` at top level.
    pub owner: Option<DefinitionId>,
}

impl Definition {
    pub fn as_multi(&self) -> LexResult<&MultiPattern> {
        match &self.pattern {
            Pattern::Multi(multi) => Ok(multi),
            other => Err(LexError::with_detail(
                ErrorCode::PatternType,
                format!("\"{}\" is a {} definition, not multi", self.name, other.type_name()),
            )),
        }
    }

    pub(crate) fn as_multi_mut(&mut self) -> LexResult<&mut MultiPattern> {
        let name = self.name.clone();
        match &mut self.pattern {
            Pattern::Multi(multi) => Ok(multi),
            other => Err(LexError::with_detail(
                ErrorCode::PatternType,
                format!("\"{name}\" is a {} definition, not multi", other.type_name()),
            )),
        }
    }
}

#[cfg(test)]
mod tests;
