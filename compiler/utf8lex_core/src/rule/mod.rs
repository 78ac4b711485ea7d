//! Ordered lexing rules.
//!
//! A [`Rule`] names a top-level definition and carries an opaque action
//! payload for the caller. The lexer tries rules in [`RuleSet`] order and
//! the first one that matches wins.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::definition::{DefinitionId, Pattern, Registry};
use crate::error::{ErrorCode, LexError, LexResult};

/// Position of a rule in its [`RuleSet`], doubling as its id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        RuleId(index)
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

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub id: RuleId,
    pub name: Arc<str>,
    pub definition: DefinitionId,
    /// Uninterpreted bytes handed back with every token of this rule.
    pub action: Vec<u8>,
}

/// Rules in priority order.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Append a rule; it has the lowest priority so far.
    pub fn add(
        &mut self,
        name: &str,
        definition: DefinitionId,
        action: impl Into<Vec<u8>>,
    ) -> LexResult<RuleId> {
        let id = u32::try_from(self.rules.len())
            .map(RuleId::new)
            .map_err(|_| LexError::with_detail(ErrorCode::ChainInsert, "rule set is full"))?;
        let action = action.into();
        debug!(id = id.raw(), name, definition = definition.raw(), "add rule");
        self.rules.push(Rule {
            id,
            name: Arc::from(name),
            definition,
            action,
        });
        Ok(id)
    }

    /// Define `pattern` at the top level of `registry` and add a rule of the
    /// same name for it.
    pub fn define(
        &mut self,
        registry: &mut Registry,
        name: &str,
        pattern: Pattern,
        action: impl Into<Vec<u8>>,
    ) -> LexResult<RuleId> {
        let definition = registry.define(name, pattern)?;
        self.add(name, definition, action)
    }

    pub fn get(&self, id: RuleId) -> LexResult<&Rule> {
        self.rules
            .get(id.index())
            .ok_or_else(|| LexError::with_detail(ErrorCode::NotFound, format!("{id:?}")))
    }

    /// First rule called `name`.
    pub fn find_by_name(&self, name: &str) -> LexResult<&Rule> {
        self.rules
            .iter()
            .find(|rule| &*rule.name == name)
            .ok_or_else(|| {
                LexError::with_detail(ErrorCode::NotFound, format!("no rule named \"{name}\""))
            })
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
