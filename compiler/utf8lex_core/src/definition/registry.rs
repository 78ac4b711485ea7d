//! Definition arena with nested scopes.
//!
//! Top-level definitions live in the registry's root [`Scope`]. A definition
//! registered with [`Registry::define_in`] lives in the scope of its owning
//! multi-definition instead. Name lookup from inside a multi-definition walks
//! outward: the multi's own scope, then each enclosing multi's scope, then
//! the root.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::{check_repeat, Definition, DefinitionId, Pattern, Reference};
use crate::error::{ErrorCode, LexError, LexResult};

/// Largest number of definitions one registry holds.
pub const MAX_DEFINITIONS: usize = u32::MAX as usize;

/// Names visible at one nesting level, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    order: Vec<DefinitionId>,
    names: FxHashMap<Arc<str>, DefinitionId>,
}

impl Scope {
    #[inline]
    pub fn get(&self, name: &str) -> Option<DefinitionId> {
        self.names.get(name).copied()
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        self.order.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Register `name`. A duplicate name keeps resolving to the earliest
    /// registration.
    fn insert(&mut self, name: Arc<str>, id: DefinitionId) {
        self.order.push(id);
        self.names.entry(name).or_insert(id);
    }
}

/// Owns every definition of a grammar.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    definitions: Vec<Definition>,
    root: Scope,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every definition, nested ones included, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    /// The top-level scope.
    pub fn root(&self) -> &Scope {
        &self.root
    }

    /// Register a top-level definition.
    pub fn define(&mut self, name: &str, pattern: Pattern) -> LexResult<DefinitionId> {
        self.insert(None, name, pattern)
    }

    /// Register a definition in the scope of the multi-definition `parent`.
    pub fn define_in(
        &mut self,
        parent: DefinitionId,
        name: &str,
        pattern: Pattern,
    ) -> LexResult<DefinitionId> {
        self.get(parent)?.as_multi()?;
        self.insert(Some(parent), name, pattern)
    }

    fn insert(
        &mut self,
        owner: Option<DefinitionId>,
        name: &str,
        mut pattern: Pattern,
    ) -> LexResult<DefinitionId> {
        if self.definitions.len() >= MAX_DEFINITIONS {
            return Err(LexError::with_detail(
                ErrorCode::ChainInsert,
                "definition registry is full",
            ));
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "bounded by MAX_DEFINITIONS above"
        )]
        let id = DefinitionId::new(self.definitions.len() as u32);
        let name: Arc<str> = Arc::from(name);

        if let Pattern::Multi(multi) = &mut pattern {
            multi.parent = owner;
        }

        let scope = match owner {
            Some(parent) => &mut self.get_mut(parent)?.as_multi_mut()?.scope,
            None => &mut self.root,
        };
        scope.insert(name.clone(), id);

        debug!(
            id = id.raw(),
            name = %name,
            kind = pattern.type_name(),
            owner = ?owner.map(DefinitionId::raw),
            "define"
        );
        self.definitions.push(Definition {
            id,
            name,
            pattern,
            owner,
        });
        Ok(id)
    }

    /// Add a reference to `name` at the end of the multi-definition `multi`.
    ///
    /// The name is bound later by [`Registry::resolve_multi`], so it may
    /// refer to a definition that does not exist yet.
    pub fn add_reference(
        &mut self,
        multi: DefinitionId,
        name: &str,
        min: usize,
        max: Option<usize>,
    ) -> LexResult<()> {
        check_repeat(min, max)?;
        let multi = self.get_mut(multi)?.as_multi_mut()?;
        multi.references.push(Reference {
            name: Arc::from(name),
            min,
            max,
            definition: None,
        });
        Ok(())
    }

    /// Definition with id `id`.
    pub fn get(&self, id: DefinitionId) -> LexResult<&Definition> {
        self.definitions
            .get(id.index())
            .ok_or_else(|| LexError::with_detail(ErrorCode::NullPointer, format!("{id:?}")))
    }

    fn get_mut(&mut self, id: DefinitionId) -> LexResult<&mut Definition> {
        self.definitions
            .get_mut(id.index())
            .ok_or_else(|| LexError::with_detail(ErrorCode::NullPointer, format!("{id:?}")))
    }

    /// Look up a top-level definition by name.
    pub fn find_by_name(&self, name: &str) -> LexResult<&Definition> {
        let id = self.root.get(name).ok_or_else(|| not_found(name))?;
        self.get(id)
    }

    /// Look up any definition by id, failing with `NOT_FOUND`.
    pub fn find_by_id(&self, id: DefinitionId) -> LexResult<&Definition> {
        self.definitions
            .get(id.index())
            .ok_or_else(|| LexError::with_detail(ErrorCode::NotFound, format!("{id:?}")))
    }

    /// Look up `name` as seen from inside `scope`: that multi-definition's
    /// nested definitions first, then each enclosing one, then the top level.
    pub fn find_in_scope(&self, scope: Option<DefinitionId>, name: &str) -> LexResult<&Definition> {
        let mut chain: SmallVec<[DefinitionId; 8]> = SmallVec::new();
        let mut cursor = scope;
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.get(id)?.as_multi()?.parent;
        }

        for id in chain {
            if let Some(found) = self.get(id)?.as_multi()?.scope.get(name) {
                return self.get(found);
            }
        }
        self.find_by_name(name)
    }

    /// Bind reference `index` of `multi`. Already-bound references are left
    /// alone.
    pub fn resolve_reference(&mut self, multi: DefinitionId, index: usize) -> LexResult<()> {
        let reference = self
            .get(multi)?
            .as_multi()?
            .references
            .get(index)
            .ok_or_else(|| LexError::with_detail(ErrorCode::NotFound, format!("reference #{index}")))?;
        if reference.definition.is_some() {
            return Ok(());
        }

        let name = reference.name.clone();
        let target = self.find_in_scope(Some(multi), &name)?.id;
        debug!(multi = multi.raw(), name = %name, target = target.raw(), "resolve reference");
        self.get_mut(multi)?.as_multi_mut()?.references[index].definition = Some(target);
        Ok(())
    }

    /// Bind every reference of `multi` by name. Idempotent.
    pub fn resolve_multi(&mut self, multi: DefinitionId) -> LexResult<()> {
        let count = self.get(multi)?.as_multi()?.references.len();
        for index in 0..count {
            self.resolve_reference(multi, index)?;
        }
        Ok(())
    }

    /// Resolve every multi-definition in the registry.
    pub fn resolve(&mut self) -> LexResult<()> {
        let multis: Vec<DefinitionId> = self
            .definitions
            .iter()
            .filter(|definition| matches!(definition.pattern, Pattern::Multi(_)))
            .map(|definition| definition.id)
            .collect();
        for multi in multis {
            self.resolve_multi(multi)?;
        }
        Ok(())
    }
}

fn not_found(name: &str) -> LexError {
    LexError::with_detail(ErrorCode::NotFound, format!("no definition named \"{name}\""))
}
