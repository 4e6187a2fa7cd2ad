//! Per-context memoization of class ancestor chains.

#![expect(
    clippy::disallowed_types,
    reason = "cached ancestor chains are handed out while the cache stays shared"
)]

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use s4_ir::Name;

use crate::class_table::ClassDefinitions;
use crate::errors::ClassNotFound;

/// Ordered ancestor chain of one class, itself first at distance 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassHierarchyEntry {
    class: Name,
    ancestors: Vec<(Name, u16)>,
}

impl ClassHierarchyEntry {
    /// Build the chain from a class and its `contains` list.
    pub fn new(class: Name, contains: &[(Name, u16)]) -> Self {
        let mut ancestors = Vec::with_capacity(contains.len().saturating_add(1));
        ancestors.push((class, 0));
        ancestors.extend(contains.iter().copied().filter(|&(name, _)| name != class));
        ClassHierarchyEntry { class, ancestors }
    }

    pub fn class(&self) -> Name {
        self.class
    }

    pub fn ancestors(&self) -> &[(Name, u16)] {
        &self.ancestors
    }

    /// Distance from this class to `ancestor`, if it is one.
    pub fn distance_to(&self, ancestor: Name) -> Option<u16> {
        self.ancestors
            .iter()
            .find(|&&(name, _)| name == ancestor)
            .map(|&(_, distance)| distance)
    }
}

struct CacheState {
    /// Generation of the class definitions the entries were read from.
    generation: u64,
    entries: FxHashMap<Name, Arc<ClassHierarchyEntry>>,
}

/// Memoizes `ancestors_of` for one evaluation context.
///
/// Entries are tagged with the definitions' generation; a lookup against a
/// newer generation drops every entry first, so a cached answer is always
/// the answer the definitions would give now. Failed lookups are not cached.
/// Readers share the cache through a `RwLock`.
pub struct ClassHierarchyCache {
    state: RwLock<CacheState>,
}

impl ClassHierarchyCache {
    pub fn new() -> Self {
        ClassHierarchyCache {
            state: RwLock::new(CacheState {
                generation: 0,
                entries: FxHashMap::default(),
            }),
        }
    }

    /// Ancestor chain of `class`, from the cache or from `definitions`.
    pub fn ancestors_of(
        &self,
        definitions: &dyn ClassDefinitions,
        class: Name,
    ) -> Result<Arc<ClassHierarchyEntry>, ClassNotFound> {
        let generation = definitions.generation();
        {
            let state = self.state.read();
            if state.generation == generation {
                if let Some(entry) = state.entries.get(&class) {
                    return Ok(Arc::clone(entry));
                }
            }
        }

        let entry = Arc::new(definitions.ancestors_of(class)?);
        let mut state = self.state.write();
        if state.generation != generation {
            tracing::trace!(
                stale = state.generation,
                current = generation,
                "class definitions changed, clearing hierarchy cache"
            );
            state.entries.clear();
            state.generation = generation;
        }
        state.entries.insert(class, Arc::clone(&entry));
        Ok(entry)
    }

    /// Drop every cached entry.
    pub fn invalidate(&self) {
        self.state.write().entries.clear();
    }

    /// Number of cached chains.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

impl Default for ClassHierarchyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassHierarchyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ClassHierarchyCache")
            .field("generation", &state.generation)
            .field("entries", &state.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
