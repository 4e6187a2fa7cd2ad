use std::cell::Cell;

use super::*;
use crate::class_table::ClassTable;
use pretty_assertions::assert_eq;
use s4_ir::{sym, SharedInterner};

/// Counts how often the underlying definitions are queried.
struct CountingDefinitions {
    table: ClassTable,
    queries: Cell<usize>,
}

impl ClassDefinitions for CountingDefinitions {
    fn ancestors_of(&self, class: Name) -> Result<ClassHierarchyEntry, ClassNotFound> {
        self.queries.set(self.queries.get().saturating_add(1));
        self.table.ancestors_of(class)
    }

    fn generation(&self) -> u64 {
        self.table.generation()
    }
}

fn counting() -> (SharedInterner, CountingDefinitions) {
    let interner = SharedInterner::default();
    let table = ClassTable::with_basic_classes(interner.clone());
    (
        interner,
        CountingDefinitions {
            table,
            queries: Cell::new(0),
        },
    )
}

#[test]
fn test_entry_starts_with_itself() {
    let entry = ClassHierarchyEntry::new(sym::INTEGER, &[(sym::NUMERIC, 1)]);
    assert_eq!(entry.class(), sym::INTEGER);
    assert_eq!(entry.distance_to(sym::INTEGER), Some(0));
    assert_eq!(entry.distance_to(sym::NUMERIC), Some(1));
    assert_eq!(entry.distance_to(sym::CHARACTER), None);
}

#[test]
fn test_entry_ignores_self_in_contains() {
    let entry = ClassHierarchyEntry::new(sym::NUMERIC, &[(sym::NUMERIC, 3)]);
    assert_eq!(entry.ancestors(), &[(sym::NUMERIC, 0)]);
}

#[test]
fn test_repeated_lookups_hit_cache() {
    let (_, definitions) = counting();
    let cache = ClassHierarchyCache::new();

    let first = cache.ancestors_of(&definitions, sym::INTEGER).unwrap();
    let second = cache.ancestors_of(&definitions, sym::INTEGER).unwrap();

    assert_eq!(first, second);
    assert_eq!(definitions.queries.get(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_unknown_class_is_not_cached() {
    let (interner, definitions) = counting();
    let cache = ClassHierarchyCache::new();
    let ghost = interner.intern("Ghost");

    assert!(cache.ancestors_of(&definitions, ghost).is_err());
    assert!(cache.ancestors_of(&definitions, ghost).is_err());
    assert_eq!(definitions.queries.get(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_definition_change_refreshes_entries() {
    let (interner, mut definitions) = counting();
    let cache = ClassHierarchyCache::new();
    let base = interner.intern("Base");
    let derived = interner.intern("Derived");
    definitions.table.define_class(base, &[]).unwrap();
    definitions.table.define_class(derived, &[]).unwrap();

    let before = cache.ancestors_of(&definitions, derived).unwrap();
    assert_eq!(before.distance_to(base), None);

    definitions.table.define_class(derived, &[base]).unwrap();
    let after = cache.ancestors_of(&definitions, derived).unwrap();
    assert_eq!(after.distance_to(base), Some(1));
    assert_eq!(definitions.queries.get(), 2);
}

#[test]
fn test_invalidate_clears_entries() {
    let (_, definitions) = counting();
    let cache = ClassHierarchyCache::new();
    cache.ancestors_of(&definitions, sym::NUMERIC).unwrap();
    assert!(!cache.is_empty());

    cache.invalidate();
    assert!(cache.is_empty());
    cache.ancestors_of(&definitions, sym::NUMERIC).unwrap();
    assert_eq!(definitions.queries.get(), 2);
}
