use super::*;
use crate::class_table::ClassTable;
use pretty_assertions::assert_eq;
use s4_ir::SharedInterner;

struct Fixture {
    interner: SharedInterner,
    table: ClassTable,
    cache: ClassHierarchyCache,
}

impl Fixture {
    fn new() -> Self {
        let interner = SharedInterner::default();
        let table = ClassTable::with_basic_classes(interner.clone());
        Fixture {
            interner,
            table,
            cache: ClassHierarchyCache::new(),
        }
    }

    fn calculator(&self) -> DistanceCalculator<'_> {
        DistanceCalculator::new(&self.cache, &self.table)
    }
}

#[test]
fn test_exact_match_is_zero() {
    let fixture = Fixture::new();
    let calc = fixture.calculator();
    assert_eq!(calc.distance(sym::NUMERIC, sym::NUMERIC), Distance::EXACT);
}

#[test]
fn test_inherited_match_counts_levels() {
    let mut fixture = Fixture::new();
    let base = fixture.interner.intern("Base");
    let derived = fixture.interner.intern("Derived");
    let leaf = fixture.interner.intern("Leaf");
    fixture.table.define_class(base, &[]).unwrap();
    fixture.table.define_class(derived, &[base]).unwrap();
    fixture.table.define_class(leaf, &[derived]).unwrap();

    let calc = fixture.calculator();
    assert_eq!(calc.distance(derived, base), Distance::Finite(1));
    assert_eq!(calc.distance(leaf, base), Distance::Finite(2));
    assert_eq!(calc.distance(base, derived), Distance::Infinite);
}

#[test]
fn test_wildcard_beats_nothing_but_loses_to_hierarchy() {
    let fixture = Fixture::new();
    let calc = fixture.calculator();
    let wildcard = calc.distance(sym::INTEGER, sym::ANY);

    assert_eq!(wildcard, Distance::WILDCARD);
    assert!(calc.distance(sym::INTEGER, sym::VECTOR) < wildcard);
    assert!(wildcard < Distance::Infinite);
    assert!(Distance::Finite(u32::from(u16::MAX)) < wildcard);
}

#[test]
fn test_atomic_classes_use_the_hierarchy() {
    let fixture = Fixture::new();
    let calc = fixture.calculator();
    assert_eq!(calc.distance(sym::INTEGER, sym::NUMERIC), Distance::Finite(1));
    assert_eq!(calc.distance(sym::NUMERIC, sym::INTEGER), Distance::Infinite);
    assert_eq!(calc.distance(sym::CHARACTER, sym::NUMERIC), Distance::Infinite);
}

#[test]
fn test_undefined_class_is_infinite_not_an_error() {
    let fixture = Fixture::new();
    let ghost = fixture.interner.intern("Ghost");
    let calc = fixture.calculator();

    assert_eq!(calc.distance(ghost, sym::NUMERIC), Distance::Infinite);
    assert_eq!(calc.distance(ghost, ghost), Distance::Infinite);
    assert_eq!(calc.distance(ghost, sym::ANY), Distance::WILDCARD);
}

#[test]
fn test_wildcard_skips_the_cache() {
    let fixture = Fixture::new();
    let calc = fixture.calculator();
    calc.distance(sym::NUMERIC, sym::ANY);
    assert!(fixture.cache.is_empty());
}

#[test]
fn test_distance_display() {
    assert_eq!(Distance::Finite(2).to_string(), "2");
    assert_eq!(Distance::Infinite.to_string(), "Inf");
    assert!(Distance::EXACT.is_exact());
    assert!(!Distance::Infinite.is_finite());
}
