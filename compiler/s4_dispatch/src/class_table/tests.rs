use super::*;
use pretty_assertions::assert_eq;

fn table() -> (SharedInterner, ClassTable) {
    let interner = SharedInterner::default();
    let table = ClassTable::with_basic_classes(interner.clone());
    (interner, table)
}

#[test]
fn test_basic_classes_are_defined() {
    let (_, table) = table();
    for class in BASIC_CLASSES {
        assert!(table.is_defined(class));
    }
    assert!(is_basic_class(sym::NUMERIC));
}

#[test]
fn test_integer_extends_numeric() {
    let (_, table) = table();
    let entry = table.ancestors_of(sym::INTEGER).unwrap();
    assert_eq!(
        entry.ancestors(),
        &[(sym::INTEGER, 0), (sym::NUMERIC, 1), (sym::VECTOR, 2)]
    );
}

#[test]
fn test_define_class_computes_transitive_contains() {
    let (interner, mut table) = table();
    let base = interner.intern("Base");
    let middle = interner.intern("Middle");
    let leaf = interner.intern("Leaf");

    table.define_class(base, &[]).unwrap();
    table.define_class(middle, &[base]).unwrap();
    table.define_class(leaf, &[middle]).unwrap();

    assert_eq!(
        table.definition(leaf).unwrap().contains,
        vec![(middle, 1), (base, 2)]
    );
    assert_eq!(table.superclass_names(leaf).unwrap(), vec![middle, base]);
}

#[test]
fn test_diamond_keeps_shortest_distance() {
    let (interner, mut table) = table();
    let root = interner.intern("Root");
    let left = interner.intern("Left");
    let right = interner.intern("Right");
    let bottom = interner.intern("Bottom");

    table.define_class(root, &[]).unwrap();
    table.define_class(left, &[root]).unwrap();
    table.define_class(right, &[left]).unwrap();
    // Root reachable at distance 2 through Left and 3 through Right.
    table.define_class(bottom, &[left, right]).unwrap();

    assert_eq!(
        table.definition(bottom).unwrap().contains,
        vec![(left, 1), (right, 1), (root, 2)]
    );
}

#[test]
fn test_define_class_with_unknown_superclass_fails() {
    let (interner, mut table) = table();
    let child = interner.intern("Child");
    let ghost = interner.intern("Ghost");

    assert_eq!(
        table.define_class(child, &[ghost]),
        Err(ClassNotFound::new(ghost))
    );
    assert!(!table.is_defined(child));
}

#[test]
fn test_extending_basic_class() {
    let (interner, mut table) = table();
    let money = interner.intern("Money");
    table.define_class(money, &[sym::NUMERIC]).unwrap();

    assert_eq!(
        table.superclass_names(money).unwrap(),
        vec![sym::NUMERIC, sym::VECTOR]
    );
}

#[test]
fn test_unknown_class_query_fails() {
    let (interner, table) = table();
    let unknown = interner.intern("Unknown");
    assert_eq!(
        table.ancestors_of(unknown).unwrap_err(),
        ClassNotFound::new(unknown)
    );
    assert!(table.superclass_names(unknown).is_err());
}

#[test]
fn test_metadata_symbol_lookup() {
    let (interner, mut table) = table();
    let track = interner.intern("Track");
    table.define_class(track, &[]).unwrap();

    let metadata = table.class_name_metadata(track);
    assert_eq!(interner.lookup(metadata), ".__C__Track");
    assert_eq!(table.lookup_metadata(metadata).map(|d| d.name), Some(track));
    assert_eq!(table.definition(track).unwrap().metadata_name, metadata);
}

#[test]
fn test_mutations_bump_generation() {
    let (interner, mut table) = table();
    let track = interner.intern("Track");
    let start = table.generation();

    table.define_class(track, &[]).unwrap();
    let after_define = table.generation();
    assert_ne!(start, after_define);

    assert!(table.remove_class(track));
    assert_ne!(after_define, table.generation());
    assert!(!table.remove_class(track));
    assert!(table.lookup_metadata(table.class_name_metadata(track)).is_none());
}
