//! Class definitions, as dispatch queries them.
//!
//! The class-definition subsystem parses `setClass` declarations; this module
//! only stores the result it needs: for every class, the `contains` list of
//! all ancestors with their inheritance distance. `ClassDefinitions` is the
//! query seam the engine depends on, `ClassTable` the in-memory store.

use rustc_hash::FxHashMap;
use s4_ir::{sym, Name, SharedInterner};

use crate::class_cache::ClassHierarchyEntry;
use crate::errors::ClassNotFound;

/// Prefix of the symbol a class definition is published under.
pub const CLASS_METADATA_PREFIX: &str = ".__C__";

/// Classes every table knows about: the wildcard, `missing` and the
/// implicit classes of basic values.
pub const BASIC_CLASSES: [Name; 11] = [
    sym::ANY,
    sym::MISSING,
    sym::NULL,
    sym::LOGICAL,
    sym::INTEGER,
    sym::NUMERIC,
    sym::CHARACTER,
    sym::NAME,
    sym::FUNCTION,
    sym::S4,
    sym::VECTOR,
];

/// True for classes provided by the runtime rather than user code.
pub fn is_basic_class(class: Name) -> bool {
    BASIC_CLASSES.contains(&class)
}

/// Query service over the current class definitions.
pub trait ClassDefinitions {
    /// Ancestor chain of `class`, the class itself first at distance 0.
    fn ancestors_of(&self, class: Name) -> Result<ClassHierarchyEntry, ClassNotFound>;

    /// Counter that changes whenever any definition changes.
    ///
    /// Caches compare it to decide whether their entries are still current.
    fn generation(&self) -> u64;
}

/// Stored definition of one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: Name,
    /// Symbol the definition is published under (`.__C__<name>`).
    pub metadata_name: Name,
    /// Every ancestor with its distance, nearest first.
    pub contains: Vec<(Name, u16)>,
}

/// In-memory class table.
#[derive(Debug)]
pub struct ClassTable {
    interner: SharedInterner,
    classes: FxHashMap<Name, ClassDefinition>,
    by_metadata: FxHashMap<Name, Name>,
    generation: u64,
}

impl ClassTable {
    /// An empty table.
    pub fn new(interner: SharedInterner) -> Self {
        ClassTable {
            interner,
            classes: FxHashMap::default(),
            by_metadata: FxHashMap::default(),
            generation: 0,
        }
    }

    /// A table seeded with `BASIC_CLASSES`.
    ///
    /// `integer` extends `numeric`, and the atomic vector classes extend
    /// `vector`, so basic values dispatch through the same ancestor chains
    /// as user classes.
    pub fn with_basic_classes(interner: SharedInterner) -> Self {
        let mut table = ClassTable::new(interner);
        for class in [
            sym::ANY,
            sym::MISSING,
            sym::NULL,
            sym::NAME,
            sym::FUNCTION,
            sym::S4,
            sym::VECTOR,
        ] {
            table.set_contains(class, Vec::new());
        }
        for class in [sym::LOGICAL, sym::NUMERIC, sym::CHARACTER] {
            table.set_contains(class, vec![(sym::VECTOR, 1)]);
        }
        table.set_contains(sym::INTEGER, vec![(sym::NUMERIC, 1), (sym::VECTOR, 2)]);
        table
    }

    /// Symbol a class definition is published under.
    pub fn class_name_metadata(&self, class: Name) -> Name {
        let text = self.interner.lookup(class);
        self.interner
            .intern(&format!("{CLASS_METADATA_PREFIX}{text}"))
    }

    /// Define `class` with the given direct superclasses.
    ///
    /// The stored `contains` list is the transitive closure: direct
    /// superclasses at distance 1 in declaration order, then their
    /// ancestors one step further away, keeping the smallest distance when
    /// a class is reachable along several paths.
    pub fn define_class(&mut self, class: Name, superclasses: &[Name]) -> Result<(), ClassNotFound> {
        let mut contains: Vec<(Name, u16)> = Vec::new();
        for &superclass in superclasses {
            let definition = self
                .classes
                .get(&superclass)
                .ok_or(ClassNotFound::new(superclass))?;
            let inherited = std::iter::once((superclass, 0u16))
                .chain(definition.contains.iter().copied())
                .map(|(ancestor, distance)| (ancestor, distance.saturating_add(1)));
            for (ancestor, distance) in inherited {
                if ancestor == class {
                    continue;
                }
                match contains.iter_mut().find(|(existing, _)| *existing == ancestor) {
                    Some(entry) => entry.1 = entry.1.min(distance),
                    None => contains.push((ancestor, distance)),
                }
            }
        }
        // Stable: ties keep declaration order.
        contains.sort_by_key(|&(_, distance)| distance);
        self.set_contains(class, contains);
        Ok(())
    }

    /// Store `class` with an explicit `contains` list.
    pub fn set_contains(&mut self, class: Name, contains: Vec<(Name, u16)>) {
        let metadata_name = self.class_name_metadata(class);
        self.by_metadata.insert(metadata_name, class);
        self.classes.insert(
            class,
            ClassDefinition {
                name: class,
                metadata_name,
                contains,
            },
        );
        self.bump_generation();
    }

    /// Remove a class definition. Returns whether it existed.
    pub fn remove_class(&mut self, class: Name) -> bool {
        let Some(definition) = self.classes.remove(&class) else {
            return false;
        };
        self.by_metadata.remove(&definition.metadata_name);
        self.bump_generation();
        true
    }

    pub fn is_defined(&self, class: Name) -> bool {
        self.classes.contains_key(&class)
    }

    pub fn definition(&self, class: Name) -> Option<&ClassDefinition> {
        self.classes.get(&class)
    }

    /// Find a definition by the symbol it is published under.
    pub fn lookup_metadata(&self, metadata_name: Name) -> Option<&ClassDefinition> {
        self.by_metadata
            .get(&metadata_name)
            .and_then(|class| self.classes.get(class))
    }

    /// Names of every class `class` contains, nearest first.
    pub fn superclass_names(&self, class: Name) -> Result<Vec<Name>, ClassNotFound> {
        self.classes
            .get(&class)
            .map(|definition| definition.contains.iter().map(|&(name, _)| name).collect())
            .ok_or(ClassNotFound::new(class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl ClassDefinitions for ClassTable {
    fn ancestors_of(&self, class: Name) -> Result<ClassHierarchyEntry, ClassNotFound> {
        let definition = self.classes.get(&class).ok_or(ClassNotFound::new(class))?;
        Ok(ClassHierarchyEntry::new(class, &definition.contains))
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
