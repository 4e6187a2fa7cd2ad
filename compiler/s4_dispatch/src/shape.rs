//! Formal-argument shape of a generic.

use s4_ir::{sym, Name, StringInterner};

/// How a formal argument may be supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormalKind {
    /// Must receive an argument.
    Required,
    /// Has a default; dispatches as class `missing` when not supplied.
    Optional,
    /// `...`: captures every argument no other formal took.
    Variadic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formal {
    pub name: Name,
    pub kind: FormalKind,
}

impl Formal {
    pub fn required(name: Name) -> Self {
        Formal {
            name,
            kind: FormalKind::Required,
        }
    }

    pub fn optional(name: Name) -> Self {
        Formal {
            name,
            kind: FormalKind::Optional,
        }
    }

    pub fn variadic() -> Self {
        Formal {
            name: sym::DOTS,
            kind: FormalKind::Variadic,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == FormalKind::Variadic
    }
}

/// Ordered formals of a generic.
///
/// Every non-variadic formal is a dispatch slot; method signatures name one
/// class per slot, in formal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericShape {
    formals: Vec<Formal>,
}

impl GenericShape {
    pub fn new(formals: Vec<Formal>) -> Self {
        GenericShape { formals }
    }

    /// Parse a compact formal list: `"x"` is required, `"i?"` optional,
    /// `"..."` variadic.
    pub fn parse(interner: &StringInterner, formals: &[&str]) -> Self {
        let formals = formals
            .iter()
            .map(|&text| {
                if text == "..." {
                    Formal::variadic()
                } else if let Some(name) = text.strip_suffix('?') {
                    Formal::optional(interner.intern(name))
                } else {
                    Formal::required(interner.intern(text))
                }
            })
            .collect();
        GenericShape { formals }
    }

    pub fn formals(&self) -> &[Formal] {
        &self.formals
    }

    /// Number of dispatch slots (non-variadic formals).
    pub fn dispatch_arity(&self) -> usize {
        self.formals.iter().filter(|f| !f.is_variadic()).count()
    }

    /// Names of the dispatch slots, in order.
    pub fn dispatch_formals(&self) -> impl Iterator<Item = Name> + '_ {
        self.formals
            .iter()
            .filter(|f| !f.is_variadic())
            .map(|f| f.name)
    }

    /// Position of `...` among the formals.
    pub fn dots_position(&self) -> Option<usize> {
        self.formals.iter().position(Formal::is_variadic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_compact_formals() {
        let interner = StringInterner::new();
        let shape = GenericShape::parse(&interner, &["x", "i?", "...", "value"]);
        let x = interner.intern("x");
        let i = interner.intern("i");
        let value = interner.intern("value");

        assert_eq!(
            shape.formals(),
            &[
                Formal::required(x),
                Formal::optional(i),
                Formal::variadic(),
                Formal::required(value),
            ]
        );
        assert_eq!(shape.dispatch_arity(), 3);
        assert_eq!(shape.dispatch_formals().collect::<Vec<_>>(), vec![x, i, value]);
        assert_eq!(shape.dots_position(), Some(2));
    }

    #[test]
    fn test_shape_without_dots() {
        let interner = StringInterner::new();
        let shape = GenericShape::parse(&interner, &["e1", "e2?"]);
        assert_eq!(shape.dispatch_arity(), 2);
        assert_eq!(shape.dots_position(), None);
    }
}
