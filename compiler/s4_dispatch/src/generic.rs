//! Generic descriptors and the primitive generic catalogue.

use std::hash::{Hash, Hasher};

use s4_ir::{Name, StringInterner};

/// Substring that marks a replacement (assignment) form such as `[<-`.
pub const ASSIGNMENT_MARKER: &str = "<-";

/// Identifies the target of one dispatch attempt.
///
/// Identity is `(name, group)`; `is_primitive` records where the call came
/// from and does not take part in equality.
#[derive(Clone, Copy, Debug)]
pub struct GenericDescriptor {
    name: Name,
    group: Option<Name>,
    is_primitive: bool,
}

impl GenericDescriptor {
    /// Dispatch triggered from a built-in operation.
    pub fn primitive(name: Name, group: Option<Name>) -> Self {
        GenericDescriptor {
            name,
            group,
            is_primitive: true,
        }
    }

    /// Dispatch of a generic defined as a closure.
    pub fn standard(name: Name) -> Self {
        GenericDescriptor {
            name,
            group: None,
            is_primitive: false,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn group(&self) -> Option<Name> {
        self.group
    }

    pub fn is_primitive(&self) -> bool {
        self.is_primitive
    }

    /// True for replacement forms (`[<-`, `$<-`, `length<-`, ...).
    pub fn is_assignment_form(&self, interner: &StringInterner) -> bool {
        interner.lookup(self.name).contains(ASSIGNMENT_MARKER)
    }
}

impl PartialEq for GenericDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.group == other.group
    }
}

impl Eq for GenericDescriptor {}

impl Hash for GenericDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.group.hash(state);
    }
}

/// A built-in operation that S4 methods can be set on.
pub struct PrimitiveGeneric {
    pub name: &'static str,
    pub group: Option<&'static str>,
    /// Compact formal list, see `GenericShape::parse`.
    pub formals: &'static [&'static str],
}

const BINARY: &[&str] = &["e1", "e2"];
const ARITH: &[&str] = &["e1", "e2?"];
const UNARY: &[&str] = &["x"];
const SUMMARY: &[&str] = &["x", "...", "na.rm?"];

macro_rules! primitives {
    ($($name:literal in $group:expr => $formals:expr),* $(,)?) => {
        &[$(PrimitiveGeneric { name: $name, group: $group, formals: $formals }),*]
    };
}

/// Every primitive generic, with its group and formals.
pub const PRIMITIVE_GENERICS: &[PrimitiveGeneric] = primitives![
    "+" in Some("Arith") => ARITH,
    "-" in Some("Arith") => ARITH,
    "*" in Some("Arith") => BINARY,
    "/" in Some("Arith") => BINARY,
    "^" in Some("Arith") => BINARY,
    "%%" in Some("Arith") => BINARY,
    "%/%" in Some("Arith") => BINARY,
    "==" in Some("Compare") => BINARY,
    "!=" in Some("Compare") => BINARY,
    "<" in Some("Compare") => BINARY,
    ">" in Some("Compare") => BINARY,
    "<=" in Some("Compare") => BINARY,
    ">=" in Some("Compare") => BINARY,
    "&" in Some("Logic") => BINARY,
    "|" in Some("Logic") => BINARY,
    "abs" in Some("Math") => UNARY,
    "sqrt" in Some("Math") => UNARY,
    "exp" in Some("Math") => UNARY,
    "floor" in Some("Math") => UNARY,
    "ceiling" in Some("Math") => UNARY,
    "trunc" in Some("Math") => UNARY,
    "sign" in Some("Math") => UNARY,
    "cumsum" in Some("Math") => UNARY,
    "max" in Some("Summary") => SUMMARY,
    "min" in Some("Summary") => SUMMARY,
    "range" in Some("Summary") => SUMMARY,
    "prod" in Some("Summary") => SUMMARY,
    "sum" in Some("Summary") => SUMMARY,
    "any" in Some("Summary") => SUMMARY,
    "all" in Some("Summary") => SUMMARY,
    "[" in None => &["x", "i?", "j?", "...", "drop?"],
    "[[" in None => &["x", "i?", "j?", "..."],
    "$" in None => &["x", "name"],
    "[<-" in None => &["x", "i?", "j?", "...", "value"],
    "[[<-" in None => &["x", "i?", "j?", "...", "value"],
    "$<-" in None => &["x", "name", "value"],
    "length" in None => UNARY,
    "length<-" in None => &["x", "value"],
];

/// Group generics themselves, with their enclosing group.
pub const GROUP_GENERICS: &[PrimitiveGeneric] = primitives![
    "Arith" in Some("Ops") => BINARY,
    "Compare" in Some("Ops") => BINARY,
    "Logic" in Some("Ops") => BINARY,
    "Ops" in None => BINARY,
    "Math" in None => UNARY,
    "Summary" in None => SUMMARY,
];

/// Group a primitive operation belongs to.
pub fn group_of(op: &str) -> Option<&'static str> {
    PRIMITIVE_GENERICS
        .iter()
        .find(|p| p.name == op)
        .and_then(|p| p.group)
}

/// Group enclosing a group generic (`Arith` is part of `Ops`).
pub fn super_group_of(group: &str) -> Option<&'static str> {
    GROUP_GENERICS
        .iter()
        .find(|g| g.name == group)
        .and_then(|g| g.group)
}
