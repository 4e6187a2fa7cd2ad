//! Runtime values of the host language, as far as dispatch observes them.
//!
//! Dispatch needs three things from a value: its attributes, its length
//! (for the legacy-class marker check) and its effective class name. The
//! evaluator owns everything else about a value.
//!
//! Heap payloads are built only through the factory methods below, so every
//! `Value` clone is a reference-count bump.

#![expect(
    clippy::disallowed_types,
    reason = "Arc::unwrap_or_clone reclaims a Heap payload for copy-on-write"
)]

mod attributes;
mod heap;

use std::sync::Arc;

use crate::{sym, ExprId, Name};

pub use attributes::Attributes;
pub use heap::Heap;

static NO_ATTRIBUTES: Attributes = Attributes::new();

/// Vector payload: elements plus attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T> {
    pub elements: Vec<T>,
    pub attributes: Attributes,
}

/// A closure as seen by dispatch.
///
/// The body is an opaque expression handle; only the evaluator runs it.
/// Method definitions carry their defining metadata in `attributes`.
#[derive(Clone, Debug, PartialEq)]
pub struct Closure {
    /// Name the closure was created under, for diagnostics.
    pub label: Name,
    pub body: ExprId,
    pub attributes: Attributes,
}

/// An object of a formal class: all of its state lives in attributes
/// (slots plus `class`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct S4Object {
    pub attributes: Attributes,
}

trait HasAttributes: Clone {
    fn attributes_mut(&mut self) -> &mut Attributes;
}

impl<T: Clone> HasAttributes for Vector<T> {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl HasAttributes for Closure {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl HasAttributes for S4Object {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

fn set_attribute<T: HasAttributes>(payload: Heap<T>, tag: Name, value: Value) -> Heap<T> {
    let mut inner = Arc::unwrap_or_clone(payload.0);
    inner.attributes_mut().set(tag, value);
    Heap::new(inner)
}

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Logical(Heap<Vector<Option<bool>>>),
    Integer(Heap<Vector<Option<i32>>>),
    Double(Heap<Vector<f64>>),
    /// Character vector; elements are interned like every other string.
    Character(Heap<Vector<Name>>),
    Symbol(Name),
    Closure(Heap<Closure>),
    S4(Heap<S4Object>),
}

// Factory methods

impl Value {
    pub fn logical(elements: Vec<Option<bool>>) -> Self {
        Value::Logical(Heap::new(Vector {
            elements,
            attributes: Attributes::new(),
        }))
    }

    pub fn integer(elements: Vec<Option<i32>>) -> Self {
        Value::Integer(Heap::new(Vector {
            elements,
            attributes: Attributes::new(),
        }))
    }

    pub fn double(elements: Vec<f64>) -> Self {
        Value::Double(Heap::new(Vector {
            elements,
            attributes: Attributes::new(),
        }))
    }

    /// Length-one double vector.
    pub fn scalar(value: f64) -> Self {
        Value::double(vec![value])
    }

    pub fn character(elements: Vec<Name>) -> Self {
        Value::Character(Heap::new(Vector {
            elements,
            attributes: Attributes::new(),
        }))
    }

    /// Length-one character vector.
    pub fn string(value: Name) -> Self {
        Value::character(vec![value])
    }

    pub fn symbol(name: Name) -> Self {
        Value::Symbol(name)
    }

    pub fn closure(label: Name, body: ExprId) -> Self {
        Value::Closure(Heap::new(Closure {
            label,
            body,
            attributes: Attributes::new(),
        }))
    }

    /// An instance of the formal class `class` with no slots.
    pub fn s4_object(class: Name) -> Self {
        Value::S4(Heap::new(S4Object {
            attributes: Attributes::new().with(sym::CLASS, Value::string(class)),
        }))
    }

    /// Return this value with `tag` set to `value`.
    ///
    /// `Null` and symbols cannot carry attributes and are returned unchanged.
    #[must_use]
    pub fn with_attribute(self, tag: Name, value: Value) -> Self {
        match self {
            Value::Logical(v) => Value::Logical(set_attribute(v, tag, value)),
            Value::Integer(v) => Value::Integer(set_attribute(v, tag, value)),
            Value::Double(v) => Value::Double(set_attribute(v, tag, value)),
            Value::Character(v) => Value::Character(set_attribute(v, tag, value)),
            Value::Closure(c) => Value::Closure(set_attribute(c, tag, value)),
            Value::S4(o) => Value::S4(set_attribute(o, tag, value)),
            Value::Null | Value::Symbol(_) => self,
        }
    }
}

// Accessors

impl Value {
    /// Attributes of this value (empty for `Null` and symbols).
    pub fn attributes(&self) -> &Attributes {
        match self {
            Value::Logical(v) => &v.attributes,
            Value::Integer(v) => &v.attributes,
            Value::Double(v) => &v.attributes,
            Value::Character(v) => &v.attributes,
            Value::Closure(c) => &c.attributes,
            Value::S4(o) => &o.attributes,
            Value::Null | Value::Symbol(_) => &NO_ATTRIBUTES,
        }
    }

    pub fn attribute(&self, tag: Name) -> Option<&Value> {
        self.attributes().get(tag)
    }

    pub fn length(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Logical(v) => v.elements.len(),
            Value::Integer(v) => v.elements.len(),
            Value::Double(v) => v.elements.len(),
            Value::Character(v) => v.elements.len(),
            Value::Symbol(_) | Value::Closure(_) | Value::S4(_) => 1,
        }
    }

    /// Elements of a character vector.
    pub fn as_character(&self) -> Option<&[Name]> {
        match self {
            Value::Character(v) => Some(&v.elements),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Heap<Closure>> {
        match self {
            Value::Closure(c) => Some(c),
            _ => None,
        }
    }

    /// Class a value has when no `class` attribute is set.
    pub fn implicit_class(&self) -> Name {
        match self {
            Value::Null => sym::NULL,
            Value::Logical(_) => sym::LOGICAL,
            Value::Integer(_) => sym::INTEGER,
            Value::Double(_) => sym::NUMERIC,
            Value::Character(_) => sym::CHARACTER,
            Value::Symbol(_) => sym::NAME,
            Value::Closure(_) => sym::FUNCTION,
            Value::S4(_) => sym::S4,
        }
    }

    /// Effective class used for dispatch: the first element of the `class`
    /// attribute, or the implicit class.
    pub fn class_name(&self) -> Name {
        self.attribute(sym::CLASS)
            .and_then(Value::as_character)
            .and_then(|classes| classes.first().copied())
            .unwrap_or_else(|| self.implicit_class())
    }
}
