//! Ordered attribute lists.

use super::Value;
use crate::Name;

/// Attributes of a value, in the order they were set.
///
/// Order is observable: the dispatch metadata walk visits a method's
/// attributes front to back. Lists are short, so lookups are linear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(Vec<(Name, Value)>);

impl Attributes {
    pub const fn new() -> Self {
        Attributes(Vec::new())
    }

    /// Get the value stored under `tag`.
    pub fn get(&self, tag: Name) -> Option<&Value> {
        self.0.iter().find(|(t, _)| *t == tag).map(|(_, v)| v)
    }

    /// Set `tag` to `value`, replacing an existing entry in place.
    pub fn set(&mut self, tag: Name, value: Value) {
        match self.0.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = value,
            None => self.0.push((tag, value)),
        }
    }

    /// Builder-style `set`.
    #[must_use]
    pub fn with(mut self, tag: Name, value: Value) -> Self {
        self.set(tag, value);
        self
    }

    /// Iterate `(tag, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.0.iter().map(|(t, v)| (*t, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Name, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (tag, value) in iter {
            attributes.set(tag, value);
        }
        attributes
    }
}
