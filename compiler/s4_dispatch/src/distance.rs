//! Compatibility distance between an actual and a declared class.

use std::fmt;

use s4_ir::{sym, Name};

use crate::class_cache::ClassHierarchyCache;
use crate::class_table::ClassDefinitions;

/// Distance of a wildcard (`ANY`) match.
///
/// Hierarchy distances are stored as `u16`, so every real inheritance
/// distance is strictly below this value.
pub const WILDCARD_DISTANCE: u32 = 65_536;

/// How far an actual class is from a declared class.
///
/// Ordering is the ranking order: smaller is a better match, and every
/// finite distance beats `Infinite`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u32),
    /// The actual class is not compatible with the declared class.
    Infinite,
}

impl Distance {
    pub const EXACT: Distance = Distance::Finite(0);
    pub const WILDCARD: Distance = Distance::Finite(WILDCARD_DISTANCE);

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn is_exact(self) -> bool {
        self == Distance::EXACT
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => f.write_str("Inf"),
        }
    }
}

/// Computes distances through a class hierarchy cache.
pub struct DistanceCalculator<'a> {
    cache: &'a ClassHierarchyCache,
    definitions: &'a dyn ClassDefinitions,
}

impl<'a> DistanceCalculator<'a> {
    pub fn new(cache: &'a ClassHierarchyCache, definitions: &'a dyn ClassDefinitions) -> Self {
        DistanceCalculator { cache, definitions }
    }

    /// Distance from `actual` to `declared`.
    ///
    /// A wildcard declaration always matches at `WILDCARD_DISTANCE`. An
    /// undefined actual class matches nothing but the wildcard.
    pub fn distance(&self, actual: Name, declared: Name) -> Distance {
        if declared == sym::ANY {
            return Distance::WILDCARD;
        }
        match self.cache.ancestors_of(self.definitions, actual) {
            Ok(entry) => entry
                .distance_to(declared)
                .map_or(Distance::Infinite, |d| Distance::Finite(u32::from(d))),
            Err(not_found) => {
                tracing::trace!(class = ?not_found.class, "undefined class is incompatible");
                Distance::Infinite
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
