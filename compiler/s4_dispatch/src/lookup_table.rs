//! Candidate methods for one dispatch, and the selector that ranks them.
//!
//! Candidates are collected in a fixed order: methods set on the operation
//! itself, then methods of its group generic, then of the group's
//! super-group. Within each, registration order is kept. Selection keeps
//! the first candidate with the smallest distance sequence, so that order
//! is the tie-break.

#![expect(
    clippy::disallowed_types,
    reason = "candidates hold shared references into the registry"
)]

use std::sync::Arc;

use smallvec::SmallVec;

use s4_ir::{sym, Closure, Heap, Name, Value};

use crate::arguments::CallingArguments;
use crate::distance::{Distance, DistanceCalculator};
use crate::generic::GenericDescriptor;
use crate::registry::{MethodDefinition, MethodRegistry};
use crate::shape::GenericShape;

/// Per-slot distances; most generics dispatch on at most four formals.
pub type Distances = SmallVec<[Distance; 4]>;

#[derive(Clone, Debug)]
struct Candidate {
    method: Arc<MethodDefinition>,
    is_group_generic: bool,
}

/// Snapshot of the methods applicable to one generic.
#[derive(Clone, Debug)]
pub struct MethodLookupTable {
    generic: GenericDescriptor,
    shape: Arc<GenericShape>,
    candidates: Vec<Candidate>,
}

impl MethodLookupTable {
    pub fn new(generic: &GenericDescriptor, registry: &MethodRegistry) -> Self {
        let definition = registry.generic(generic.name());
        let group = generic
            .group()
            .or_else(|| definition.and_then(|d| d.group));

        let mut candidates: Vec<Candidate> = registry
            .methods_for(generic.name())
            .iter()
            .map(|method| Candidate {
                method: Arc::clone(method),
                is_group_generic: false,
            })
            .collect();
        let super_group = group.and_then(|g| registry.super_group(g));
        for group in group.into_iter().chain(super_group) {
            candidates.extend(registry.methods_for(group).iter().map(|method| Candidate {
                method: Arc::clone(method),
                is_group_generic: true,
            }));
        }

        let shape = definition
            .or_else(|| group.and_then(|g| registry.generic(g)))
            .map(|d| Arc::clone(&d.shape))
            .unwrap_or_default();

        MethodLookupTable {
            generic: *generic,
            shape,
            candidates,
        }
    }

    pub fn generic(&self) -> &GenericDescriptor {
        &self.generic
    }

    /// True when no S4 method applies to the generic at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Formals arguments are matched against.
    pub fn shape(&self) -> &GenericShape {
        &self.shape
    }

    /// Rank every candidate against `args` and return the best one.
    ///
    /// `None` means no candidate is compatible with the argument classes.
    pub fn select_method(
        &self,
        args: &CallingArguments,
        calc: &DistanceCalculator<'_>,
    ) -> Option<RankedMethod> {
        let mut best: Option<RankedMethod> = None;
        for candidate in &self.candidates {
            let Some(distances) = rank(candidate.method.signature(), args, calc) else {
                continue;
            };
            tracing::trace!(
                signature = ?candidate.method.signature(),
                ?distances,
                "compatible candidate"
            );
            // Strictly smaller only: on a tie the earlier candidate stays.
            let improves = match &best {
                Some(current) => distances < current.distances,
                None => true,
            };
            if improves {
                best = Some(RankedMethod::new(candidate, distances));
            }
        }
        if let Some(winner) = &best {
            tracing::debug!(
                signature = ?winner.method.signature(),
                exact = winner.is_exact,
                group = winner.is_group_generic,
                "method selected"
            );
        }
        best
    }
}

/// Distance of each dispatch slot to the class the signature declares for
/// it; `None` when any slot is incompatible. Slots past the end of the
/// signature are compared against `ANY`.
fn rank(
    signature: &[Name],
    args: &CallingArguments,
    calc: &DistanceCalculator<'_>,
) -> Option<Distances> {
    args.classes()
        .enumerate()
        .map(|(index, actual)| {
            let declared = signature.get(index).copied().unwrap_or(sym::ANY);
            let distance = calc.distance(actual, declared);
            distance.is_finite().then_some(distance)
        })
        .collect()
}

/// A compatible candidate with its distances.
#[derive(Clone, Debug)]
pub struct RankedMethod {
    method: Arc<MethodDefinition>,
    distances: Distances,
    is_exact: bool,
    is_group_generic: bool,
}

impl RankedMethod {
    fn new(candidate: &Candidate, distances: Distances) -> Self {
        // Padded slots are wildcards and do not make a match inexact.
        let is_exact = distances
            .iter()
            .take(candidate.method.declared_len())
            .all(|d| d.is_exact());
        RankedMethod {
            method: Arc::clone(&candidate.method),
            distances,
            is_exact,
            is_group_generic: candidate.is_group_generic,
        }
    }

    pub fn method(&self) -> &Arc<MethodDefinition> {
        &self.method
    }

    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// Every declared class matched its slot exactly.
    pub fn is_exact(&self) -> bool {
        self.is_exact
    }

    /// The method was set on a group generic rather than the operation.
    pub fn is_group_generic(&self) -> bool {
        self.is_group_generic
    }

    pub fn function(&self) -> &Value {
        self.method.function()
    }

    pub fn closure(&self) -> Option<&Heap<Closure>> {
        self.method.closure()
    }
}
