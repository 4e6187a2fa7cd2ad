#![deny(clippy::arithmetic_side_effects)]
//! S4 Dispatch - multiple dispatch for S4 generic functions.
//!
//! Given a call to a generic (or to a primitive operation that S4 methods
//! can be set on), the engine picks the registered method whose signature
//! is closest to the classes of the actual arguments, then invokes it
//! through the host's `Evaluator`, with or without dispatch metadata.
//!
//! # Architecture
//!
//! Per dispatch attempt, leaves first:
//! - `ClassHierarchyCache`: memoized ancestor chains, invalidated by the
//!   class table's generation
//! - `DistanceCalculator`: inheritance distance of one argument to one
//!   declared class
//! - `GenericDescriptor`: which operation (and group) is dispatched
//! - `MethodLookupTable`: candidate methods snapshotted from the
//!   `MethodRegistry`, plus the selector that ranks them
//! - `CallingArguments`: actual arguments bound to the generic's formals
//! - `DispatchMetadata`: `.Generic`, `.Method`, `.Methods`, `.defined`,
//!   `.target`
//! - `S4Dispatcher`: the entry points
//!
//! # Tracing
//!
//! Entry points are instrumented with `tracing`. Call `init_tracing()` and
//! run with `RUST_LOG=s4_dispatch=debug` (or `trace` for per-candidate
//! distances) to see dispatch decisions.

mod arguments;
mod class_cache;
mod class_table;
mod dispatcher;
mod distance;
pub mod errors;
mod evaluator;
pub mod generic;
mod lookup_table;
mod metadata;
mod registry;
mod shape;
mod shared;

#[cfg(test)]
mod test_helpers;

pub use arguments::{ActualArg, CallingArgument, CallingArguments, PromisedArg};
pub use class_cache::{ClassHierarchyCache, ClassHierarchyEntry};
pub use class_table::{
    is_basic_class, ClassDefinition, ClassDefinitions, ClassTable, BASIC_CLASSES,
    CLASS_METADATA_PREFIX,
};
pub use dispatcher::{DispatchOptions, DispatchOutcome, DispatcherBuilder, S4Dispatcher};
pub use distance::{Distance, DistanceCalculator, WILDCARD_DISTANCE};
pub use errors::{ArgumentMatchError, ClassNotFound, DispatchError, RegistryError};
pub use evaluator::Evaluator;
pub use generic::GenericDescriptor;
pub use lookup_table::{Distances, MethodLookupTable, RankedMethod};
pub use metadata::{primitive_marker, target_signature, DispatchMetadata};
pub use registry::{GenericDefinition, MethodDefinition, MethodRegistry};
pub use shape::{Formal, FormalKind, GenericShape};
pub use shared::SharedMutable;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=s4_dispatch=debug` or `RUST_LOG=s4_dispatch=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
