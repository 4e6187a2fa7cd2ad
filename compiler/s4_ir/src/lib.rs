//! S4 IR - host value model for the S4 dispatch engine.
//!
//! This crate provides:
//! - `Name` and `StringInterner`: interned identifiers for classes,
//!   operations, attribute tags and character data
//! - `sym`: well-known symbols pre-interned at fixed indices
//! - `Value`: the runtime values dispatch inspects (attributes, class)
//! - `Promise`: lazily evaluated arguments with memoized forcing
//! - `EvalError` / `EvalResult`: failures reported by the evaluator

mod errors;
mod expr_id;
mod interner;
mod name;
mod promise;
pub mod sym;
mod value;

pub use errors::{EvalError, EvalResult};
pub use expr_id::ExprId;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use promise::Promise;
pub use value::{Attributes, Closure, Heap, S4Object, Value, Vector};
