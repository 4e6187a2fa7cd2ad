//! The evaluator seam.
//!
//! Dispatch never runs code itself. It forces argument promises and invokes
//! the selected method through an `Evaluator` supplied by the host.

use s4_ir::{EvalResult, ExprId, Value};

use crate::arguments::CallingArguments;
use crate::metadata::DispatchMetadata;

/// Host operations dispatch relies on.
pub trait Evaluator {
    /// Evaluate a deferred argument expression.
    fn force(&mut self, expr: ExprId) -> EvalResult;

    /// Invoke `function` with the matched arguments and no dispatch bindings.
    fn call(&mut self, function: &Value, args: &CallingArguments) -> EvalResult;

    /// Invoke `function` with the matched arguments, binding `metadata`
    /// (`.Generic`, `.Method`, ...) in the method's frame.
    fn apply_with_metadata(
        &mut self,
        function: &Value,
        args: &CallingArguments,
        metadata: &DispatchMetadata,
    ) -> EvalResult;
}
