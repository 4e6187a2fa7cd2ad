//! Test helpers for dispatch unit testing.
//!
//! Provides `MockEvaluator` for exercising argument matching and dispatch
//! without a real host evaluator.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::HashMap;

use s4_ir::{EvalError, EvalResult, ExprId, Name, Value};

use crate::arguments::CallingArguments;
use crate::evaluator::Evaluator;
use crate::metadata::DispatchMetadata;

/// How the mock was asked to run a method.
#[derive(Clone, Debug, PartialEq)]
pub enum Invocation {
    /// `call`: fast path, no bindings.
    Call { method: Name, classes: Vec<Name> },
    /// `apply_with_metadata`.
    WithMetadata {
        method: Name,
        classes: Vec<Name>,
        metadata: DispatchMetadata,
    },
}

/// Mock evaluator.
///
/// Allows registration of:
/// - Values to return for specific `ExprId`s
/// - Expressions whose evaluation fails
///
/// Every method invocation returns the method closure's label as a
/// character vector, so tests can tell which method ran.
pub struct MockEvaluator {
    /// Values to return for `force(ExprId)` calls.
    expr_values: HashMap<usize, Value>,
    /// Expressions that fail when forced.
    failing: Vec<usize>,
    /// Number of `force` calls so far.
    pub forces: usize,
    /// Every method invocation, in order.
    pub invocations: Vec<Invocation>,
}

impl MockEvaluator {
    pub fn new() -> Self {
        MockEvaluator {
            expr_values: HashMap::new(),
            failing: Vec::new(),
            forces: 0,
            invocations: Vec::new(),
        }
    }

    /// Register a value to return when `force(expr_id)` is called.
    pub fn with_expr(mut self, expr_id: ExprId, value: Value) -> Self {
        self.expr_values.insert(expr_id.index(), value);
        self
    }

    /// Make `force(expr_id)` fail.
    pub fn with_failing_expr(mut self, expr_id: ExprId) -> Self {
        self.failing.push(expr_id.index());
        self
    }

    /// The last invocation.
    pub fn last(&self) -> &Invocation {
        self.invocations.last().unwrap()
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn method_label(function: &Value) -> Name {
    function.as_closure().unwrap().label
}

impl Evaluator for MockEvaluator {
    fn force(&mut self, expr: ExprId) -> EvalResult {
        self.forces += 1;
        if self.failing.contains(&expr.index()) {
            return Err(EvalError::new(format!("cannot evaluate {expr:?}")));
        }
        Ok(self
            .expr_values
            .get(&expr.index())
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn call(&mut self, function: &Value, args: &CallingArguments) -> EvalResult {
        let method = method_label(function);
        self.invocations.push(Invocation::Call {
            method,
            classes: args.classes().collect(),
        });
        Ok(Value::string(method))
    }

    fn apply_with_metadata(
        &mut self,
        function: &Value,
        args: &CallingArguments,
        metadata: &DispatchMetadata,
    ) -> EvalResult {
        let method = method_label(function);
        self.invocations.push(Invocation::WithMetadata {
            method,
            classes: args.classes().collect(),
            metadata: metadata.clone(),
        });
        Ok(Value::string(method))
    }
}
