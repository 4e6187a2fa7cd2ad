//! Errors raised by the evaluator.

use std::fmt;

use crate::Value;

/// Result of evaluating an expression or calling a closure.
pub type EvalResult = Result<Value, EvalError>;

/// Failure reported by the evaluator while forcing an argument or running a
/// method body. Dispatch never inspects it, only propagates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}
