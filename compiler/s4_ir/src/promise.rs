//! Lazily evaluated arguments.

use std::cell::OnceCell;

use crate::{EvalError, ExprId, Value};

/// An argument value that is either still deferred or already forced.
///
/// Forcing is memoized: once a value is produced it is returned on every
/// later request and the expression is never evaluated again.
#[derive(Debug)]
pub struct Promise {
    expr: Option<ExprId>,
    value: OnceCell<Value>,
}

impl Promise {
    /// A promise that evaluates `expr` on first use.
    pub fn deferred(expr: ExprId) -> Self {
        Promise {
            expr: Some(expr),
            value: OnceCell::new(),
        }
    }

    /// A promise whose value is already known.
    pub fn forced(value: Value) -> Self {
        Promise {
            expr: None,
            value: OnceCell::from(value),
        }
    }

    /// Expression this promise was created from, if any.
    pub fn expr(&self) -> Option<ExprId> {
        self.expr
    }

    pub fn is_forced(&self) -> bool {
        self.value.get().is_some()
    }

    /// The value, if already forced.
    pub fn value(&self) -> Option<&Value> {
        self.value.get()
    }

    /// Return the value, evaluating the expression with `force` the first
    /// time. An error leaves the promise deferred.
    pub fn force_with(
        &self,
        force: impl FnOnce(ExprId) -> Result<Value, EvalError>,
    ) -> Result<&Value, EvalError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let Some(expr) = self.expr else {
            return Err(EvalError::new("promise has no expression to evaluate"));
        };
        let value = force(expr)?;
        Ok(self.value.get_or_init(|| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_forced_promise_never_evaluates() {
        let promise = Promise::forced(Value::scalar(1.0));
        let value = promise.force_with(|_| Err(EvalError::new("should not run")));
        assert_eq!(value, Ok(&Value::scalar(1.0)));
        assert!(promise.expr().is_none());
    }

    #[test]
    fn test_deferred_promise_forces_once() {
        let calls = Cell::new(0);
        let promise = Promise::deferred(ExprId::new(7));
        assert!(!promise.is_forced());

        for _ in 0..3 {
            let value = promise.force_with(|expr| {
                calls.set(calls.get() + 1);
                assert_eq!(expr, ExprId::new(7));
                Ok(Value::scalar(2.0))
            });
            assert_eq!(value, Ok(&Value::scalar(2.0)));
        }

        assert_eq!(calls.get(), 1);
        assert!(promise.is_forced());
        assert_eq!(promise.value(), Some(&Value::scalar(2.0)));
    }

    #[test]
    fn test_failed_force_stays_deferred() {
        let promise = Promise::deferred(ExprId::new(0));
        let err = promise.force_with(|_| Err(EvalError::new("object 'x' not found")));
        assert_eq!(err, Err(EvalError::new("object 'x' not found")));
        assert!(!promise.is_forced());

        let retry = promise.force_with(|_| Ok(Value::Null));
        assert_eq!(retry, Ok(&Value::Null));
    }
}
