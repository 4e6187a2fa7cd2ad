//! Shared, lock-protected state.
//!
//! The class table and the method registry outlive any single dispatch and
//! are mutated by the (external) definition subsystems between calls.

#![expect(clippy::disallowed_types, reason = "Arc is the implementation of SharedMutable")]

use std::fmt;
use std::sync::Arc;

/// Shared handle to state that is read on every dispatch and written rarely.
///
/// Uses `Arc<RwLock<T>>`; clones share the same state. Dispatch holds read
/// guards only while it ranks candidates and releases them before the
/// evaluator runs, so a method body may define classes or methods.
pub struct SharedMutable<T>(Arc<parking_lot::RwLock<T>>);

impl<T> SharedMutable<T> {
    pub fn new(inner: T) -> Self {
        SharedMutable(Arc::new(parking_lot::RwLock::new(inner)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T> Clone for SharedMutable<T> {
    fn clone(&self) -> Self {
        SharedMutable(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedMutable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedMutable({:?})", &*self.0.read())
    }
}
