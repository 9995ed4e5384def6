//! Sharing a registry between threads
//!
//! A registry is single-writer: mutate it through the write lock during
//! setup, then either keep reading through the lock or [`freeze`] it into an
//! immutable snapshot that any number of runs can use at once.

use crate::builtins::OperationRegistry;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registry behind a read-write lock
pub type SharedRegistry = Arc<RwLock<OperationRegistry>>;

/// Wrap `registry` for shared mutation
pub fn shared(registry: OperationRegistry) -> SharedRegistry {
    Arc::new(RwLock::new(registry))
}

/// Immutable snapshot of the current registry contents
///
/// Later changes to `registry` do not affect the snapshot.
pub fn freeze(registry: &SharedRegistry) -> Arc<OperationRegistry> {
    Arc::new(registry.read().clone())
}
