//! Operation registry
//!
//! Maps a one-byte tag to the handler that implements it. The compiler uses
//! the registry to decide which source bytes are instructions; the VM uses
//! it to dispatch each compiled instruction.

use crate::error::{RegistryError, VmError};
use crate::vm::{Flow, Payload};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type of an instruction handler
///
/// Takes the execution context and tells the VM where to go next.
pub type Handler = Arc<dyn Fn(&mut Payload<'_>) -> Result<Flow, VmError> + Send + Sync>;

/// Tag to handler table
#[derive(Clone)]
pub struct OperationRegistry {
    operations: HashMap<u8, Handler>,
}

impl OperationRegistry {
    /// Create a registry seeded with the eight built-in instructions
    pub fn new() -> Self {
        let operations = super::BUILTINS
            .into_iter()
            .map(|(tag, func)| (tag, Arc::new(func) as Handler))
            .collect();
        Self { operations }
    }

    /// Create a registry with no instructions at all
    pub fn empty() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register `handler` under `tag`
    ///
    /// Fails without touching the registry if `tag` is already taken.
    pub fn add<F>(&mut self, tag: u8, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut Payload<'_>) -> Result<Flow, VmError> + Send + Sync + 'static,
    {
        self.add_handler(tag, Arc::new(handler))
    }

    /// Register an already shared handler under `tag`
    pub fn add_handler(&mut self, tag: u8, handler: Handler) -> Result<(), RegistryError> {
        if self.operations.contains_key(&tag) {
            return Err(RegistryError::DuplicateOperation(tag));
        }
        self.operations.insert(tag, handler);
        Ok(())
    }

    /// Unregister `tag`, returning its handler
    pub fn remove(&mut self, tag: u8) -> Result<Handler, RegistryError> {
        self.operations
            .remove(&tag)
            .ok_or(RegistryError::UnknownOperation(tag))
    }

    #[inline]
    pub fn contains(&self, tag: u8) -> bool {
        self.operations.contains_key(&tag)
    }

    #[inline]
    pub fn get(&self, tag: u8) -> Option<&Handler> {
        self.operations.get(&tag)
    }

    /// Registered tags in ascending order
    pub fn tags(&self) -> Vec<u8> {
        let mut tags: Vec<u8> = self.operations.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: String = self.tags().into_iter().map(char::from).collect();
        f.debug_struct("OperationRegistry")
            .field("tags", &tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BUILTINS;

    fn noop(_payload: &mut Payload<'_>) -> Result<Flow, VmError> {
        Ok(Flow::Continue)
    }

    #[test]
    fn test_registry_basic() {
        let mut registry = OperationRegistry::empty();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());

        registry.add(b'!', noop).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(b'!'));
        assert!(!registry.contains(b'?'));
    }

    #[test]
    fn test_builtins_are_seeded() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.tags(), b"+,-.<>[]".to_vec());
    }

    #[test]
    fn test_builtin_tags_are_distinct() {
        let mut tags: Vec<u8> = BUILTINS.iter().map(|(tag, _)| *tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), BUILTINS.len());
        assert_eq!(OperationRegistry::new().len(), BUILTINS.len());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = OperationRegistry::new();
        let original = Arc::clone(registry.get(b'+').unwrap());

        assert_eq!(
            registry.add(b'+', noop),
            Err(RegistryError::DuplicateOperation(b'+'))
        );
        assert!(Arc::ptr_eq(registry.get(b'+').unwrap(), &original));
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_remove() {
        let mut registry = OperationRegistry::new();
        assert!(registry.remove(b'.').is_ok());
        assert!(!registry.contains(b'.'));
        assert_eq!(registry.len(), 7);

        assert!(matches!(
            registry.remove(b'.'),
            Err(RegistryError::UnknownOperation(b'.'))
        ));
        assert!(matches!(
            registry.remove(b'x'),
            Err(RegistryError::UnknownOperation(b'x'))
        ));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_debug_lists_tags() {
        let registry = OperationRegistry::new();
        assert_eq!(
            format!("{:?}", registry),
            "OperationRegistry { tags: \"+,-.<>[]\" }"
        );
    }
}
