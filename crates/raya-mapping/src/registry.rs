//! Descriptor registry
//!
//! Holds one descriptor per mapped type for the lifetime of a mapping
//! context. Descriptors are registered during metadata initialization and
//! read concurrently afterwards; `reset` discards them all.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::descriptor::ConstructorDescriptor;
use crate::error::{InstantiationError, InstantiationResult};
use crate::value::Value;

struct Entry {
    type_name: &'static str,
    descriptor: Arc<dyn Any + Send + Sync>,
}

/// Registry of constructor descriptors indexed by target type
#[derive(Default)]
pub struct DescriptorRegistry {
    entries: RwLock<FxHashMap<TypeId, Entry>>,
}

impl DescriptorRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the descriptor for `T`, returning the one it replaces
    pub fn register<T: 'static>(
        &self,
        descriptor: ConstructorDescriptor<T>,
    ) -> Option<Arc<ConstructorDescriptor<T>>> {
        debug!(
            target_type = type_name::<T>(),
            parameters = ?descriptor.parameter_names(),
            "registering constructor descriptor"
        );
        let entry = Entry {
            type_name: type_name::<T>(),
            descriptor: Arc::new(descriptor),
        };
        self.entries
            .write()
            .insert(TypeId::of::<T>(), entry)
            .and_then(|old| old.descriptor.downcast().ok())
    }

    /// Get the descriptor for `T`
    pub fn get<T: 'static>(&self) -> Option<Arc<ConstructorDescriptor<T>>> {
        let entries = self.entries.read();
        let entry = entries.get(&TypeId::of::<T>())?;
        Arc::clone(&entry.descriptor).downcast().ok()
    }

    /// Check if `T` has a descriptor
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// Remove the descriptor for `T`
    pub fn remove<T: 'static>(&self) -> Option<Arc<ConstructorDescriptor<T>>> {
        self.entries
            .write()
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.descriptor.downcast().ok())
    }

    /// Instantiate `T` through its registered descriptor.
    ///
    /// Returns `Ok(None)` when the descriptor carries no strategy; the caller
    /// should then use its default instantiation path.
    pub fn instantiate<T: 'static>(&self, args: &[Value]) -> InstantiationResult<Option<T>> {
        let descriptor = self.get::<T>().ok_or(InstantiationError::NotRegistered {
            type_name: type_name::<T>(),
        })?;
        descriptor
            .instantiation_strategy()
            .map(|strategy| strategy.instantiate(args))
            .transpose()
    }

    /// Names of all registered target types
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.read().values().map(|e| e.type_name).collect()
    }

    /// Discard every descriptor (mapping-context reset)
    pub fn reset(&self) {
        let mut entries = self.entries.write();
        debug!(count = entries.len(), "resetting descriptor registry");
        entries.clear();
    }

    /// Get number of registered descriptors
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
