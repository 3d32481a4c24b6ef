//! Registry of resource descriptors for one stack.

use crate::descriptor::{ResourceDescriptor, ResourceKind};
use indexmap::IndexMap;
use stackforge_core::{ComposeError, ComposeResult, ConfigMap, LogicalId};

/// Stores descriptors in registration order and enforces id uniqueness
/// and per-kind singleton limits.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: IndexMap<LogicalId, ResourceDescriptor>,
}

impl Registry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register a descriptor
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is already taken, or
    /// `SingletonViolation` if the kind is limited to one per stack and
    /// an instance already exists.
    pub fn register(
        &mut self,
        id: LogicalId,
        kind: ResourceKind,
        config: ConfigMap,
    ) -> ComposeResult<()> {
        if self.descriptors.contains_key(&id) {
            return Err(ComposeError::DuplicateId { id });
        }

        if kind.is_singleton() {
            if let Some(existing) = self.descriptors.values().find(|d| d.kind == kind) {
                return Err(ComposeError::SingletonViolation {
                    kind: kind.name().to_string(),
                    existing: existing.id.clone(),
                    id,
                });
            }
        }

        tracing::debug!(id = %id, kind = %kind, "registered resource");
        self.descriptors
            .insert(id.clone(), ResourceDescriptor::new(id, kind, config));
        Ok(())
    }

    /// Get a descriptor by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no descriptor has the id.
    pub fn get(&self, id: &LogicalId) -> ComposeResult<&ResourceDescriptor> {
        self.descriptors
            .get(id)
            .ok_or_else(|| ComposeError::NotFound { id: id.clone() })
    }

    /// Check whether an id is registered
    #[must_use]
    pub fn contains(&self, id: &LogicalId) -> bool {
        self.descriptors.contains_key(id)
    }

    /// Registration-order position of an id, if registered
    #[must_use]
    pub fn position(&self, id: &LogicalId) -> Option<usize> {
        self.descriptors.get_index_of(id)
    }

    /// Iterate descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.values()
    }

    /// Number of registered descriptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
