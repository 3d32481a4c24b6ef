//! Graph composer: the single owner of a stack's descriptors and edges.
//!
//! All edge creation funnels through [`Composer::add_edge`] so that
//! endpoint checks and cycle validation stay centralized. Adding an
//! edge invalidates any earlier `validate()` pass; emission must see a
//! validated graph.

use crate::descriptor::{ResourceDescriptor, ResourceKind};
use crate::edge::Edge;
use crate::registry::Registry;
use indexmap::IndexSet;
use stackforge_core::{ComposeError, ComposeResult, ConfigMap, LogicalId};

/// Directed graph of one stack's resources and relationships
#[derive(Debug, Clone, Default)]
pub struct Composer {
    registry: Registry,
    edges: Vec<Edge>,
    validated: bool,
}

impl Composer {
    /// Create a new empty composer
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            edges: Vec::new(),
            validated: false,
        }
    }

    /// Register a resource descriptor
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `SingletonViolation` per the registry
    /// contract.
    pub fn register(
        &mut self,
        id: LogicalId,
        kind: ResourceKind,
        config: ConfigMap,
    ) -> ComposeResult<()> {
        self.validated = false;
        self.registry.register(id, kind, config)
    }

    /// The descriptor registry
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// All recorded edges, in creation order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Add an edge between two registered descriptors
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either endpoint is unregistered.
    pub fn add_edge(&mut self, edge: Edge) -> ComposeResult<()> {
        self.registry.get(&edge.from)?;
        self.registry.get(&edge.to)?;

        tracing::trace!(edge = %edge, "recorded edge");
        self.validated = false;
        self.edges.push(edge);
        Ok(())
    }

    /// Whether the current edge set has passed `validate()`
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Validate the graph: every edge endpoint exists and no cycles
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an edge endpoint missing from the
    /// registry, or `CycleDetected` with the offending id sequence.
    pub fn validate(&mut self) -> ComposeResult<()> {
        for edge in &self.edges {
            if !self.registry.contains(&edge.from) {
                return Err(ComposeError::NotFound {
                    id: edge.from.clone(),
                });
            }
            if !self.registry.contains(&edge.to) {
                return Err(ComposeError::NotFound { id: edge.to.clone() });
            }
        }

        let mut visited = IndexSet::new();
        for descriptor in self.registry.iter() {
            let mut stack = IndexSet::new();
            self.dfs_cycle(&descriptor.id, &mut visited, &mut stack)?;
        }

        self.validated = true;
        Ok(())
    }

    /// DFS along dependency edges, tracking the recursion stack
    fn dfs_cycle<'a>(
        &'a self,
        id: &'a LogicalId,
        visited: &mut IndexSet<&'a LogicalId>,
        stack: &mut IndexSet<&'a LogicalId>,
    ) -> ComposeResult<()> {
        if let Some(start) = stack.get_index_of(id) {
            // Everything from the first occurrence onward is the cycle
            let path = stack
                .iter()
                .skip(start)
                .map(|&id| id.clone())
                .collect();
            return Err(ComposeError::CycleDetected { path });
        }
        if visited.contains(id) {
            return Ok(());
        }

        visited.insert(id);
        stack.insert(id);

        for edge in &self.edges {
            if edge.from == *id {
                self.dfs_cycle(&edge.to, visited, stack)?;
            }
        }

        stack.shift_remove(id);
        Ok(())
    }

    /// Ids this descriptor depends on (its edges' `to` endpoints)
    #[must_use]
    pub fn dependencies(&self, id: &LogicalId) -> Vec<&LogicalId> {
        self.edges
            .iter()
            .filter(|e| e.from == *id)
            .map(|e| &e.to)
            .collect()
    }

    /// Ids that depend on this descriptor
    #[must_use]
    pub fn dependents(&self, id: &LogicalId) -> Vec<&LogicalId> {
        self.edges
            .iter()
            .filter(|e| e.to == *id)
            .map(|e| &e.from)
            .collect()
    }

    /// Get a single descriptor
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent.
    pub fn get(&self, id: &LogicalId) -> ComposeResult<&ResourceDescriptor> {
        self.registry.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeKind;

    fn reference_edge(from: &str, to: &str) -> Edge {
        Edge::new(
            from,
            to,
            EdgeKind::ConfigReference {
                attribute: "table_name".to_string(),
            },
        )
    }

    fn composer_with(ids: &[&str]) -> Composer {
        let mut composer = Composer::new();
        for id in ids {
            composer
                .register(LogicalId::from(*id), ResourceKind::Table, ConfigMap::new())
                .unwrap();
        }
        composer
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut composer = composer_with(&["A"]);
        let err = composer.add_edge(reference_edge("A", "B")).unwrap_err();
        assert_eq!(
            err,
            ComposeError::NotFound {
                id: LogicalId::from("B")
            }
        );
        assert!(composer.edges().is_empty());
    }

    #[test]
    fn test_validate_acyclic() {
        let mut composer = composer_with(&["A", "B", "C"]);
        composer.add_edge(reference_edge("B", "A")).unwrap();
        composer.add_edge(reference_edge("C", "B")).unwrap();

        assert!(composer.validate().is_ok());
        assert!(composer.is_validated());
    }

    #[test]
    fn test_validate_two_node_cycle() {
        let mut composer = composer_with(&["A", "B"]);
        composer.add_edge(reference_edge("A", "B")).unwrap();
        composer.add_edge(reference_edge("B", "A")).unwrap();

        let err = composer.validate().unwrap_err();
        match err {
            ComposeError::CycleDetected { path } => {
                let names: Vec<_> = path.iter().map(|id| id.as_str()).collect();
                assert!(names == vec!["A", "B"] || names == vec!["B", "A"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_self_cycle() {
        let mut composer = composer_with(&["A"]);
        composer.add_edge(reference_edge("A", "A")).unwrap();

        let err = composer.validate().unwrap_err();
        assert_eq!(
            err,
            ComposeError::CycleDetected {
                path: vec![LogicalId::from("A")]
            }
        );
    }

    #[test]
    fn test_longer_cycle_path() {
        let mut composer = composer_with(&["A", "B", "C"]);
        composer.add_edge(reference_edge("A", "B")).unwrap();
        composer.add_edge(reference_edge("B", "C")).unwrap();
        composer.add_edge(reference_edge("C", "A")).unwrap();

        match composer.validate().unwrap_err() {
            ComposeError::CycleDetected { path } => assert_eq!(path.len(), 3),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_addition_invalidates() {
        let mut composer = composer_with(&["A", "B"]);
        composer.validate().unwrap();
        assert!(composer.is_validated());

        composer.add_edge(reference_edge("A", "B")).unwrap();
        assert!(!composer.is_validated());
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let mut composer = composer_with(&["A", "B"]);
        composer.add_edge(reference_edge("B", "A")).unwrap();

        assert_eq!(composer.dependencies(&LogicalId::from("B")), vec![&LogicalId::from("A")]);
        assert_eq!(composer.dependents(&LogicalId::from("A")), vec![&LogicalId::from("B")]);
    }
}
