//! The stack facade: declaration entry points plus `synthesize`.
//!
//! A `Stack` is an independent value owning its own composer; there is
//! no ambient global application state. Composition is synchronous and
//! single-threaded: callers sharing one stack across threads must
//! serialize access themselves.

use crate::emit::emit;
use crate::grants::GrantSpec;
use crate::plan::{OutputBinding, Plan};
use crate::resolver::resolve_references;
use stackforge_core::{AccessSet, ComposeError, ComposeResult, ConfigMap, LogicalId};
use stackforge_graph::{Composer, Edge, EdgeKind, HttpMethod, ResourceKind};

/// One deployable stack under composition
#[derive(Debug, Clone, Default)]
pub struct Stack {
    composer: Composer,
    outputs: Vec<OutputBinding>,
    anon_counter: u64,
}

impl Stack {
    /// Create a new empty stack
    #[must_use]
    pub fn new() -> Self {
        Self {
            composer: Composer::new(),
            outputs: Vec::new(),
            anon_counter: 0,
        }
    }

    /// Declare a resource with an explicit logical id
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is taken, or
    /// `SingletonViolation` for a second one-per-stack resource.
    pub fn register_resource(
        &mut self,
        id: impl Into<LogicalId>,
        kind: ResourceKind,
        config: ConfigMap,
    ) -> ComposeResult<LogicalId> {
        let id = id.into();
        self.composer.register(id.clone(), kind, config)?;
        Ok(id)
    }

    /// Declare a resource, deriving its id from the kind
    ///
    /// Ids are `<kind><ordinal>` in declaration order, so composition
    /// stays deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SingletonViolation` for a second one-per-stack
    /// resource, or `DuplicateId` if a derived id was explicitly taken.
    pub fn register_resource_anon(
        &mut self,
        kind: ResourceKind,
        config: ConfigMap,
    ) -> ComposeResult<LogicalId> {
        self.anon_counter += 1;
        let id = LogicalId::new(format!("{}{}", kind.name(), self.anon_counter));
        self.register_resource(id, kind, config)
    }

    /// Bind a route on the stack's route layer to a compute unit
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, or `InvalidTargetKind` when
    /// the layer id is not a RouteLayer or the target is not a
    /// ComputeUnit.
    pub fn bind_route(
        &mut self,
        route_layer: impl Into<LogicalId>,
        path: impl Into<String>,
        method: HttpMethod,
        target: impl Into<LogicalId>,
    ) -> ComposeResult<()> {
        let route_layer = route_layer.into();
        let target = target.into();

        self.expect_kind(&route_layer, ResourceKind::RouteLayer)?;
        self.expect_kind(&target, ResourceKind::ComputeUnit)?;

        self.composer.add_edge(Edge::new(
            route_layer,
            target,
            EdgeKind::RouteBinding {
                path: path.into(),
                method,
            },
        ))
    }

    fn expect_kind(&self, id: &LogicalId, expected: ResourceKind) -> ComposeResult<()> {
        let kind = self.composer.get(id)?.kind;
        if kind != expected {
            return Err(ComposeError::InvalidTargetKind {
                id: id.clone(),
                kind: kind.name().to_string(),
                expected: expected.name().to_string(),
            });
        }
        Ok(())
    }

    /// Grant a principal a set of access modes on a target
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unregistered ids, or `IncompatibleGrant`
    /// when the target's kind cannot honor a requested mode.
    pub fn grant(
        &mut self,
        principal: impl Into<LogicalId>,
        target: impl Into<LogicalId>,
        access: AccessSet,
    ) -> ComposeResult<()> {
        GrantSpec::new(principal, target, access).expand(&mut self.composer)
    }

    /// Grant read and write access in one declaration
    ///
    /// # Errors
    ///
    /// Same contract as [`Stack::grant`].
    pub fn grant_read_write(
        &mut self,
        principal: impl Into<LogicalId>,
        target: impl Into<LogicalId>,
    ) -> ComposeResult<()> {
        self.grant(principal, target, AccessSet::read_write())
    }

    /// Declare a named output exporting a resource attribute
    ///
    /// The source resource and attribute are checked at synthesis, so
    /// outputs may be declared before the resource they export.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the output name is already declared.
    pub fn declare_output(
        &mut self,
        name: impl Into<String>,
        source: impl Into<LogicalId>,
        attribute: impl Into<String>,
    ) -> ComposeResult<()> {
        let binding = OutputBinding::new(name, source, attribute);
        if self.outputs.iter().any(|o| o.name == binding.name) {
            return Err(ComposeError::DuplicateId {
                id: LogicalId::from(binding.name.as_str()),
            });
        }
        self.outputs.push(binding);
        Ok(())
    }

    /// The underlying composer (read-only)
    #[must_use]
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Resolve references, validate the graph, and emit the plan
    ///
    /// Either a fully valid plan comes back or the first offending
    /// declaration's error does; there is no partial emission.
    ///
    /// # Errors
    ///
    /// Surfaces any composition error verbatim: dangling references,
    /// cycles, unresolved tokens, invalid outputs.
    pub fn synthesize(&mut self) -> ComposeResult<Plan> {
        resolve_references(&mut self.composer)?;
        self.composer.validate()?;
        emit(&self.composer, &self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::ConfigValue;

    #[test]
    fn test_anonymous_ids_are_deterministic() {
        let mut stack = Stack::new();
        let t = stack
            .register_resource_anon(ResourceKind::Table, ConfigMap::new())
            .unwrap();
        let b = stack
            .register_resource_anon(ResourceKind::BlobStore, ConfigMap::new())
            .unwrap();
        assert_eq!(t, LogicalId::from("Table1"));
        assert_eq!(b, LogicalId::from("BlobStore2"));
    }

    #[test]
    fn test_bind_route_rejects_non_compute_target() {
        let mut stack = Stack::new();
        stack
            .register_resource("R1", ResourceKind::RouteLayer, ConfigMap::new())
            .unwrap();
        stack
            .register_resource("T1", ResourceKind::Table, ConfigMap::new())
            .unwrap();

        let err = stack
            .bind_route("R1", "/items", HttpMethod::Post, "T1")
            .unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidTargetKind {
                id: LogicalId::from("T1"),
                kind: "Table".to_string(),
                expected: "ComputeUnit".to_string(),
            }
        );
    }

    #[test]
    fn test_bind_route_rejects_non_route_layer() {
        let mut stack = Stack::new();
        stack
            .register_resource("T1", ResourceKind::Table, ConfigMap::new())
            .unwrap();
        stack
            .register_resource("C1", ResourceKind::ComputeUnit, ConfigMap::new())
            .unwrap();

        let err = stack
            .bind_route("T1", "/items", HttpMethod::Get, "C1")
            .unwrap_err();
        assert_eq!(
            err,
            ComposeError::InvalidTargetKind {
                id: LogicalId::from("T1"),
                kind: "Table".to_string(),
                expected: "RouteLayer".to_string(),
            }
        );
    }

    #[test]
    fn test_bind_route_unknown_ids() {
        let mut stack = Stack::new();
        let err = stack
            .bind_route("R1", "/items", HttpMethod::Post, "C1")
            .unwrap_err();
        assert_eq!(
            err,
            ComposeError::NotFound {
                id: LogicalId::from("R1")
            }
        );
    }

    #[test]
    fn test_duplicate_output_name_rejected_at_declaration() {
        let mut stack = Stack::new();
        stack.declare_output("ApiUrl", "R1", "url").unwrap();
        let err = stack.declare_output("ApiUrl", "R1", "api_id").unwrap_err();
        assert_eq!(
            err,
            ComposeError::DuplicateId {
                id: LogicalId::from("ApiUrl")
            }
        );
    }

    #[test]
    fn test_synthesize_rejects_cycles() {
        let mut stack = Stack::new();
        let mut a_config = ConfigMap::new();
        a_config.insert("peer".to_string(), ConfigValue::reference("B", "table_name"));
        let mut b_config = ConfigMap::new();
        b_config.insert("peer".to_string(), ConfigValue::reference("A", "table_name"));

        stack.register_resource("A", ResourceKind::Table, a_config).unwrap();
        stack.register_resource("B", ResourceKind::Table, b_config).unwrap();

        match stack.synthesize().unwrap_err() {
            ComposeError::CycleDetected { path } => {
                let names: Vec<_> = path.iter().map(|id| id.as_str()).collect();
                assert!(names == vec!["A", "B"] || names == vec!["B", "A"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_synthesize_empty_stack() {
        let mut stack = Stack::new();
        let plan = stack.synthesize().unwrap();
        assert!(plan.resources.is_empty());
        assert!(plan.outputs.is_empty());
    }
}
