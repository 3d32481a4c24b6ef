//! Grant expander: coarse grant declarations become per-mode edges.

use serde::{Deserialize, Serialize};
use stackforge_core::{AccessSet, ComposeError, ComposeResult, LogicalId};
use stackforge_graph::{Composer, Edge, EdgeKind};

/// A declared permission relationship, consumed once by expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSpec {
    /// The resource receiving access
    pub principal: LogicalId,
    /// The resource being accessed
    pub target: LogicalId,
    /// The requested access modes
    pub access: AccessSet,
}

impl GrantSpec {
    /// Create a new grant spec
    #[must_use]
    pub fn new(
        principal: impl Into<LogicalId>,
        target: impl Into<LogicalId>,
        access: AccessSet,
    ) -> Self {
        Self {
            principal: principal.into(),
            target: target.into(),
            access,
        }
    }

    /// Expand into permission edges and record them on the composer
    ///
    /// One `PermissionGrant` edge is recorded per requested access
    /// mode, never a combined edge, so downstream consumers can
    /// enumerate exact capabilities.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if principal or target is unregistered, or
    /// `IncompatibleGrant` if the target's kind does not support a
    /// requested mode.
    pub fn expand(self, composer: &mut Composer) -> ComposeResult<()> {
        composer.get(&self.principal)?;
        let target_kind = composer.get(&self.target)?.kind;

        for mode in self.access.iter() {
            if !target_kind.supports_access(mode) {
                return Err(ComposeError::IncompatibleGrant {
                    target: self.target.clone(),
                    kind: target_kind.name().to_string(),
                    mode: mode.name().to_string(),
                });
            }
        }

        for mode in self.access.iter() {
            tracing::debug!(
                principal = %self.principal,
                target = %self.target,
                mode = %mode,
                "expanded grant"
            );
            composer.add_edge(Edge::new(
                self.principal.clone(),
                self.target.clone(),
                EdgeKind::PermissionGrant { mode },
            ))?;
        }
        Ok(())
    }
}
