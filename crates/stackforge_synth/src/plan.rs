//! The emitted plan: resolved resources plus named outputs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stackforge_core::{ConfigMap, LogicalId};
use stackforge_graph::ResourceKind;

/// A caller-declared named output of the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBinding {
    /// Unique output name
    pub name: String,
    /// The resource whose attribute is exported
    pub source: LogicalId,
    /// The exported generated attribute
    pub attribute: String,
}

impl OutputBinding {
    /// Create a new output binding
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<LogicalId>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            attribute: attribute.into(),
        }
    }
}

/// One resource after resolution
///
/// The config no longer contains `Ref` values: every deferred token has
/// been substituted with its symbolic placeholder string. The attribute
/// table lists every generated attribute the kind exposes, as the
/// placeholder a provisioner later replaces with a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResource {
    /// Logical id
    pub id: LogicalId,
    /// Resource kind
    pub kind: ResourceKind,
    /// Fully substituted configuration
    pub config: ConfigMap,
    /// Generated attributes as symbolic placeholders
    pub attributes: IndexMap<String, String>,
}

/// The final deployable artifact of one stack
///
/// Immutable once emitted. `resources` is in dependency order: every
/// config-referenced resource appears strictly before its referrer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Resources in deterministic dependency order
    pub resources: Vec<ResolvedResource>,
    /// Resolved named outputs
    pub outputs: IndexMap<String, String>,
}

impl Plan {
    /// Look up a resolved resource by id
    #[must_use]
    pub fn resource(&self, id: &LogicalId) -> Option<&ResolvedResource> {
        self.resources.iter().find(|r| r.id == *id)
    }

    /// Position of a resource in the emitted order
    #[must_use]
    pub fn position(&self, id: &LogicalId) -> Option<usize> {
        self.resources.iter().position(|r| r.id == *id)
    }
}
