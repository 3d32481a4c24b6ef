//! Directed edges between resource descriptors.

use crate::descriptor::HttpMethod;
use serde::{Deserialize, Serialize};
use stackforge_core::{AccessMode, LogicalId};

/// Kind of relationship an edge records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `from`'s configuration references a generated attribute of `to`
    ConfigReference {
        /// The referenced attribute
        attribute: String,
    },
    /// `from` is granted one access mode on `to`
    PermissionGrant {
        /// The granted mode (one edge per mode, never combined)
        mode: AccessMode,
    },
    /// `from` (a route layer) routes requests to `to` (a compute unit)
    RouteBinding {
        /// Route path
        path: String,
        /// Route method
        method: HttpMethod,
    },
}

impl EdgeKind {
    /// Get a string representation of the edge kind
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigReference { .. } => "ConfigReference",
            Self::PermissionGrant { .. } => "PermissionGrant",
            Self::RouteBinding { .. } => "RouteBinding",
        }
    }
}

/// A directed edge: `from` depends on, or acts upon, `to`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The dependent (or acting) resource
    pub from: LogicalId,
    /// The depended-upon (or acted-upon) resource
    pub to: LogicalId,
    /// What the relationship is
    pub kind: EdgeKind,
}

impl Edge {
    /// Create a new edge
    #[must_use]
    pub fn new(from: impl Into<LogicalId>, to: impl Into<LogicalId>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.kind.name(), self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_display() {
        let edge = Edge::new(
            "C1",
            "T1",
            EdgeKind::PermissionGrant {
                mode: AccessMode::Read,
            },
        );
        assert_eq!(format!("{}", edge), "C1 -[PermissionGrant]-> T1");
    }

    #[test]
    fn test_edge_kind_names() {
        let reference = EdgeKind::ConfigReference {
            attribute: "table_name".to_string(),
        };
        assert_eq!(reference.name(), "ConfigReference");

        let binding = EdgeKind::RouteBinding {
            path: "/items".to_string(),
            method: HttpMethod::Post,
        };
        assert_eq!(binding.name(), "RouteBinding");
    }

    #[test]
    fn test_same_pair_distinct_kinds() {
        // Multiple edges between one pair are allowed when kinds differ
        let read = Edge::new("C1", "T1", EdgeKind::PermissionGrant { mode: AccessMode::Read });
        let write = Edge::new("C1", "T1", EdgeKind::PermissionGrant { mode: AccessMode::Write });
        assert_ne!(read, write);
    }
}
