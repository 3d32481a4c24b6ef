//! Error taxonomy for composition.
//!
//! Every error is terminal for the synthesis that raised it: each one
//! points at a malformed declaration, never a transient condition, so
//! nothing here is retried. The offending id(s) ride along so the
//! caller can fix the declaration and re-compose.

use crate::id::LogicalId;

/// Composition result type
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors raised while composing or emitting a stack
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// A resource (or output) id collides with an existing one
    #[error("duplicate id: {id}")]
    DuplicateId {
        /// The colliding id
        id: LogicalId,
    },

    /// A kind name did not match any known resource kind
    #[error("unknown resource kind: {name}")]
    UnknownKind {
        /// The unrecognized kind name
        name: String,
    },

    /// A referenced resource id is not registered
    #[error("resource not found: {id}")]
    NotFound {
        /// The missing id
        id: LogicalId,
    },

    /// A second instance of a one-per-stack kind was registered
    #[error("{kind} is limited to one per stack (existing: {existing}, new: {id})")]
    SingletonViolation {
        /// The kind name
        kind: String,
        /// The already-registered instance
        existing: LogicalId,
        /// The rejected instance
        id: LogicalId,
    },

    /// A config placeholder points at an unregistered resource
    #[error("config of {from} references unknown resource {to}")]
    DanglingReference {
        /// The referencing resource
        from: LogicalId,
        /// The missing referent
        to: LogicalId,
    },

    /// A grant requests an access mode the target kind cannot honor
    #[error("cannot grant {mode} on {target} ({kind})")]
    IncompatibleGrant {
        /// The grant target
        target: LogicalId,
        /// The target's kind name
        kind: String,
        /// The rejected access mode name
        mode: String,
    },

    /// The edge set contains a cycle
    #[error("dependency cycle: {}", path.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(" -> "))]
    CycleDetected {
        /// Ids along the cycle, in traversal order
        path: Vec<LogicalId>,
    },

    /// A deferred token could not be resolved during emission
    #[error("unresolved reference from {from}: {to} has no attribute {attribute}")]
    UnresolvedReference {
        /// The referencing resource
        from: LogicalId,
        /// The referenced resource
        to: LogicalId,
        /// The attribute the token named
        attribute: String,
    },

    /// An output names an attribute its source kind does not expose
    #[error("output {name}: {source} ({kind}) exposes no attribute {attribute}")]
    InvalidAttribute {
        /// The output name
        name: String,
        /// The output's source resource
        source: LogicalId,
        /// The source's kind name
        kind: String,
        /// The unsupported attribute
        attribute: String,
    },

    /// A relationship targets a resource of the wrong kind
    #[error("{id} is a {kind}, expected {expected}")]
    InvalidTargetKind {
        /// The offending id
        id: LogicalId,
        /// Its actual kind name
        kind: String,
        /// The kind the relationship requires
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ComposeError::NotFound {
            id: LogicalId::from("T1"),
        };
        assert_eq!(format!("{}", err), "resource not found: T1");

        let err = ComposeError::DuplicateId {
            id: LogicalId::from("C1"),
        };
        assert_eq!(format!("{}", err), "duplicate id: C1");
    }

    #[test]
    fn test_cycle_display_lists_path() {
        let err = ComposeError::CycleDetected {
            path: vec![LogicalId::from("A"), LogicalId::from("B"), LogicalId::from("A")],
        };
        assert_eq!(format!("{}", err), "dependency cycle: A -> B -> A");
    }

    #[test]
    fn test_error_equality() {
        let a = ComposeError::UnknownKind { name: "queue".to_string() };
        let b = ComposeError::UnknownKind { name: "queue".to_string() };
        assert_eq!(a, b);
    }
}
