//! Logical identifiers for managed resources.
//!
//! Ids are caller-visible names, unique within one stack. They are
//! plain strings rather than random identifiers so that two
//! compositions of the same declarations produce byte-identical plans.

use serde::{Deserialize, Serialize};

/// Logical identifier of a managed resource within a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    /// Create a new logical id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LogicalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LogicalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LogicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// `ComposeError::InvalidAttribute` has a field named `source`, which
// thiserror's derive wires into `Error::source()`; that requires the
// field type to implement `std::error::Error`.
impl std::error::Error for LogicalId {}
