//! Resource descriptors: kind, identity, configuration.

use serde::{Deserialize, Serialize};
use stackforge_core::{AccessMode, ComposeError, ConfigMap, LogicalId};

/// Kind of a managed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Key-value data table
    Table,
    /// Object storage bucket
    BlobStore,
    /// Compute function
    ComputeUnit,
    /// HTTP routing layer (one per stack)
    RouteLayer,
}

impl ResourceKind {
    /// Get a string representation of the kind
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::BlobStore => "BlobStore",
            Self::ComputeUnit => "ComputeUnit",
            Self::RouteLayer => "RouteLayer",
        }
    }

    /// Generated attributes a resource of this kind exposes
    ///
    /// These are the provider-assigned values other resources may
    /// reference and outputs may export. Anything outside this list is
    /// rejected at emission.
    #[must_use]
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            Self::Table => &["table_name", "table_arn"],
            Self::BlobStore => &["bucket_name", "bucket_arn"],
            Self::ComputeUnit => &["function_name", "function_arn"],
            Self::RouteLayer => &["url", "api_id"],
        }
    }

    /// Check whether this kind exposes the given generated attribute
    #[must_use]
    pub fn exposes(&self, attribute: &str) -> bool {
        self.attributes().contains(&attribute)
    }

    /// Check whether this kind can be the target of a grant for `mode`
    ///
    /// Only data-bearing kinds accept grants; a route layer is not a
    /// data sink and a compute unit is a principal, not a target.
    #[must_use]
    pub fn supports_access(&self, mode: AccessMode) -> bool {
        let _ = mode; // Table and BlobStore accept both modes
        matches!(self, Self::Table | Self::BlobStore)
    }

    /// Check whether at most one resource of this kind may exist per stack
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::RouteLayer)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Table" => Ok(Self::Table),
            "BlobStore" => Ok(Self::BlobStore),
            "ComputeUnit" => Ok(Self::ComputeUnit),
            "RouteLayer" => Ok(Self::RouteLayer),
            other => Err(ComposeError::UnknownKind {
                name: other.to_string(),
            }),
        }
    }
}

/// HTTP method of a route binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// Any method
    Any,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Any => "ANY",
        };
        write!(f, "{}", s)
    }
}

/// Immutable declaration of one managed resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Logical id, unique within the stack
    pub id: LogicalId,
    /// Resource kind
    pub kind: ResourceKind,
    /// Declared configuration (may contain deferred `Ref` tokens)
    pub config: ConfigMap,
}

impl ResourceDescriptor {
    /// Create a new descriptor
    #[must_use]
    pub fn new(id: impl Into<LogicalId>, kind: ResourceKind, config: ConfigMap) -> Self {
        Self {
            id: id.into(),
            kind,
            config,
        }
    }
}
