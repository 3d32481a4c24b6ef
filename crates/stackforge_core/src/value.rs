//! Configuration values and deferred tokens.
//!
//! A descriptor's config is a tree of plain values plus `Ref` leaves.
//! A `Ref` names another resource's generated attribute, which is not
//! known until a provider acts; the emitter replaces it with the
//! symbolic placeholder form `${id.attribute}` so that emission stays
//! deterministic without provider involvement.

use crate::id::LogicalId;
use serde::{Deserialize, Serialize};

/// Configuration map of a resource descriptor
pub type ConfigMap = indexmap::IndexMap<String, ConfigValue>;

/// A deferred-value token naming another resource's generated attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The referenced resource
    pub source: LogicalId,
    /// The generated attribute being referenced
    pub attribute: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(source: impl Into<LogicalId>, attribute: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            attribute: attribute.into(),
        }
    }

    /// Render the symbolic placeholder form
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("${{{}.{}}}", self.source, self.attribute)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.placeholder())
    }
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigValue {
    /// Literal string
    String(String),
    /// Literal integer
    Integer(i64),
    /// Literal boolean
    Bool(bool),
    /// Ordered list of values
    List(Vec<ConfigValue>),
    /// Nested map of values
    Map(ConfigMap),
    /// Deferred reference to another resource's generated attribute
    Ref(Token),
}

impl ConfigValue {
    /// Create a deferred reference to another resource's attribute
    #[must_use]
    pub fn reference(source: impl Into<LogicalId>, attribute: impl Into<String>) -> Self {
        Self::Ref(Token::new(source, attribute))
    }

    /// Visit every token in this value tree
    pub fn for_each_token<'a>(&'a self, f: &mut impl FnMut(&'a Token)) {
        match self {
            Self::Ref(token) => f(token),
            Self::List(items) => {
                for item in items {
                    item.for_each_token(f);
                }
            }
            Self::Map(map) => {
                for value in map.values() {
                    value.for_each_token(f);
                }
            }
            Self::String(_) | Self::Integer(_) | Self::Bool(_) => {}
        }
    }

    /// Get as a string slice, if this is a literal string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
