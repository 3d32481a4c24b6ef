//! STACKFORGE Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Everything downstream of the composer (descriptors, edges, plans)
//! is built from these serializable primitives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod error;
pub mod id;
pub mod value;

// Re-exports
pub use access::{AccessMode, AccessSet};
pub use error::{ComposeError, ComposeResult};
pub use id::LogicalId;
pub use value::{ConfigMap, ConfigValue, Token};
