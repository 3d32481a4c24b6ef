//! STACKFORGE Resource Graph
//!
//! Descriptor model and graph composer: resources are registered as
//! immutable descriptors, relationships are recorded as directed edges,
//! and the composer validates that the whole forms a DAG before any
//! plan can be emitted from it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composer;
pub mod descriptor;
pub mod edge;
pub mod registry;

pub use composer::Composer;
pub use descriptor::{HttpMethod, ResourceDescriptor, ResourceKind};
pub use edge::{Edge, EdgeKind};
pub use registry::Registry;
