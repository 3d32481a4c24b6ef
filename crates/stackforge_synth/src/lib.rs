//! STACKFORGE Synthesizer
//!
//! Turns a composed resource graph into a deployable plan: resolves
//! config references into edges, expands grants into per-mode
//! permission edges, then topologically orders everything and emits an
//! immutable [`Plan`] with a table of named outputs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod emit;
pub mod grants;
pub mod plan;
pub mod provider;
pub mod resolver;
pub mod stack;

pub use emit::emit;
pub use grants::GrantSpec;
pub use plan::{OutputBinding, Plan, ResolvedResource};
pub use provider::{ArtifactPackager, Provisioner};
pub use resolver::resolve_references;
pub use stack::Stack;
