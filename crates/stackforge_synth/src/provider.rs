//! Boundary contracts for external collaborators.
//!
//! The composer's responsibility ends at the emitted [`Plan`]; actually
//! packaging compute artifacts and provisioning cloud resources belong
//! to implementations of these traits, supplied by the caller.

use crate::plan::Plan;
use indexmap::IndexMap;
use stackforge_core::ComposeResult;

/// Packages a compute unit's source into an opaque content identifier
///
/// The composer never inspects or transforms packaged code; the
/// returned identifier is stored verbatim in the compute unit's config.
pub trait ArtifactPackager {
    /// Package the source at `source` and return its content id
    ///
    /// # Errors
    ///
    /// Implementations surface packaging failures as composition
    /// errors; the composer treats them as terminal.
    fn package(&self, source: &str) -> ComposeResult<String>;
}

/// Provisions the resources of a finalized plan
///
/// Returns the concrete value for each symbolic placeholder the plan
/// carries, keyed by the placeholder string.
pub trait Provisioner {
    /// Apply the plan against the provider
    ///
    /// # Errors
    ///
    /// Implementations surface provider failures as composition
    /// errors; the composer performs no retry or rollback.
    fn provision(&self, plan: &Plan) -> ComposeResult<IndexMap<String, String>>;
}
