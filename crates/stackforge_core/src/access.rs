//! Access modes for permission grants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An access mode a principal may be granted on a target resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessMode {
    /// Read data from the target
    Read,
    /// Write data to the target
    Write,
}

impl AccessMode {
    /// Get a string representation of the mode
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
        }
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An ordered set of access modes requested by one grant declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessSet {
    modes: BTreeSet<AccessMode>,
}

impl AccessSet {
    /// Create a new empty access set
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: BTreeSet::new(),
        }
    }

    /// Read-only access
    #[must_use]
    pub fn read() -> Self {
        Self::new().with(AccessMode::Read)
    }

    /// Read and write access
    #[must_use]
    pub fn read_write() -> Self {
        Self::new().with(AccessMode::Read).with(AccessMode::Write)
    }

    /// Add a mode
    #[must_use]
    pub fn with(mut self, mode: AccessMode) -> Self {
        self.modes.insert(mode);
        self
    }

    /// Check if a mode is requested
    #[must_use]
    pub fn contains(&self, mode: AccessMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Iterate modes in a fixed order (Read before Write)
    pub fn iter(&self) -> impl Iterator<Item = AccessMode> + '_ {
        self.modes.iter().copied()
    }

    /// Number of requested modes
    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Check if no modes are requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl FromIterator<AccessMode> for AccessSet {
    fn from_iter<I: IntoIterator<Item = AccessMode>>(iter: I) -> Self {
        Self {
            modes: iter.into_iter().collect(),
        }
    }
}
