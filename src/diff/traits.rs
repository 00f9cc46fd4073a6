//! Trait definitions for diff computation strategies.
//!
//! Each category of finding (class set, per-class fields) is computed by its
//! own `ChangeComputer`, so the pieces can be tested in isolation.

use crate::model::SaveFile;

/// Trait for computing a specific type of change between save files.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes between the left and right save files.
    fn compute(&self, left: &SaveFile, right: &SaveFile) -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
