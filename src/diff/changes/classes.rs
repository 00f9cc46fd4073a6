//! Class-set change computer implementation.

use crate::diff::traits::ChangeComputer;
use crate::diff::ClassChanges;
use crate::model::SaveFile;
use std::collections::HashSet;

/// Computes added and dropped classes between save files.
pub struct ClassChangeComputer;

impl ClassChangeComputer {
    /// Create a new class change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ClassChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for ClassChangeComputer {
    type ChangeSet = ClassChanges;

    fn compute(&self, left: &SaveFile, right: &SaveFile) -> ClassChanges {
        let left_names: HashSet<&str> = left.classes.iter().map(|c| c.name.as_str()).collect();
        let right_names: HashSet<&str> = right.classes.iter().map(|c| c.name.as_str()).collect();

        let mut added: Vec<String> = right_names
            .difference(&left_names)
            .map(|name| (*name).to_string())
            .collect();
        let mut dropped: Vec<String> = left_names
            .difference(&right_names)
            .map(|name| (*name).to_string())
            .collect();
        added.sort();
        dropped.sort();

        ClassChanges { added, dropped }
    }

    fn name(&self) -> &str {
        "ClassChangeComputer"
    }
}
