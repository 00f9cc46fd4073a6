//! Diff result types.

use super::attributes::AttributeChange;
use crate::model::{FieldRecord, SaveFile};
use serde::{Deserialize, Serialize};

/// Outcome of comparing two save files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DiffOutcome {
    /// Both inputs carry the same game name and version; nothing was compared
    Identical { identity: String },
    /// Structural comparison ran
    Compared(DiffResult),
}

impl DiffOutcome {
    /// Get the comparison result, if one was computed.
    #[must_use]
    pub const fn result(&self) -> Option<&DiffResult> {
        match self {
            Self::Identical { .. } => None,
            Self::Compared(result) => Some(result),
        }
    }

    #[must_use]
    pub const fn is_identical(&self) -> bool {
        matches!(self, Self::Identical { .. })
    }

    /// Whether any difference was found.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.result().is_some_and(DiffResult::has_changes)
    }
}

/// Provenance and size of one compared snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub game_name: String,
    pub game_version: String,
    pub class_count: usize,
    pub field_count: usize,
}

impl SnapshotInfo {
    /// Provenance label, `"<game_name> (<game_version>)"`.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{} ({})", self.game_name, self.game_version)
    }
}

impl From<&SaveFile> for SnapshotInfo {
    fn from(save: &SaveFile) -> Self {
        Self {
            game_name: save.game_name.clone(),
            game_version: save.game_version.clone(),
            class_count: save.class_count(),
            field_count: save.field_count(),
        }
    }
}

/// Class-set differences, each list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassChanges {
    pub added: Vec<String>,
    pub dropped: Vec<String>,
}

impl ClassChanges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when both snapshots declare the same class names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.dropped.is_empty()
    }
}

/// A field and where it sits in its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPosition {
    pub name: String,
    pub offset: u64,
}

impl From<&FieldRecord> for FieldPosition {
    fn from(field: &FieldRecord) -> Self {
        Self {
            name: field.name.clone(),
            offset: field.offset,
        }
    }
}

/// A field whose relative position changed between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMove {
    pub name: String,
    pub from_offset: u64,
    pub to_offset: u64,
}

/// Attribute findings on a field present in both snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAlteration {
    pub name: String,
    /// Offset on the left side
    pub offset: u64,
    pub changes: Vec<AttributeChange>,
}

/// Field-level findings for one class present in both snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassFieldChanges {
    pub class_name: String,
    /// Sorted by right-side `(offset, name)`
    pub added: Vec<FieldPosition>,
    /// Sorted by left-side `(offset, name)`
    pub dropped: Vec<FieldPosition>,
    /// Sorted by left-side `(offset, name)`
    pub moved: Vec<FieldMove>,
    /// Sorted by left-side `(offset, name)`
    pub altered: Vec<FieldAlteration>,
}

impl ClassFieldChanges {
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.dropped.is_empty()
            && self.moved.is_empty()
            && self.altered.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.dropped.len() + self.moved.len() + self.altered.len()
    }
}

/// Summary statistics for a diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub classes_added: usize,
    pub classes_dropped: usize,
    /// Shared classes with at least one field finding
    pub classes_changed: usize,
    pub fields_added: usize,
    pub fields_dropped: usize,
    pub fields_moved: usize,
    pub fields_altered: usize,
    pub total_changes: usize,
}

/// Result of a structural comparison between two save files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    pub left: SnapshotInfo,
    pub right: SnapshotInfo,
    pub classes: ClassChanges,
    /// One entry per shared class with findings, sorted by class name
    pub fields: Vec<ClassFieldChanges>,
    pub summary: DiffSummary,
}

impl DiffResult {
    /// Create an empty result for the given pair of snapshots.
    #[must_use]
    pub fn new(left: SnapshotInfo, right: SnapshotInfo) -> Self {
        Self {
            left,
            right,
            classes: ClassChanges::new(),
            fields: Vec::new(),
            summary: DiffSummary::default(),
        }
    }

    /// Recompute the summary from the collected findings.
    pub fn calculate_summary(&mut self) {
        let mut summary = DiffSummary {
            classes_added: self.classes.added.len(),
            classes_dropped: self.classes.dropped.len(),
            classes_changed: self.fields.len(),
            ..DiffSummary::default()
        };
        for class in &self.fields {
            summary.fields_added += class.added.len();
            summary.fields_dropped += class.dropped.len();
            summary.fields_moved += class.moved.len();
            summary.fields_altered += class.altered.len();
        }
        summary.total_changes = summary.classes_added
            + summary.classes_dropped
            + summary.fields_added
            + summary.fields_dropped
            + summary.fields_moved
            + summary.fields_altered;
        self.summary = summary;
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.classes.is_empty() || self.fields.iter().any(|c| !c.is_empty())
    }

    /// Field findings for a class, if it has any.
    #[must_use]
    pub fn class_changes(&self, class_name: &str) -> Option<&ClassFieldChanges> {
        self.fields.iter().find(|c| c.class_name == class_name)
    }
}
