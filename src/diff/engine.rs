//! Structural diff engine implementation.

use super::changes::{ClassChangeComputer, FieldChangeComputer};
pub use super::engine_config::DiffOptions;
use super::traits::ChangeComputer;
use super::{DiffOutcome, DiffResult, SnapshotInfo};
use crate::model::SaveFile;

/// Structural diff engine for comparing save files.
///
/// The engine is total: every pair of valid save files yields an outcome.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once
    #[must_use]
    pub const fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Only compare class sets
    #[must_use]
    pub const fn classes_only(mut self, enabled: bool) -> Self {
        self.options.classes_only = enabled;
        self
    }

    /// Also compare the extended attribute set
    #[must_use]
    pub const fn extended_attributes(mut self, enabled: bool) -> Self {
        self.options.extended_attributes = enabled;
        self
    }

    /// Get the engine options.
    #[must_use]
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare two save files.
    ///
    /// Inputs with the same game name and version are reported as identical
    /// without running any comparison.
    #[must_use]
    pub fn diff(&self, left: &SaveFile, right: &SaveFile) -> DiffOutcome {
        let identity = left.identity();
        if identity == right.identity() {
            tracing::info!("Both inputs are '{}', skipping comparison", identity);
            return DiffOutcome::Identical { identity };
        }

        let mut result = DiffResult::new(SnapshotInfo::from(left), SnapshotInfo::from(right));

        let class_computer = ClassChangeComputer::new();
        result.classes = class_computer.compute(left, right);
        tracing::debug!(
            "{}: {} added, {} dropped",
            class_computer.name(),
            result.classes.added.len(),
            result.classes.dropped.len()
        );

        if self.options.classes_only {
            tracing::debug!("Field comparison disabled");
        } else {
            let field_computer = FieldChangeComputer::with_rules(self.options.attribute_rules());
            result.fields = field_computer.compute(left, right);
            tracing::debug!(
                "{}: {} classes with findings",
                field_computer.name(),
                result.fields.len()
            );
        }

        result.calculate_summary();
        DiffOutcome::Compared(result)
    }
}
