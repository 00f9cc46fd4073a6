//! Diff computation stage.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffOutcome};
use crate::model::SaveFile;

/// Compare two loaded save files using the configured options.
#[must_use]
pub fn compute_diff(config: &DiffConfig, left: &SaveFile, right: &SaveFile) -> DiffOutcome {
    let quiet = config.behavior.quiet;
    if !quiet {
        tracing::info!("Computing diff...");
    }

    let engine = DiffEngine::new().with_options(config.comparison.to_options());
    let outcome = engine.diff(left, right);

    if !quiet && let Some(result) = outcome.result() {
        tracing::info!(
            "Diff complete: {} changes across {} classes",
            result.summary.total_changes,
            result.summary.classes_changed
        );
    }

    outcome
}
