//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two save files.

use crate::config::DiffConfig;
use crate::diff::DiffOutcome;
use crate::pipeline::{compute_diff, exit_codes, load_save_file_with_context, output_report};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let left = load_save_file_with_context(&config.paths.left, quiet)?;
    let right = load_save_file_with_context(&config.paths.right, quiet)?;

    let outcome = compute_diff(&config, left.save(), right.save());
    let exit_code = determine_exit_code(&config, &outcome);

    output_report(&config, &outcome)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on the outcome and config flags.
fn determine_exit_code(config: &DiffConfig, outcome: &DiffOutcome) -> i32 {
    if config.behavior.fail_on_change && outcome.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::diff::{ClassChanges, DiffResult, SnapshotInfo};
    use std::path::PathBuf;

    fn config(fail_on_change: bool) -> DiffConfig {
        DiffConfigBuilder::new()
            .left_path(PathBuf::from("a.json"))
            .right_path(PathBuf::from("b.json"))
            .fail_on_change(fail_on_change)
            .build()
            .unwrap()
    }

    fn info(version: &str) -> SnapshotInfo {
        SnapshotInfo {
            game_name: "hl2".to_string(),
            game_version: version.to_string(),
            class_count: 1,
            field_count: 0,
        }
    }

    #[test]
    fn test_exit_code_without_changes() {
        let outcome = DiffOutcome::Compared(DiffResult::new(info("1"), info("2")));
        assert_eq!(determine_exit_code(&config(true), &outcome), exit_codes::SUCCESS);

        let identical = DiffOutcome::Identical {
            identity: "hl2 (1)".to_string(),
        };
        assert_eq!(determine_exit_code(&config(true), &identical), exit_codes::SUCCESS);
    }

    #[test]
    fn test_exit_code_with_changes() {
        let mut result = DiffResult::new(info("1"), info("2"));
        result.classes = ClassChanges {
            added: vec!["Weapon".to_string()],
            dropped: vec![],
        };
        let outcome = DiffOutcome::Compared(result);
        assert_eq!(
            determine_exit_code(&config(true), &outcome),
            exit_codes::CHANGES_DETECTED
        );
        assert_eq!(determine_exit_code(&config(false), &outcome), exit_codes::SUCCESS);
    }
}
