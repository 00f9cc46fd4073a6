//! Report output stage.

use super::{should_use_color, write_output, OutputTarget, PipelineError};
use crate::config::DiffConfig;
use crate::diff::DiffOutcome;
use crate::reports::{create_reporter_with_options, ReportConfig};

/// Render a diff outcome in the configured format.
pub fn render_report(config: &DiffConfig, outcome: &DiffOutcome) -> Result<String, PipelineError> {
    let report_config = ReportConfig::for_paths(
        config.paths.left.display().to_string(),
        config.paths.right.display().to_string(),
    );

    // Colors only make sense on a terminal-bound stream
    let use_color = config.output.file.is_none() && should_use_color(config.output.no_color);
    let reporter = create_reporter_with_options(config.output.format, use_color);
    reporter
        .generate_diff_report(outcome, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })
}

/// Output a diff report to the configured destination.
pub fn output_report(config: &DiffConfig, outcome: &DiffOutcome) -> Result<(), PipelineError> {
    let report = render_report(config, outcome)?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&report, &target, config.behavior.quiet)
        .map_err(|source| PipelineError::ReportFailed { source })
}
