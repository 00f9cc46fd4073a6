//! Pipeline orchestration for save file operations.
//!
//! Shared load → diff → report logic used by the CLI command handlers.

mod diff_stage;
mod load;
mod output;
mod report_stage;

pub use diff_stage::compute_diff;
pub use load::{load_save_file_with_context, LoadedSaveFile};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{output_report, render_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read, decode or validate a save file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: crate::parsers::ParseError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success (also returned with changes when `--fail-on-change` is off)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and `--fail-on-change` is set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
