//! Validate command handler.
//!
//! Loads and validates each save file, printing one line per file.

use crate::pipeline::{exit_codes, load_save_file_with_context, write_output, OutputTarget};
use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Result of validating one file.
#[derive(Debug)]
pub struct FileVerdict {
    pub path: PathBuf,
    /// `Ok(summary)` or `Err(reason)`
    pub verdict: std::result::Result<String, String>,
}

impl std::fmt::Display for FileVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.verdict {
            Ok(summary) => write!(f, "OK    {}: {summary}", self.path.display()),
            Err(reason) => write!(f, "FAIL  {}: {reason}", self.path.display()),
        }
    }
}

/// Validate every file in `paths`.
///
/// Every file is checked even after a failure. Returns
/// [`exit_codes::ERROR`] if any file was rejected.
pub fn run_validate(paths: &[PathBuf], quiet: bool) -> Result<i32> {
    let verdicts: Vec<FileVerdict> = paths.iter().map(|p| validate_one(p, quiet)).collect();

    let mut out = String::new();
    for verdict in &verdicts {
        writeln!(out, "{verdict}")?;
    }
    write_output(&out, &OutputTarget::Stdout, quiet)?;

    let failed = verdicts.iter().filter(|v| v.verdict.is_err()).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} files failed validation", verdicts.len());
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

fn validate_one(path: &Path, quiet: bool) -> FileVerdict {
    let verdict = load_save_file_with_context(path, quiet)
        .map(|loaded| {
            let save = loaded.save();
            format!(
                "{} ({} classes, {} fields)",
                save.identity(),
                save.class_count(),
                save.field_count()
            )
        })
        .map_err(|e| match e {
            crate::pipeline::PipelineError::LoadFailed { source, .. } => source.to_string(),
            other => other.to_string(),
        });
    FileVerdict {
        path: path.to_path_buf(),
        verdict,
    }
}
