//! Archive command handler.

use crate::archive::{read_archive_entries, write_archive};
use crate::config::{ArchiveConfig, Validatable};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Bundle `inputs` into the configured archive.
pub fn run_archive(inputs: &[PathBuf], config: &ArchiveConfig, quiet: bool) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid archive settings: {}", joined.join("; "));
    }

    let stats = write_archive(&config.output_file, inputs, &config.to_options())
        .with_context(|| format!("Failed to write {}", config.output_file.display()))?;

    if !quiet {
        tracing::info!(
            "Archived {} files: {} bytes -> {} bytes",
            stats.entries,
            stats.tar_bytes,
            stats.compressed_bytes
        );
    }
    Ok(exit_codes::SUCCESS)
}

/// Print the entry names of each archive, one per line.
pub fn run_archive_list(archives: &[PathBuf], quiet: bool) -> Result<i32> {
    let mut out = String::new();
    for path in archives {
        let names = read_archive_entries(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if archives.len() > 1 {
            writeln!(out, "{}:", path.display())?;
        }
        for name in names {
            writeln!(out, "{name}")?;
        }
    }
    write_output(&out, &OutputTarget::Stdout, quiet)?;
    Ok(exit_codes::SUCCESS)
}
