//! Convert command handler.

use crate::convert::convert_to_json;
use crate::pipeline::exit_codes;
use anyhow::Result;
use std::path::PathBuf;

/// Convert each `.msgpack` file to a `.json` sibling.
///
/// Failures are logged and the remaining files still convert.
pub fn run_convert(paths: &[PathBuf], quiet: bool) -> Result<i32> {
    let mut failed = 0usize;
    for path in paths {
        match convert_to_json(path) {
            Ok(target) => {
                if !quiet {
                    tracing::info!("Converted {} -> {}", path.display(), target.display());
                }
            }
            Err(e) => {
                tracing::error!("{:#}", anyhow::Error::new(e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}
