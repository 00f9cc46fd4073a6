//! CLI command handlers.
//!
//! Testable handlers invoked by `main.rs`, one per subcommand. Each returns
//! the process exit code; `main` owns the call to `std::process::exit`.

mod archive;
mod convert;
mod diff;
mod validate;

pub use archive::{run_archive, run_archive_list};
pub use convert::run_convert;
pub use diff::run_diff;
pub use validate::run_validate;

// Re-export config types used by handlers
pub use crate::config::{ArchiveConfig, DiffConfig};
