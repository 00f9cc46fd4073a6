//! **Structural diff and tooling for reflection datamap save files.**
//!
//! A datamap save file is a snapshot of a program's reflection metadata: the
//! classes it declares, their base classes, and the typed fields each class
//! lays out at byte offsets. Snapshots taken from two builds of the same
//! program can be compared to find classes that appeared or vanished, fields
//! that were added, dropped or moved, and fields whose attributes changed.
//!
//! ## Core Modules
//!
//! - **[`model`]**: [`SaveFile`] and its class/field records. Classes live in
//!   an arena; base-class and embedded-class references resolve to indices of
//!   earlier classes.
//! - **[`parsers`]**: decoding of `.json` and `.msgpack` save files and the
//!   schema validator that builds the model.
//! - **[`diff`]**: the [`DiffEngine`], producing a [`DiffOutcome`].
//! - **[`reports`]**: text, summary and JSON renderings of an outcome.
//! - **[`convert`]** and **[`archive`]**: MessagePack to JSON transcoding and
//!   brotli-compressed tar bundling.
//! - **[`pipeline`]**, **[`config`]** and **[`cli`]**: the orchestration behind
//!   the `datamap-tools` binary.
//!
//! ## Diffing Two Save Files
//!
//! ```no_run
//! use std::path::Path;
//! use datamap_tools::{load_save_file, DiffEngine, DiffOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let left = load_save_file(Path::new("hl2_v1.json"))?;
//!     let right = load_save_file(Path::new("hl2_v2.msgpack"))?;
//!
//!     match DiffEngine::new().diff(&left, &right) {
//!         DiffOutcome::Identical { identity } => println!("{identity}: identical"),
//!         DiffOutcome::Compared(result) => {
//!             for name in &result.classes.added {
//!                 println!("+ {name}");
//!             }
//!             println!("{} changes", result.summary.total_changes);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a Report
//!
//! ```no_run
//! use std::path::Path;
//! use datamap_tools::reports::{create_reporter, ReportConfig, ReportFormat};
//! use datamap_tools::{load_save_file, DiffEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let left = load_save_file(Path::new("hl2_v1.json"))?;
//!     let right = load_save_file(Path::new("hl2_v2.json"))?;
//!     let outcome = DiffEngine::new().diff(&left, &right);
//!
//!     let reporter = create_reporter(ReportFormat::Summary);
//!     print!("{}", reporter.generate_diff_report(&outcome, &ReportConfig::default())?);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod archive;
pub mod cli;
pub mod config;
pub mod convert;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, DiffConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{DiffEngine, DiffOptions, DiffOutcome, DiffResult};
pub use error::{DatamapError, ErrorContext, OptionContext, Result};
pub use model::{ClassRecord, FieldRecord, FieldType, ResolveMode, SaveFile};
pub use parsers::{load_save_file, parse_save_file_str, FileFormat, ParseError};
pub use reports::{ReportFormat, ReportGenerator};
