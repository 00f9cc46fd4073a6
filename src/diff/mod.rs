//! Structural diff engine for datamap save files.
//!
//! # Architecture
//!
//! The diff system is built on traits for extensibility:
//!
//! - [`ChangeComputer`](traits::ChangeComputer): Trait for computing specific types of changes
//! - Individual change computers in the [`changes`] module
//! - The attribute comparison table in [`attributes`]
//!
//! # Example
//!
//! ```ignore
//! use datamap_tools::diff::DiffEngine;
//!
//! let engine = DiffEngine::new().extended_attributes(true);
//! let outcome = engine.diff(&left, &right);
//! if let Some(result) = outcome.result() {
//!     println!("{} changes", result.summary.total_changes);
//! }
//! ```

pub mod attributes;
pub mod changes;
mod engine;
mod engine_config;
mod result;
pub mod traits;

pub use attributes::{
    AttributeChange, AttributeDelta, AttributeRule, AttributeValue, ComparisonRule,
    FieldAttribute, COMPARED_ATTRIBUTES, EXTENDED_ATTRIBUTES,
};
pub use engine::{DiffEngine, DiffOptions};
pub use result::{
    ClassChanges, ClassFieldChanges, DiffOutcome, DiffResult, DiffSummary, FieldAlteration,
    FieldMove, FieldPosition, SnapshotInfo,
};
pub use traits::ChangeComputer;
