//! Unified error types for datamap-tools.
//!
//! This module provides the top-level error hierarchy for the library,
//! with context chaining for user-facing messages.

use crate::parsers::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datamap-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DatamapError {
    /// Errors while loading or validating a save file
    #[error("Failed to load save file: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenient Result type for datamap-tools operations
pub type Result<T> = std::result::Result<T, DatamapError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DatamapError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from component error types
// ============================================================================

impl From<std::io::Error> for DatamapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ParseError> for DatamapError {
    fn from(err: ParseError) -> Self {
        Self::parse(String::new(), err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Each call prepends to the error's existing context, so the final message
/// reads outermost-first.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use datamap_tools::error::{ErrorContext, Result};
/// use datamap_tools::{load_save_file, SaveFile};
///
/// fn load(path: &Path) -> Result<SaveFile> {
///     load_save_file(path).with_context(|| format!("loading {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DatamapError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DatamapError, new_ctx: &str) -> DatamapError {
    match err {
        DatamapError::Parse {
            context: existing,
            source,
        } => DatamapError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DatamapError::Io {
            path,
            message,
            source,
        } => DatamapError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DatamapError::Validation(msg) => DatamapError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new`: `existing`", or just `new` when nothing was recorded yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| DatamapError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| DatamapError::Validation(f().into()))
    }
}
