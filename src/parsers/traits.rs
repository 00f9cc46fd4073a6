//! Decoder trait definitions and error types.
//!
//! This module defines the `DocumentDecoder` trait implemented by each
//! supported on-disk encoding, and the error type shared by the loader and
//! the schema validator.

use super::FileFormat;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a save file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported file format: {0} (expected .json or .msgpack)")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("MessagePack parse error: {0}")]
    MessagePackError(String),

    /// The decoded document violates the save file schema
    #[error("Schema violation at {path}: {message}")]
    Schema { path: String, message: String },
}

impl ParseError {
    /// Create a schema violation error for the given document path.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from schema validation rather than decoding.
    #[must_use]
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for ParseError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Self::MessagePackError(err.to_string())
    }
}

/// Trait for save file encodings.
///
/// A decoder turns raw bytes into a generic document tree. It performs no
/// schema checks; that is the validator's job.
pub trait DocumentDecoder {
    /// Decode raw bytes into a document tree.
    fn decode(&self, bytes: &[u8]) -> Result<Value, ParseError>;

    /// The encoding this decoder handles.
    fn format(&self) -> FileFormat;

    /// Read and decode a file.
    fn decode_file(&self, path: &Path) -> Result<Value, ParseError> {
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }
}
