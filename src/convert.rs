//! MessagePack to JSON transcoding.
//!
//! Conversion is a plain re-encoding of the document tree. No schema
//! validation is applied, so files the validator would reject still convert.

use crate::error::{DatamapError, ErrorContext, OptionContext, Result};
use crate::parsers::{DocumentDecoder, MessagePackDecoder};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Path of the JSON file written next to `path`.
#[must_use]
pub fn json_sibling(path: &Path) -> PathBuf {
    path.with_extension("json")
}

/// Decode a `.msgpack` file and write it as 4-space indented JSON next to it.
///
/// Returns the path written.
pub fn convert_to_json(path: &Path) -> Result<PathBuf> {
    tracing::info!("Loading '{}'", path.display());
    let document = MessagePackDecoder::new()
        .decode_file(path)
        .with_context(|| format!("decoding {}", path.display()))?;

    let target = Some(json_sibling(path))
        .filter(|target| target != path)
        .with_context_none(|| format!("{} already has a .json extension", path.display()))?;

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| DatamapError::validation(format!("Failed to encode JSON: {e}")))?;

    tracing::info!("Writing '{}'", target.display());
    std::fs::write(&target, out).map_err(|e| DatamapError::io(&target, e))?;
    Ok(target)
}
