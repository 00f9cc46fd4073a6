//! Save file loading and validation.
//!
//! Save files come in two encodings that share one document shape:
//! - `.json`, decoded with `serde_json`
//! - `.msgpack`, decoded with `rmp-serde`
//!
//! The encoding is chosen from the file extension alone. The decoded document
//! is then checked by the [`schema`] validator, which also builds the
//! [`SaveFile`] record model.
//!
//! ## Usage
//!
//! ```no_run
//! use datamap_tools::parsers::load_save_file;
//! use std::path::Path;
//!
//! let save = load_save_file(Path::new("hl2.json")).unwrap();
//! println!("{} classes in {}", save.class_count(), save.identity());
//! ```

mod detection;
mod json;
mod msgpack;
pub mod schema;
mod traits;

pub use detection::FileFormat;
pub use json::JsonDecoder;
pub use msgpack::MessagePackDecoder;
pub use schema::{validate, validate_with};
pub use traits::{DocumentDecoder, ParseError};

use crate::model::{ResolveMode, SaveFile};
use serde_json::Value;
use std::path::Path;

/// Maximum save file size (256 MB).
const MAX_SAVE_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Read and decode a save file without validating it.
///
/// The extension is checked before the file is opened, so an unsupported
/// path fails with [`ParseError::UnsupportedFormat`] even if it does not exist.
pub fn load_document(path: &Path) -> Result<Value, ParseError> {
    let format = FileFormat::from_path(path)?;
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_SAVE_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "save file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_SAVE_FILE_SIZE / (1024 * 1024),
        )));
    }

    tracing::debug!("Decoding {} as {}", path.display(), format);
    format.decoder().decode_file(path)
}

/// Load, validate and build a save file with references resolved.
pub fn load_save_file(path: &Path) -> Result<SaveFile, ParseError> {
    load_save_file_with(path, ResolveMode::Resolve)
}

/// Load, validate and build a save file using the given resolve mode.
pub fn load_save_file_with(path: &Path, mode: ResolveMode) -> Result<SaveFile, ParseError> {
    let document = load_document(path)?;
    validate_with(&document, mode)
}

/// Parse a save file from an in-memory JSON string.
pub fn parse_save_file_str(content: &str) -> Result<SaveFile, ParseError> {
    let document = JsonDecoder::new().decode_str(content)?;
    validate(&document)
}
