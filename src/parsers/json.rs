//! JSON save file decoder.

use super::traits::{DocumentDecoder, ParseError};
use super::FileFormat;
use serde_json::Value;

/// Decoder for `.json` save files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decode a JSON document held in memory.
    pub fn decode_str(&self, content: &str) -> Result<Value, ParseError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl DocumentDecoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Value, ParseError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn format(&self) -> FileFormat {
        FileFormat::Json
    }
}
