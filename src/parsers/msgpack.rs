//! MessagePack save file decoder.
//!
//! MessagePack documents are decoded straight into a `serde_json::Value`, so
//! the schema validator sees the same tree regardless of encoding. Binary
//! blobs and non-string map keys have no JSON counterpart and fail to decode.

use super::traits::{DocumentDecoder, ParseError};
use super::FileFormat;
use serde_json::Value;

/// Decoder for `.msgpack` save files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackDecoder;

impl MessagePackDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for MessagePackDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Value, ParseError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    fn format(&self) -> FileFormat {
        FileFormat::MessagePack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_named_map() {
        let doc = json!({"game_name": "hl2", "chicago_version": 2, "datamaps": [{"name": "CBaseEntity"}]});
        let bytes = rmp_serde::to_vec_named(&doc).unwrap();

        let value = MessagePackDecoder::new().decode(&bytes).unwrap();
        assert_eq!(value, doc);
    }

    #[test]
    fn test_truncated_input() {
        let doc = json!({"game_name": "hl2"});
        let bytes = rmp_serde::to_vec_named(&doc).unwrap();

        let err = MessagePackDecoder::new()
            .decode(&bytes[..bytes.len() - 2])
            .unwrap_err();
        assert!(matches!(err, ParseError::MessagePackError(_)));
    }
}
