//! File format selection by extension.

use super::traits::{DocumentDecoder, ParseError};
use super::{JsonDecoder, MessagePackDecoder};
use std::fmt;
use std::path::Path;

/// On-disk encoding of a save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Json,
    MessagePack,
}

impl FileFormat {
    /// Every supported encoding.
    pub const ALL: [Self; 2] = [Self::Json, Self::MessagePack];

    /// File extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    /// Look up a format from a bare extension, ignoring case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Select the format for a path.
    ///
    /// Fails with [`ParseError::UnsupportedFormat`] without touching the file
    /// when the extension is missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))
    }

    /// Decoder for this format.
    #[must_use]
    pub fn decoder(self) -> Box<dyn DocumentDecoder> {
        match self {
            Self::Json => Box::new(JsonDecoder::new()),
            Self::MessagePack => Box::new(MessagePackDecoder::new()),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::MessagePack => write!(f, "MessagePack"),
        }
    }
}
