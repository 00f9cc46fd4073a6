//! Bundling of save files into a brotli-compressed tar archive.
//!
//! The tar stream is built in memory with one regular-file entry per input,
//! named by the input's base name and carrying its modification time.
//! Symlinked inputs are stored as the file they point to.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use thiserror::Error;

/// Default output file name.
pub const DEFAULT_ARCHIVE_NAME: &str = "datamap_collections.tar.br";

/// Default brotli quality (maximum).
pub const DEFAULT_QUALITY: u32 = 11;

/// Default brotli window size, as log2 of the window in bytes.
pub const DEFAULT_WINDOW: u32 = 22;

pub const QUALITY_RANGE: std::ops::RangeInclusive<u32> = 0..=11;
pub const WINDOW_RANGE: std::ops::RangeInclusive<u32> = 10..=24;

const BUFFER_SIZE: usize = 64 * 1024;

/// Errors that can occur while writing or reading an archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No input files given")]
    NoInputs,

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Two inputs share the entry name '{0}'")]
    DuplicateEntry(String),

    #[error("Invalid brotli quality {0} (expected 0..=11)")]
    InvalidQuality(u32),

    #[error("Invalid brotli window {0} (expected 10..=24)")]
    InvalidWindow(u32),
}

impl ArchiveError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Brotli settings for [`write_archive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub quality: u32,
    pub window: u32,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            window: DEFAULT_WINDOW,
        }
    }
}

impl ArchiveOptions {
    /// Check the settings are within brotli's accepted ranges.
    pub fn validate(&self) -> Result<(), ArchiveError> {
        if !QUALITY_RANGE.contains(&self.quality) {
            return Err(ArchiveError::InvalidQuality(self.quality));
        }
        if !WINDOW_RANGE.contains(&self.window) {
            return Err(ArchiveError::InvalidWindow(self.window));
        }
        Ok(())
    }
}

/// Sizes of a written archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    pub entries: usize,
    pub tar_bytes: usize,
    pub compressed_bytes: usize,
}

/// Bundle `inputs` into a brotli-compressed tar at `out`.
pub fn write_archive(
    out: &Path,
    inputs: &[PathBuf],
    options: &ArchiveOptions,
) -> Result<ArchiveStats, ArchiveError> {
    options.validate()?;
    if inputs.is_empty() {
        return Err(ArchiveError::NoInputs);
    }

    tracing::info!("Creating in-memory tar of {} files", inputs.len());
    let mut builder = tar::Builder::new(Vec::new());
    let mut names = HashSet::new();
    for input in inputs {
        let name = entry_name(input)?;
        if !names.insert(name.clone()) {
            return Err(ArchiveError::DuplicateEntry(name));
        }
        tracing::debug!("Adding '{}' as '{}'", input.display(), name);
        append_file(&mut builder, input, &name)?;
    }
    let tar_bytes = builder
        .into_inner()
        .map_err(|e| ArchiveError::io(out, e))?;

    tracing::info!(
        "Compressing {} bytes (quality {}, window {})",
        tar_bytes.len(),
        options.quality,
        options.window
    );
    let compressed = compress(&tar_bytes, options).map_err(|e| ArchiveError::io(out, e))?;

    std::fs::write(out, &compressed).map_err(|e| ArchiveError::io(out, e))?;
    tracing::info!("Wrote {} ({} bytes)", out.display(), compressed.len());

    Ok(ArchiveStats {
        entries: inputs.len(),
        tar_bytes: tar_bytes.len(),
        compressed_bytes: compressed.len(),
    })
}

/// List entry names of an archive written by [`write_archive`].
pub fn read_archive_entries(path: &Path) -> Result<Vec<String>, ArchiveError> {
    let file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
    let mut archive = tar::Archive::new(brotli::Decompressor::new(file, BUFFER_SIZE));

    let mut names = Vec::new();
    for entry in archive.entries().map_err(|e| ArchiveError::io(path, e))? {
        let entry = entry.map_err(|e| ArchiveError::io(path, e))?;
        let entry_path = entry.path().map_err(|e| ArchiveError::io(path, e))?;
        names.push(entry_path.to_string_lossy().into_owned());
    }
    Ok(names)
}

fn entry_name(input: &Path) -> Result<String, ArchiveError> {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ArchiveError::NotAFile(input.to_path_buf()))
}

fn append_file(
    builder: &mut tar::Builder<Vec<u8>>,
    input: &Path,
    name: &str,
) -> Result<(), ArchiveError> {
    // `metadata` follows symlinks
    let metadata = std::fs::metadata(input).map_err(|e| ArchiveError::io(input, e))?;
    if !metadata.is_file() {
        return Err(ArchiveError::NotAFile(input.to_path_buf()));
    }
    let mtime = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs());

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mtime(mtime);
    header.set_mode(0o644);

    let mut file = File::open(input).map_err(|e| ArchiveError::io(input, e))?;
    let mut content = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut content)
        .map_err(|e| ArchiveError::io(input, e))?;
    header.set_size(content.len() as u64);

    builder
        .append_data(&mut header, name, content.as_slice())
        .map_err(|e| ArchiveError::io(input, e))
}

fn compress(data: &[u8], options: &ArchiveOptions) -> io::Result<Vec<u8>> {
    let mut writer = brotli::CompressorWriter::new(
        Vec::with_capacity(data.len() / 4),
        BUFFER_SIZE,
        options.quality,
        options.window,
    );
    writer.write_all(data)?;
    Ok(writer.into_inner())
}
