//! Save file loading stage.

use super::PipelineError;
use crate::model::{ResolveMode, SaveFile};
use crate::parsers::{load_save_file_with, FileFormat};
use std::path::{Path, PathBuf};

/// A validated save file together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSaveFile {
    pub path: PathBuf,
    pub format: FileFormat,
    pub save: SaveFile,
}

impl LoadedSaveFile {
    /// Get a reference to the save file
    #[must_use]
    pub const fn save(&self) -> &SaveFile {
        &self.save
    }
}

/// Load and validate a save file, attaching the path to any failure.
pub fn load_save_file_with_context(
    path: &Path,
    quiet: bool,
) -> Result<LoadedSaveFile, PipelineError> {
    let load_failed = |source| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source,
    };

    let format = FileFormat::from_path(path).map_err(load_failed)?;
    if !quiet {
        tracing::info!("Loading {} save file: {}", format, path.display());
    }

    let save = load_save_file_with(path, ResolveMode::Resolve).map_err(load_failed)?;

    if !quiet {
        tracing::info!(
            "Loaded '{}': {} classes, {} fields",
            save.identity(),
            save.class_count(),
            save.field_count()
        );
    }

    Ok(LoadedSaveFile {
        path: path.to_path_buf(),
        format,
        save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = load_save_file_with_context(Path::new("left.yaml"), true).unwrap_err();
        let PipelineError::LoadFailed { path, source } = err else {
            panic!("expected LoadFailed");
        };
        assert_eq!(path, "left.yaml");
        assert!(matches!(source, crate::parsers::ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hl2.json");
        std::fs::write(
            &path,
            r#"{"chicago_version": 2, "game_name": "hl2", "game_version": "1", "datamaps": [
                {"name": "CBaseEntity", "module": "server.dll", "module_offset": 0,
                 "base_map": null, "fields": []}
            ]}"#,
        )
        .unwrap();

        let loaded = load_save_file_with_context(&path, true).unwrap();
        assert_eq!(loaded.format, FileFormat::Json);
        assert_eq!(loaded.save().identity(), "hl2 (1)");
    }
}
