//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ArchiveConfig};
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".datamap-tools.yaml",
    ".datamap-tools.yml",
    "datamap-tools.yaml",
    "datamap-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/datamap-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(dir) = user_config_dir()
        && let Some(path) = find_config_in_dir(&dir)
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Per-user configuration directory (`~/.config/datamap-tools` on Linux).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("datamap-tools"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults are taken from `other`, so
    /// CLI flags left unset do not clobber file settings.
    pub fn merge(&mut self, other: &Self) {
        if other.diff.classes_only {
            self.diff.classes_only = true;
        }
        if other.diff.extended_attributes {
            self.diff.extended_attributes = true;
        }

        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }

        let defaults = ArchiveConfig::default();
        if other.archive.output_file != defaults.output_file {
            self.archive.output_file.clone_from(&other.archive.output_file);
        }
        if other.archive.quality != defaults.quality {
            self.archive.quality = other.archive.quality;
        }
        if other.archive.window != defaults.window {
            self.archive.window = other.archive.window;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from a base configuration.
#[must_use]
pub fn generate_example_config(base: &AppConfig) -> String {
    format!(
        r"# Datamap Tools Configuration
# Place this file at .datamap-tools.yaml in your project root or ~/.config/datamap-tools/

{}",
        serde_yaml::to_string(base).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Datamap Tools Configuration File
# ================================
#
# Place it at:
#   - .datamap-tools.yaml in your project root
#   - ~/.config/datamap-tools/datamap-tools.yaml for global config
#
# CLI arguments always override file settings.

# What the diff compares
diff:
  # Only compare class sets, skip field comparison
  classes_only: false
  # Also compare external_name, override_count and float_tolerance
  extended_attributes: false

# Output configuration
output:
  # Format: text, summary, json
  format: text
  # Output file path (omit for stdout)
  # file: datamap-diff.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Suppress non-essential output
  quiet: false

# Archive bundling
archive:
  output_file: datamap_collections.tar.br
  # Brotli quality (0-11)
  quality: 11
  # Brotli window as log2 bytes (10-24)
  window: 22
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".datamap-tools.yaml");
        std::fs::write(&config_path, "diff:\n  classes_only: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_prefers_hidden_yaml() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("datamap-tools.yml"), "").unwrap();
        let hidden = tmp.path().join(".datamap-tools.yaml");
        std::fs::write(&hidden, "").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(hidden));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
diff:
  extended_attributes: true
output:
  format: json
behavior:
  fail_on_change: true
archive:
  quality: 5
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.diff.extended_attributes);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.archive.quality, 5);
        assert_eq!(config.archive.window, 22);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "output:\n  format: sarif\n").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .output_format(ReportFormat::Summary)
            .archive_window(20)
            .build();
        let overrides = AppConfig::builder()
            .classes_only(true)
            .fail_on_change(true)
            .archive_quality(3)
            .build();

        base.merge(&overrides);

        assert!(base.diff.classes_only);
        assert!(base.behavior.fail_on_change);
        assert_eq!(base.output.format, ReportFormat::Summary);
        assert_eq!(base.archive.quality, 3);
        assert_eq!(base.archive.window, 20);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config(&AppConfig::default());
        assert!(example.contains("archive:"));
        assert!(example.contains("classes_only"));

        let body: String = example
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: AppConfig = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_full_example_config_parses_to_defaults() {
        let parsed: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "diff:\n  classes_only: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
