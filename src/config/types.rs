//! Configuration types for datamap-tools operations.
//!
//! Provides structured configuration for diff and archive operations.

use crate::archive::{ArchiveOptions, DEFAULT_ARCHIVE_NAME, DEFAULT_QUALITY, DEFAULT_WINDOW};
use crate::diff::DiffOptions;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct that aggregates all configuration
/// options. It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison settings
    pub diff: ComparisonConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Archive bundling settings
    pub archive: ArchiveConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Compare class sets only.
    pub const fn classes_only(mut self, enabled: bool) -> Self {
        self.config.diff.classes_only = enabled;
        self
    }

    /// Compare the extended attribute set.
    pub const fn extended_attributes(mut self, enabled: bool) -> Self {
        self.config.diff.extended_attributes = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the archive output file.
    pub fn archive_file(mut self, file: PathBuf) -> Self {
        self.config.archive.output_file = file;
        self
    }

    /// Set the brotli quality.
    pub const fn archive_quality(mut self, quality: u32) -> Self {
        self.config.archive.quality = quality;
        self
    }

    /// Set the brotli window.
    pub const fn archive_window(mut self, window: u32) -> Self {
        self.config.archive.window = window;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// What the diff engine compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Only compare class sets, skip field comparison
    pub classes_only: bool,
    /// Also compare external_name, override_count and float_tolerance
    pub extended_attributes: bool,
}

impl ComparisonConfig {
    /// Engine options for these settings.
    #[must_use]
    pub const fn to_options(&self) -> DiffOptions {
        DiffOptions {
            classes_only: self.classes_only,
            extended_attributes: self.extended_attributes,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Archive bundling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Archive file to write
    pub output_file: PathBuf,
    /// Brotli quality (0-11)
    pub quality: u32,
    /// Brotli window size as log2 bytes (10-24)
    pub window: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_ARCHIVE_NAME),
            quality: DEFAULT_QUALITY,
            window: DEFAULT_WINDOW,
        }
    }
}

impl ArchiveConfig {
    /// Compression options for these settings.
    #[must_use]
    pub const fn to_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            quality: self.quality,
            window: self.window,
        }
    }
}

// ============================================================================
// Command Configuration Types
// ============================================================================

/// Configuration for a diff run
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Comparison settings
    pub comparison: ComparisonConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for a diff run
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Baseline save file
    pub left: PathBuf,
    /// Save file compared against the baseline
    pub right: PathBuf,
}

impl DiffConfig {
    /// Build a diff config from merged application settings.
    #[must_use]
    pub fn from_app(app: &AppConfig, left: PathBuf, right: PathBuf) -> Self {
        Self {
            paths: DiffPaths { left, right },
            comparison: app.diff,
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`
#[derive(Debug, Default)]
pub struct DiffConfigBuilder {
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    comparison: ComparisonConfig,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl DiffConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn left_path(mut self, path: PathBuf) -> Self {
        self.left = Some(path);
        self
    }

    #[must_use]
    pub fn right_path(mut self, path: PathBuf) -> Self {
        self.right = Some(path);
        self
    }

    #[must_use]
    pub const fn classes_only(mut self, enabled: bool) -> Self {
        self.comparison.classes_only = enabled;
        self
    }

    #[must_use]
    pub const fn extended_attributes(mut self, enabled: bool) -> Self {
        self.comparison.extended_attributes = enabled;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.output.file = file;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<DiffConfig> {
        let left = self.left.ok_or_else(|| anyhow::anyhow!("left path is required"))?;
        let right = self.right.ok_or_else(|| anyhow::anyhow!("right path is required"))?;

        Ok(DiffConfig {
            paths: DiffPaths { left, right },
            comparison: self.comparison,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
