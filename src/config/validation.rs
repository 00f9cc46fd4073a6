//! Configuration validation for datamap-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, ArchiveConfig, BehaviorConfig, ComparisonConfig, OutputConfig};
use crate::archive::{QUALITY_RANGE, WINDOW_RANGE};
use crate::reports::ReportFormat;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.archive.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.classes_only && self.extended_attributes {
            errors.push(ConfigError::new(
                "diff.extended_attributes",
                "Has no effect when 'classes_only' is set",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            check_parent_exists("output.file", file_path, &mut errors);
            if self.format == ReportFormat::Json
                && file_path
                    .extension()
                    .is_some_and(|ext| !ext.eq_ignore_ascii_case("json"))
            {
                errors.push(ConfigError::new(
                    "output.file",
                    format!(
                        "JSON report written to a file without a .json extension: {}",
                        file_path.display()
                    ),
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Boolean flags only
        Vec::new()
    }
}

impl Validatable for ArchiveConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !QUALITY_RANGE.contains(&self.quality) {
            errors.push(ConfigError::new(
                "archive.quality",
                format!(
                    "Quality must be between {} and {}, got {}",
                    QUALITY_RANGE.start(),
                    QUALITY_RANGE.end(),
                    self.quality
                ),
            ));
        }
        if !WINDOW_RANGE.contains(&self.window) {
            errors.push(ConfigError::new(
                "archive.window",
                format!(
                    "Window must be between {} and {}, got {}",
                    WINDOW_RANGE.start(),
                    WINDOW_RANGE.end(),
                    self.window
                ),
            ));
        }
        if self.output_file.as_os_str().is_empty() {
            errors.push(ConfigError::new("archive.output_file", "Must not be empty"));
        } else {
            check_parent_exists("archive.output_file", &self.output_file, &mut errors);
        }

        errors
    }
}

fn check_parent_exists(field: &str, path: &Path, errors: &mut Vec<ConfigError>) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        errors.push(ConfigError::new(
            field,
            format!("Parent directory does not exist: {}", parent.display()),
        ));
    }
}
