//! Named presets for common use cases.

use super::types::{AppConfig, BehaviorConfig, ComparisonConfig, OutputConfig};
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default settings: full field comparison, text output
    Default,
    /// CI: JSON output, no colors, fail on change
    CiCd,
    /// Thorough: compare the extended attribute set
    Thorough,
    /// Quick: class sets only, summary output
    Quick,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
            Self::Thorough => "thorough",
            Self::Quick => "quick",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            "thorough" | "full" | "extended" => Some(Self::Thorough),
            "quick" | "classes" => Some(Self::Quick),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Field comparison with the standard attribute set",
            Self::CiCd => "Machine-readable output that fails the build on any change",
            Self::Thorough => "Also compares external names, override counts and tolerances",
            Self::Quick => "Compares class sets only and prints a summary",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd, Self::Thorough, Self::Quick]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
            ConfigPreset::Thorough => Self::thorough_preset(),
            ConfigPreset::Quick => Self::quick_preset(),
        }
    }

    /// CI/CD preset.
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                quiet: true,
            },
            ..Self::default()
        }
    }

    /// Extended attribute comparison.
    #[must_use]
    pub fn thorough_preset() -> Self {
        Self {
            diff: ComparisonConfig {
                classes_only: false,
                extended_attributes: true,
            },
            ..Self::default()
        }
    }

    /// Class-level comparison with summary output.
    #[must_use]
    pub fn quick_preset() -> Self {
        Self {
            diff: ComparisonConfig {
                classes_only: true,
                extended_attributes: false,
            },
            output: OutputConfig {
                format: ReportFormat::Summary,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }
}
