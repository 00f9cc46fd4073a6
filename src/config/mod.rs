//! Configuration for datamap-tools.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datamap_tools::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::CiCd);
//!
//! let config = AppConfig::builder()
//!     .extended_attributes(true)
//!     .fail_on_change(true)
//!     .build();
//!
//! use datamap_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.datamap-tools.yaml` file in your project root or
//! `~/.config/datamap-tools/`:
//!
//! ```yaml
//! diff:
//!   extended_attributes: true
//! behavior:
//!   fail_on_change: true
//! archive:
//!   quality: 9
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, ArchiveConfig, BehaviorConfig, ComparisonConfig, DiffConfig,
    DiffConfigBuilder, DiffPaths, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.datamap-tools.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["diff", "output", "behavior", "archive"] {
            assert!(schema.contains(&format!("\"{section}\"")), "{section}");
        }
    }
}
