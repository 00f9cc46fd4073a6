//! datamap-tools: structural diff for reflection datamap save files
//!
//! Compares two snapshots of a program's class and field layout and reports
//! what was added, dropped, moved or altered.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use datamap_tools::{
    cli,
    config::{
        self, AppConfig, ConfigPreset, DiffConfig, Validatable, CONFIG_FILE_NAMES,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSave File Encodings:",
        "\n  JSON (.json), MessagePack (.msgpack)",
        "\n  Schema version: 2",
        "\n\nOutput Formats:",
        "\n  text, summary, json"
    )
}

#[derive(Parser)]
#[command(name = "datamap-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Structural diff for reflection datamap save files", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (no changes, or changes without --fail-on-change)
    1  Changes detected with --fail-on-change
    2  Error occurred

EXAMPLES:
    # Compare two builds
    datamap-tools diff hl2_v1.json hl2_v2.msgpack

    # CI check with machine-readable output
    datamap-tools diff old.json new.json -o json -O diff.json --fail-on-change

    # Check save files before committing them
    datamap-tools validate saves/*.json

    # Bundle save files for distribution
    datamap-tools archive saves/*.msgpack --output-file bundle.tar.br")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Baseline save file
    left: PathBuf,

    /// Save file compared against the baseline
    right: PathBuf,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Only compare class sets, skip field comparison
    #[arg(long)]
    classes_only: bool,

    /// Also compare external names, override counts and float tolerances
    #[arg(long)]
    extended_attributes: bool,

    /// Exit with code 1 if any changes detected
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `archive` subcommand
#[derive(Parser)]
struct ArchiveArgs {
    /// Files to bundle (or archives to list with --list)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Archive file to write
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Brotli quality (0-11)
    #[arg(long)]
    quality: Option<u32>,

    /// Brotli window size as log2 bytes (10-24)
    #[arg(long)]
    window: Option<u32>,

    /// List the entries of existing archives instead of writing one
    #[arg(long)]
    list: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two save files
    Diff(DiffArgs),

    /// Load and validate save files
    Validate {
        /// Save files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert MessagePack save files to JSON
    Convert {
        /// `.msgpack` files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Bundle save files into a brotli-compressed tar archive
    Archive(ArchiveArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .datamap-tools.yaml in the current directory
    Init {
        /// Start from a named preset (default, ci-cd, thorough, quick)
        #[arg(long)]
        preset: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .classes_only(args.classes_only)
                .extended_attributes(args.extended_attributes)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet)
                .build();
            let mut app = effective_config(cli.config.as_deref(), &overrides)?;
            if let Some(format) = args.output {
                app.output.format = format;
            }

            cli::run_diff(DiffConfig::from_app(&app, args.left, args.right))
        }

        Commands::Validate { files } => cli::run_validate(&files, cli.quiet),

        Commands::Convert { files } => cli::run_convert(&files, cli.quiet),

        Commands::Archive(args) => {
            if args.list {
                return cli::run_archive_list(&args.files, cli.quiet);
            }
            let (mut app, _) = config::load_or_default(cli.config.as_deref());
            if let Some(output_file) = args.output_file {
                app.archive.output_file = output_file;
            }
            if let Some(quality) = args.quality {
                app.archive.quality = quality;
            }
            if let Some(window) = args.window {
                app.archive.window = window;
            }
            cli::run_archive(&args.files, &app.archive, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "datamap-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to build schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config(action, cli.config),
    }
}

/// Load the file config, merge CLI overrides over it and validate the result.
fn effective_config(path: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (app, loaded_from) = AppConfig::from_file_with_overrides(path, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let errors = app.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration: {}", joined.join("; "));
    }
    Ok(app)
}

fn run_config(action: ConfigAction, explicit: Option<PathBuf>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (app, loaded_from) = config::load_or_default(explicit.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&app).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                config::user_config_dir().map(|p| p.display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init { preset } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".datamap-tools.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = match preset {
                Some(name) => {
                    let preset = ConfigPreset::from_name(&name).with_context(|| {
                        let names: Vec<&str> =
                            ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                        format!("unknown preset '{name}' (expected one of: {})", names.join(", "))
                    })?;
                    eprintln!("Using preset '{preset}': {}", preset.description());
                    config::generate_example_config(&AppConfig::from_preset(preset))
                }
                None => config::generate_full_example_config(),
            };
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
