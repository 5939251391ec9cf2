//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "gantry",
    bin_name = "gantry",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "Application scaffolding with swappable drivers",
    long_about = "Gantry clones an application template, renames its namespace, \
                  and installs the cache, database, HTTP, queue, session, and \
                  storage drivers you choose.",
    after_help = "EXAMPLES:\n\
        \x20 gantry new shop\n\
        \x20 gantry new shop -m github.com/acme/shop --database mysql --cache redis\n\
        \x20 gantry drivers --format json\n\
        \x20 gantry completions bash > /usr/share/bash-completion/completions/gantry",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new application.
    #[command(
        about = "Create a new application",
        after_help = "EXAMPLES:\n\
            \x20 gantry new shop\n\
            \x20 gantry new shop --module github.com/acme/shop\n\
            \x20 gantry new shop --database sqlite --storage s3,minio --no-interaction\n\
            \x20 gantry new shop --lite --dev --force"
    )]
    New(Box<NewArgs>),

    /// List modules and their drivers.
    #[command(
        visible_alias = "ls",
        about = "List available drivers",
        after_help = "EXAMPLES:\n\
            \x20 gantry drivers\n\
            \x20 gantry drivers --module database\n\
            \x20 gantry drivers --format json"
    )]
    Drivers(DriversArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 gantry init\n\
            \x20 gantry init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 gantry completions bash > ~/.local/share/bash-completion/completions/gantry\n\
            \x20 gantry completions zsh  > ~/.zfunc/_gantry\n\
            \x20 gantry completions fish > ~/.config/fish/completions/gantry.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 gantry config get template.repository\n\
            \x20 gantry config list\n\
            \x20 gantry config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `gantry new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory name of the new application. Asked for when omitted.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: Option<String>,

    /// Namespace that replaces the template's own.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "NAMESPACE",
        help = "Namespace for the application, e.g. github.com/acme/shop"
    )]
    pub namespace: Option<String>,

    /// Clone the development branch instead of the latest release.
    #[arg(long = "dev", help = "Install the latest development release")]
    pub dev: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(
        short = 'f',
        long = "force",
        help = "Overwrite the directory if it already exists"
    )]
    pub force: bool,

    /// Use the lite template. Asked for when neither flag is given.
    #[arg(long = "lite", conflicts_with = "full", help = "Use the lite template")]
    pub lite: bool,

    /// Use the full template.
    #[arg(long = "full", help = "Use the full template")]
    pub full: bool,

    #[arg(long = "cache", value_name = "DRIVER", help = "Cache driver")]
    pub cache: Option<String>,

    #[arg(long = "database", value_name = "DRIVER", help = "Database driver")]
    pub database: Option<String>,

    #[arg(long = "http", value_name = "DRIVER", help = "HTTP driver")]
    pub http: Option<String>,

    #[arg(long = "queue", value_name = "DRIVER", help = "Queue driver")]
    pub queue: Option<String>,

    #[arg(long = "session", value_name = "DRIVER", help = "Session driver")]
    pub session: Option<String>,

    /// Storage accepts several drivers, comma-separated or repeated.
    #[arg(
        long = "storage",
        value_name = "DRIVER",
        value_delimiter = ',',
        help = "Storage drivers (comma-separated)"
    )]
    pub storage: Vec<String>,

    /// Version requested for every driver package.
    #[arg(
        long = "driver-version",
        value_name = "VERSION",
        help = "Driver package version (default from config)"
    )]
    pub driver_version: Option<String>,
}

// ── drivers ───────────────────────────────────────────────────────────────────

/// Arguments for `gantry drivers`.
#[derive(Debug, Args)]
pub struct DriversArgs {
    /// Only show one module.
    #[arg(long = "module", value_name = "MODULE", help = "Filter by module")]
    pub module: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: DriversFormat,
}

/// Output format for the `drivers` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DriversFormat {
    /// Human-readable table.
    Table,
    /// One `module/driver` per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `gantry init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `gantry completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `gantry config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `template.repository`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
