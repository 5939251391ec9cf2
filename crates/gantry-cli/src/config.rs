//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `GANTRY__<SECTION>__<KEY>`
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gantry_adapters::{PackageManagerCommands, ToolchainCommands};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "GANTRY";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where templates come from.
    pub template: TemplateConfig,
    /// How driver packages and project tasks are run.
    pub package_manager: PackageManagerConfig,
    pub drivers: DriversConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub repository: String,
    pub lite_repository: String,
    /// Namespace the template ships with; a matching `--module` skips the rewrite.
    pub placeholder: String,
    /// Branch cloned by `--dev`.
    pub dev_branch: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: "https://github.com/gantry-dev/skeleton.git".into(),
            lite_repository: "https://github.com/gantry-dev/skeleton-lite.git".into(),
            placeholder: "skeleton".into(),
            dev_branch: "master".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManagerConfig {
    pub program: String,
    pub prefix_args: Vec<String>,
    pub install: String,
    pub uninstall: String,
    /// Full argument vector, program first.
    pub tidy: Vec<String>,
    /// Full argument vector, program first.
    pub generate_key: Vec<String>,
    /// Full argument vector, program first. Run for the lite template only.
    pub install_facades: Vec<String>,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        let packages = PackageManagerCommands::default();
        let tasks = ToolchainCommands::default();
        Self {
            program: packages.program,
            prefix_args: packages.prefix_args,
            install: packages.install,
            uninstall: packages.uninstall,
            tidy: tasks.tidy,
            generate_key: tasks.generate_key,
            install_facades: tasks.install_facades,
        }
    }
}

impl PackageManagerConfig {
    pub fn package_commands(&self) -> PackageManagerCommands {
        PackageManagerCommands {
            program: self.program.clone(),
            prefix_args: self.prefix_args.clone(),
            install: self.install.clone(),
            uninstall: self.uninstall.clone(),
        }
    }

    pub fn toolchain_commands(&self) -> ToolchainCommands {
        ToolchainCommands {
            tidy: self.tidy.clone(),
            generate_key: self.generate_key.clone(),
            install_facades: self.install_facades.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriversConfig {
    /// Version requested for every driver package.
    pub version: String,
}

impl Default for DriversConfig {
    fn default() -> Self {
        Self {
            version: "latest".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the process
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Self::load`], reading variables from `env` instead of the process
    /// environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(" ")
            .with_list_parse_key("package_manager.prefix_args")
            .with_list_parse_key("package_manager.tidy")
            .with_list_parse_key("package_manager.generate_key")
            .with_list_parse_key("package_manager.install_facades")
            .try_parsing(true)
            .source(env);

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(environment)
            .build()
            .and_then(Config::try_deserialize::<Self>)
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.gantry.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "gantry", "gantry")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".gantry.toml"))
    }

    /// Look up a dotted key, e.g. `template.repository`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = match key {
            "template.repository" => self.template.repository.clone(),
            "template.lite_repository" => self.template.lite_repository.clone(),
            "template.placeholder" => self.template.placeholder.clone(),
            "template.dev_branch" => self.template.dev_branch.clone(),
            "package_manager.program" => self.package_manager.program.clone(),
            "package_manager.prefix_args" => self.package_manager.prefix_args.join(" "),
            "package_manager.install" => self.package_manager.install.clone(),
            "package_manager.uninstall" => self.package_manager.uninstall.clone(),
            "package_manager.tidy" => self.package_manager.tidy.join(" "),
            "package_manager.generate_key" => self.package_manager.generate_key.join(" "),
            "package_manager.install_facades" => self.package_manager.install_facades.join(" "),
            "drivers.version" => self.drivers.version.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => {
                return Err(CliError::ConfigError {
                    message: format!("Unknown config key: '{key}'"),
                    source: None,
                });
            }
        };
        Ok(value)
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
