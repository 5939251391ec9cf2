//! CLI-level errors.
//!
//! Core failures arrive as [`CliError::Core`]; the remaining variants cover
//! what only the binary can get wrong (arguments, config files, local I/O).
//! Every error knows its exit code and how to render itself for stderr.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use gantry_core::error::GantryError;

pub use gantry_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Target directory already exists and `--force` was not given.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The layered configuration could not be built or rendered.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `gantry-core` or the adapters.
    ///
    /// Displayed as the core message itself so driver validation errors
    /// read exactly as the core words them.
    #[error(transparent)]
    Core(#[from] GantryError),

    /// Local I/O outside the core (config file, current directory).
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Hints printed under the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Rejected: {message}"),
                "Run with --help to see the accepted arguments".into(),
            ],

            Self::ProjectExists { path } => vec![
                format!("'{}' is already taken", path.display()),
                "Pass --force to delete it and scaffold again".into(),
                "Or pick another application name".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                message.clone(),
                format!("Check your config file at {}", crate::config::AppConfig::config_path().display()),
                "Use 'gantry init --force' to write a fresh default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                message.clone(),
                "Check that the directory exists and is writable".into(),
            ],
        }
    }

    /// Category that drives the exit code and log level.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Interaction => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render the message, the cause chain (verbose only), and suggestions
    /// for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_string() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("\u{2717} Error:", |t| t.red().bold().to_string()), // ✗
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {}\n",
                    paint(&format!("caused by: {err}"), |t| t.dimmed().to_string())
                ));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string())
            ));
        }

        out
    }

    /// Emit the error as a tracing event: user-side problems at WARN,
    /// everything else at ERROR.
    pub fn log(&self) {
        let category = self.category();
        let cause = self.source().map(|e| e.to_string());
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, ?cause, "{self}");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, ?cause, "{self}");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, rejected names or drivers, cancelled prompts.
    UserError,
    /// A file or module that should exist does not.
    NotFound,
    Configuration,
    /// External commands, unexpected I/O, bugs.
    Internal,
}

/// Attach a message to an `io::Result` while turning it into a [`CliError`].
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use gantry_core::{application::ApplicationError, domain::DomainError};

    fn core(err: impl Into<GantryError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── messages & suggestions ────────────────────────────────────────────

    #[test]
    fn invalid_driver_message_is_passed_through() {
        let err = core(DomainError::InvalidDriver {
            module: "cache".into(),
            driver: "foo".into(),
            valid: vec!["memory".into(), "redis".into()],
        });
        assert_eq!(
            err.to_string(),
            "invalid cache driver [foo]. Valid options are: memory, redis"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn project_exists_suggests_force() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/test"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(
            core(ApplicationError::Interaction {
                reason: "interrupted".into()
            })
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert_eq!(core(ApplicationError::io("/tmp/.env", &missing)).exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            core(ApplicationError::ExternalCommand {
                command: "git clone".into(),
                detail: "fatal".into()
            })
            .exit_code(),
            1
        );
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn plain_render_has_message_and_suggestions() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.render(false, false);
        assert!(s.contains("Error: Project already exists at /tmp/x"));
        assert!(s.contains("Suggestions:"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_shows_causes_and_omits_hint() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.render(true, false);
        assert!(s.contains("caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "writing config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
