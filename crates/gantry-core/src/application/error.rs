//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! rule violations. Rule violations are `DomainError` from `crate::domain`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to the outside world.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    ///
    /// `kind` is the original `io::ErrorKind` so callers can tell a missing
    /// file apart from a permission problem.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem {
        path: PathBuf,
        kind: io::ErrorKind,
        reason: String,
    },

    /// An external process (git, package manager, toolchain) reported failure.
    #[error("{command} failed: {detail}")]
    ExternalCommand { command: String, detail: String },

    /// The interactive prompt failed or was cancelled.
    #[error("Prompt failed: {reason}")]
    Interaction { reason: String },

    /// A configuration-block mutation found nothing to replace.
    #[error("No '{key}' entry found in {path}")]
    ConfigEntryNotFound { path: PathBuf, key: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    /// Wrap an `io::Error` for `path`, keeping its kind.
    pub fn io(path: impl AsRef<Path>, err: &io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// The underlying I/O kind, when this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Filesystem { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, kind, .. } => match kind {
                io::ErrorKind::NotFound => vec![
                    format!("Missing: {}", path.display()),
                    "The template may have changed layout; check the template repository".into(),
                ],
                io::ErrorKind::PermissionDenied => vec![
                    format!("Permission denied: {}", path.display()),
                    "Check that you have write permissions".into(),
                ],
                _ => vec![format!("Failed to access: {}", path.display())],
            },
            Self::ExternalCommand { command, .. } => vec![
                format!("Command failed: {command}"),
                "Ensure the command is installed and in your PATH".into(),
                "Check your internet connection if packages are fetched remotely".into(),
                "Already installed drivers and edited files were left in place".into(),
            ],
            Self::Interaction { .. } => vec![
                "Pass driver choices as flags to skip prompting (e.g. --cache redis)".into(),
            ],
            Self::ConfigEntryNotFound { path, key } => vec![format!(
                "Add a \"{key}\" entry to {} or update the driver registry",
                path.display()
            )],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem {
                kind: io::ErrorKind::NotFound,
                ..
            } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::ExternalCommand { .. } => ErrorCategory::Internal,
            Self::Interaction { .. } => ErrorCategory::Interaction,
            Self::ConfigEntryNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
