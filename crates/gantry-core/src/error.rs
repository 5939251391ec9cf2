//! Unified error handling for Gantry Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Gantry Core operations.
///
/// This enum wraps all possible errors that can occur when using gantry-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum GantryError {
    /// Errors from the domain layer (validation failures).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, processes, prompts).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GantryError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Gantry".into(),
                "Re-run with -vvv and include the log output when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The underlying I/O kind, if this error came from the filesystem.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Application(e) => e.io_kind(),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Nothing in the scaffold flow is retried; every failure halts the run.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Interaction,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type GantryResult<T> = Result<T, GantryError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> GantryResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> GantryResult<T> {
        self.map_err(|e| GantryError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_message_is_transparent() {
        let err: GantryError = DomainError::InvalidDriver {
            module: "cache".into(),
            driver: "x".into(),
            valid: vec!["memory".into(), "redis".into()],
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid cache driver [x]. Valid options are: memory, redis"
        );
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn io_kind_passes_through() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err: GantryError = ApplicationError::io("/x", &io_err).into();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
        assert!(!err.is_retryable());
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), io::Error> = Err(io::Error::other("boom"));
        let err = res.context("reading").unwrap_err();
        assert!(matches!(err, GantryError::Internal { .. }));
        assert!(err.to_string().contains("reading: boom"));
    }
}
