// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside `GantryError`, which is `Clone`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A driver signature that the module does not know about.
    ///
    /// The message format is relied upon by scripts wrapping the CLI.
    #[error("invalid {module} driver [{driver}]. Valid options are: {}", valid.join(", "))]
    InvalidDriver {
        module: String,
        driver: String,
        valid: Vec<String>,
    },

    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown module '{name}'")]
    UnknownModule { name: String },

    #[error("module '{module}' has no driver with signature '{signature}'")]
    DriverNotFound { module: String, signature: String },

    #[error("no drivers were selected for module '{module}'")]
    MissingSelection { module: String },
}

impl DomainError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDriver { module, valid, .. } => {
                let mut out = vec![format!("Valid {module} drivers:")];
                out.extend(valid.iter().map(|v| format!("  • {v}")));
                out.push(format!(
                    "Example: gantry new my-app --{module} {}",
                    valid.first().map(String::as_str).unwrap_or("<driver>")
                ));
                out
            }
            Self::InvalidNamespace { .. } => vec![
                "Use only letters, numbers, dots (.), slashes (/), underscores (_), hyphens (-), and tildes (~)".into(),
                "Example: github.com/yourusername/yourproject or yourproject".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use letters, numbers, dashes, underscores, and periods".into(),
                "Examples: my-app, my_app, app.v2".into(),
            ],
            Self::UnknownModule { .. } => {
                vec!["List available modules and drivers: gantry drivers".into()]
            }
            Self::DriverNotFound { module, .. } => vec![format!(
                "The '{module}' module is misconfigured; its default driver is missing"
            )],
            Self::MissingSelection { module } => vec![format!(
                "Resolve the '{module}' drivers before installing them"
            )],
        }
    }

    /// Get error category for UI display.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDriver { .. }
            | Self::InvalidNamespace { .. }
            | Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::UnknownModule { .. } => ErrorCategory::NotFound,
            Self::DriverNotFound { .. } | Self::MissingSelection { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
