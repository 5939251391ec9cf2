//! Validated names supplied by the user.

use std::fmt;

use crate::domain::error::DomainError;

/// Root identifier every generated file's imports are qualified with.
///
/// Leading and trailing `/` are trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim_matches('/');

        if trimmed.is_empty() {
            return Err(DomainError::InvalidNamespace {
                namespace: raw.to_string(),
                reason: "namespace is required".into(),
            });
        }

        if let Some(bad) = trimmed.chars().find(|c| !is_namespace_char(*c)) {
            return Err(DomainError::InvalidNamespace {
                namespace: raw.to_string(),
                reason: format!("character '{bad}' is not allowed"),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | '~' | '-')
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Directory name of the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: raw.to_string(),
                reason: "the project name is required".into(),
            });
        }

        let valid = raw
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !valid {
            return Err(DomainError::InvalidProjectName {
                name: raw.to_string(),
                reason: "the name only supports letters, numbers, dashes, underscores, and periods"
                    .into(),
            });
        }

        if raw == "." || raw == ".." {
            return Err(DomainError::InvalidProjectName {
                name: raw.to_string(),
                reason: "the name cannot refer to the current or parent directory".into(),
            });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
