//! Drivers and the capability modules that own them.
//!
//! Everything here is `'static` data: modules are declared once in
//! [`crate::domain::registry`] and never mutated. Per-run choices live in
//! [`crate::domain::Selection`], not on the module.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// A file change applied to the generated project after a driver's backing
/// package has been installed.
///
/// Interpreted by the [`FileMutator`](crate::application::ports::FileMutator)
/// port. Both variants are idempotent: applying one twice leaves the file as
/// applying it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileMutation {
    /// Set `key=value` pairs in an env-style file, appending missing keys.
    EnvValues {
        /// Path relative to the project root.
        file: &'static str,
        values: &'static [(&'static str, &'static str)],
    },

    /// Replace the value of one `"key": value` entry in a generated
    /// configuration block.
    ConfigEntry {
        /// Path relative to the project root.
        file: &'static str,
        key: &'static str,
        /// Written verbatim, so string literals must carry their own quotes.
        value: &'static str,
    },
}

impl FileMutation {
    /// The project-relative file this mutation touches.
    pub fn file(&self) -> &'static str {
        match self {
            Self::EnvValues { file, .. } | Self::ConfigEntry { file, .. } => file,
        }
    }
}

/// One implementation variant of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Driver {
    /// Human label, display only.
    pub name: &'static str,

    /// Stable identifier, unique within its module.
    pub signature: &'static str,

    /// Backing package identifier. Empty when nothing needs installing.
    pub package: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_install: Option<FileMutation>,
}

impl Driver {
    /// `true` if selecting this driver requires an external package.
    pub fn has_package(&self) -> bool {
        !self.package.is_empty()
    }
}

/// A named capability slot in the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Also the CLI option key (`--cache`, `--database`, ...).
    pub name: &'static str,

    /// Signature of the driver the template ships pre-wired with.
    pub default_driver: &'static str,

    /// Whether several drivers may be active at once.
    pub supports_multiple: bool,

    /// Available drivers, in display and processing order.
    pub drivers: &'static [Driver],
}

impl Module {
    /// All driver signatures, in registry order.
    pub fn signatures(&self) -> Vec<&'static str> {
        self.drivers.iter().map(|d| d.signature).collect()
    }

    pub fn driver(&self, signature: &str) -> Option<&'static Driver> {
        self.drivers.iter().find(|d| d.signature == signature)
    }

    /// The driver the template ships with.
    pub fn default_entry(&self) -> Result<&'static Driver, DomainError> {
        self.driver(self.default_driver)
            .ok_or_else(|| DomainError::DriverNotFound {
                module: self.name.to_string(),
                signature: self.default_driver.to_string(),
            })
    }

    /// Check that every signature names a driver of this module.
    ///
    /// Fails on the first unknown signature.
    pub fn validate<S: AsRef<str>>(&self, signatures: &[S]) -> Result<(), DomainError> {
        for signature in signatures {
            let signature = signature.as_ref();
            if self.driver(signature).is_none() {
                return Err(DomainError::InvalidDriver {
                    module: self.name.to_string(),
                    driver: signature.to_string(),
                    valid: self.signatures().into_iter().map(String::from).collect(),
                });
            }
        }
        Ok(())
    }

    /// Prompt options: label is the driver name, value its signature.
    pub fn choice_options(&self) -> Vec<ChoiceOption> {
        self.drivers
            .iter()
            .map(|d| ChoiceOption {
                label: d.name.to_string(),
                value: d.signature.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A labelled value offered by an interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVERS: &[Driver] = &[
        Driver {
            name: "Memory",
            signature: "memory",
            package: "",
            on_install: None,
        },
        Driver {
            name: "Redis",
            signature: "redis",
            package: "example.com/redis",
            on_install: Some(FileMutation::EnvValues {
                file: ".env",
                values: &[("CACHE_STORE", "redis")],
            }),
        },
    ];

    static MODULE: Module = Module {
        name: "cache",
        default_driver: "memory",
        supports_multiple: false,
        drivers: DRIVERS,
    };

    #[test]
    fn validate_accepts_known_signatures() {
        assert!(MODULE.validate(&["memory", "redis"]).is_ok());
    }

    #[test]
    fn validate_rejects_first_unknown() {
        let err = MODULE.validate(&["redis", "nope", "worse"]).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidDriver {
                module: "cache".into(),
                driver: "nope".into(),
                valid: vec!["memory".into(), "redis".into()],
            }
        );
    }

    #[test]
    fn default_driver_lookup() {
        assert_eq!(MODULE.default_entry().unwrap().name, "Memory");
        assert!(!MODULE.default_entry().unwrap().has_package());
    }

    #[test]
    fn choice_options_keep_registry_order() {
        let opts = MODULE.choice_options();
        assert_eq!(opts[0].label, "Memory");
        assert_eq!(opts[1].value, "redis");
    }

    #[test]
    fn mutation_file_accessor() {
        assert_eq!(DRIVERS[1].on_install.unwrap().file(), ".env");
    }
}
