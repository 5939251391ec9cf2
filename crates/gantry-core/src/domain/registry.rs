//! Driver registry.
//!
//! Single source of truth for every capability module the template exposes
//! and the drivers that can fill it. Each module is described exactly once.
//!
//! # Adding a New Driver
//!
//! 1. Add a [`Driver`] entry to the module's `drivers` slice
//! 2. If it needs configuration changes, give it an `on_install` mutation
//! 3. Selection, validation, and installation pick it up from here
//!
//! # Adding a New Module
//!
//! 1. Declare a `pub static` [`Module`]
//! 2. Append it to [`MODULE_REGISTRY`] (order is processing order)
//! 3. Add the matching `--<name>` flag in the CLI

use crate::domain::driver::{Driver, FileMutation, Module};
use crate::domain::error::DomainError;

/// Root of every backing package.
macro_rules! pkg {
    ($name:literal) => {
        concat!("github.com/gantry-dev/", $name)
    };
}

/// Env file every env mutation targets, relative to the project root.
pub const ENV_FILE: &str = ".env";

/// Generated HTTP configuration block.
pub const HTTP_CONFIG_FILE: &str = "config/http.go";

pub static CACHE: Module = Module {
    name: "cache",
    default_driver: "memory",
    supports_multiple: false,
    drivers: &[
        Driver {
            name: "Memory",
            signature: "memory",
            package: "",
            on_install: None,
        },
        Driver {
            name: "Redis",
            signature: "redis",
            package: pkg!("redis"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[("CACHE_STORE", "redis")],
            }),
        },
    ],
};

pub static DATABASE: Module = Module {
    name: "database",
    default_driver: "postgres",
    supports_multiple: false,
    drivers: &[
        Driver {
            name: "SQLite",
            signature: "sqlite",
            package: pkg!("sqlite"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[("DB_CONNECTION", "sqlite"), ("DB_DATABASE", "forge")],
            }),
        },
        Driver {
            name: "MySQL",
            signature: "mysql",
            package: pkg!("mysql"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[
                    ("DB_CONNECTION", "mysql"),
                    ("DB_HOST", ""),
                    ("DB_PORT", "3306"),
                    ("DB_DATABASE", "forge"),
                    ("DB_USERNAME", ""),
                    ("DB_PASSWORD", ""),
                ],
            }),
        },
        Driver {
            name: "PostgreSQL",
            signature: "postgres",
            package: pkg!("postgres"),
            on_install: None,
        },
        Driver {
            name: "SQL Server",
            signature: "sqlserver",
            package: pkg!("sqlserver"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[
                    ("DB_CONNECTION", "sqlserver"),
                    ("DB_HOST", ""),
                    ("DB_PORT", "1433"),
                    ("DB_DATABASE", "forge"),
                    ("DB_USERNAME", ""),
                    ("DB_PASSWORD", ""),
                ],
            }),
        },
    ],
};

pub static HTTP: Module = Module {
    name: "http",
    default_driver: "gin",
    supports_multiple: false,
    drivers: &[
        Driver {
            name: "Gin",
            signature: "gin",
            package: pkg!("gin"),
            on_install: None,
        },
        Driver {
            name: "Fiber",
            signature: "fiber",
            package: pkg!("fiber"),
            on_install: Some(FileMutation::ConfigEntry {
                file: HTTP_CONFIG_FILE,
                key: "default",
                value: "\"fiber\"",
            }),
        },
    ],
};

pub static QUEUE: Module = Module {
    name: "queue",
    default_driver: "sync",
    supports_multiple: false,
    drivers: &[
        Driver {
            name: "Sync",
            signature: "sync",
            package: "",
            on_install: None,
        },
        Driver {
            name: "Redis",
            signature: "redis",
            package: pkg!("redis"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[("QUEUE_CONNECTION", "redis")],
            }),
        },
    ],
};

pub static SESSION: Module = Module {
    name: "session",
    default_driver: "file",
    supports_multiple: false,
    drivers: &[
        Driver {
            name: "File",
            signature: "file",
            package: "",
            on_install: None,
        },
        Driver {
            name: "Redis",
            signature: "redis",
            package: pkg!("redis"),
            on_install: Some(FileMutation::EnvValues {
                file: ENV_FILE,
                values: &[("SESSION_DRIVER", "redis")],
            }),
        },
    ],
};

pub static STORAGE: Module = Module {
    name: "storage",
    default_driver: "local",
    supports_multiple: true,
    drivers: &[
        Driver {
            name: "Local",
            signature: "local",
            package: "",
            on_install: None,
        },
        Driver {
            name: "S3",
            signature: "s3",
            package: pkg!("s3"),
            on_install: None,
        },
        Driver {
            name: "OSS",
            signature: "oss",
            package: pkg!("oss"),
            on_install: None,
        },
        Driver {
            name: "COS",
            signature: "cos",
            package: pkg!("cos"),
            on_install: None,
        },
        Driver {
            name: "MinIO",
            signature: "minio",
            package: pkg!("minio"),
            on_install: None,
        },
        Driver {
            name: "Cloudinary",
            signature: "cloudinary",
            package: pkg!("cloudinary"),
            on_install: None,
        },
    ],
};

/// Every module, in processing order.
pub static MODULE_REGISTRY: &[&Module] = &[&CACHE, &DATABASE, &HTTP, &QUEUE, &SESSION, &STORAGE];

/// Look up a module by its option key.
pub fn find_module(name: &str) -> Result<&'static Module, DomainError> {
    MODULE_REGISTRY
        .iter()
        .copied()
        .find(|m| m.name == name)
        .ok_or_else(|| DomainError::UnknownModule {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Registry invariants that every edit to this file must keep.
    #[test]
    fn assert_registry_integrity() {
        let mut module_names = HashSet::new();
        for module in MODULE_REGISTRY {
            assert!(
                module_names.insert(module.name),
                "duplicate module name: {}",
                module.name
            );

            assert!(
                module.default_entry().is_ok(),
                "{}: default driver '{}' is not registered",
                module.name,
                module.default_driver
            );

            let mut signatures = HashSet::new();
            for driver in module.drivers {
                assert!(
                    signatures.insert(driver.signature),
                    "{}: duplicate signature '{}'",
                    module.name,
                    driver.signature
                );
            }
        }
    }

    #[test]
    fn only_storage_supports_multiple() {
        let multi: Vec<_> = MODULE_REGISTRY
            .iter()
            .filter(|m| m.supports_multiple)
            .map(|m| m.name)
            .collect();
        assert_eq!(multi, vec!["storage"]);
    }

    #[test]
    fn redis_package_is_shared_across_modules() {
        let users: Vec<_> = MODULE_REGISTRY
            .iter()
            .filter(|m| m.drivers.iter().any(|d| d.package == pkg!("redis")))
            .map(|m| m.name)
            .collect();
        assert_eq!(users, vec!["cache", "queue", "session"]);
    }

    #[test]
    fn find_module_by_name() {
        assert_eq!(find_module("http").unwrap().default_driver, "gin");
        assert!(matches!(
            find_module("mailer"),
            Err(DomainError::UnknownModule { .. })
        ));
    }

    #[test]
    fn non_default_drivers_with_packages_are_installable() {
        // Every non-default driver either has a package to install or is a
        // pure configuration switch; none may be a silent no-op.
        for module in MODULE_REGISTRY {
            for driver in module.drivers {
                if driver.signature != module.default_driver {
                    assert!(
                        driver.has_package() || driver.on_install.is_some(),
                        "{}/{} does nothing when chosen",
                        module.name,
                        driver.signature
                    );
                }
            }
        }
    }
}
