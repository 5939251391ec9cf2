//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `gantry-adapters` crate provides the process and filesystem
//! implementations; `gantry-cli` provides the prompt and reporter.
//!
//! Every call is synchronous and blocks the run until it returns.

use std::path::Path;

use crate::domain::{ChoiceOption, Driver, FileMutation, Module, Namespace};
use crate::error::GantryResult;

/// Port for the generated project's package manager.
///
/// Implemented by:
/// - `gantry_adapters::process::ProcessPackageManager` (production)
/// - `gantry_cli::progress::SpinnerPackageManager` (decorator)
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager: Send + Sync {
    /// Materialize `package@version` into the project at `project`.
    fn install(&self, package: &str, version: &str, project: &Path) -> GantryResult<()>;

    /// Remove `package` from the project at `project`.
    fn uninstall(&self, package: &str, project: &Path) -> GantryResult<()>;
}

/// Port for interactive questions.
///
/// Implementations return a value from `options` (or the defaults); shape
/// validation is their job, registry validation is not.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Single choice; returns the chosen option's `value`.
    fn choice(&self, prompt: &str, options: &[ChoiceOption], default: &str)
    -> GantryResult<String>;

    /// Multiple choice; returns the chosen options' `value`s.
    fn multi_select(
        &self,
        prompt: &str,
        options: &[ChoiceOption],
        defaults: &[String],
    ) -> GantryResult<Vec<String>>;
}

/// Port that applies a driver's declared file change to a project.
///
/// Implemented by:
/// - `gantry_adapters::LocalProjectEditor`
#[cfg_attr(test, mockall::automock)]
pub trait FileMutator: Send + Sync {
    fn apply(&self, mutation: &FileMutation, project: &Path) -> GantryResult<()>;
}

/// Port for user-visible progress messages.
#[cfg_attr(test, mockall::automock)]
pub trait InstallReporter: Send + Sync {
    /// A driver was installed for a module.
    fn installed(&self, module: &Module, driver: &Driver);

    /// A displaced default driver was uninstalled.
    fn uninstalled(&self, module: &Module, driver: &Driver);

    /// A scaffold step finished.
    fn step(&self, message: &str);
}

/// Port that materializes a template tree on disk.
///
/// Implemented by:
/// - `gantry_adapters::process::GitTemplateSource`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Fetch `repository` into `destination`. `dev` selects the development
    /// branch instead of the latest release.
    fn fetch(&self, repository: &str, destination: &Path, dev: bool) -> GantryResult<()>;
}

/// Files visited and changed by a namespace rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub scanned: usize,
    pub rewritten: usize,
}

/// Port for renaming the template's namespace across a project tree.
///
/// Implemented by:
/// - `gantry_adapters::NamespaceRewriter`
#[cfg_attr(test, mockall::automock)]
pub trait NamespaceRewrite: Send + Sync {
    /// The namespace the template ships with.
    fn placeholder(&self) -> String;

    fn rewrite(&self, root: &Path, namespace: &Namespace) -> GantryResult<RewriteReport>;
}

/// Port for filesystem operations used during project initialisation.
///
/// Implemented by:
/// - `gantry_adapters::filesystem::LocalFilesystem`
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file or directory tree. Missing paths are not an error.
    fn remove_all(&self, path: &Path) -> GantryResult<()>;

    /// Copy a single file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> GantryResult<()>;

    /// Mark a file executable (no-op where the platform has no such bit).
    fn set_executable(&self, path: &Path) -> GantryResult<()>;
}

/// Port for the generated project's own toolchain commands.
///
/// Implemented by:
/// - `gantry_adapters::process::ToolchainTasks`
#[cfg_attr(test, mockall::automock)]
pub trait ProjectTasks: Send + Sync {
    /// Resolve and download the project's dependencies.
    fn tidy(&self, project: &Path) -> GantryResult<()>;

    /// Generate the application's secret key.
    fn generate_key(&self, project: &Path) -> GantryResult<()>;

    /// Install the facades a lite template ships without.
    fn install_facades(&self, project: &Path) -> GantryResult<()>;
}
