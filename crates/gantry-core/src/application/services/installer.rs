//! Driver installation.
//!
//! Applies a resolved [`Selection`] to a generated project:
//! 1. Install each chosen non-default driver's backing package (once per run)
//! 2. Apply the driver's file mutation
//! 3. Uninstall the template's default driver if it was displaced
//!
//! Steps are fail-fast and nothing is rolled back. A failed uninstall leaves
//! the project with the new driver installed and configured.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{FileMutator, InstallReporter, PackageManager},
    domain::{DomainError, InstalledSet, Module, Selection},
    error::GantryResult,
};

/// Installs and uninstalls drivers through the package manager port.
pub struct DriverInstaller {
    packages: Box<dyn PackageManager>,
    mutator: Box<dyn FileMutator>,
    reporter: Box<dyn InstallReporter>,
}

impl DriverInstaller {
    pub fn new(
        packages: Box<dyn PackageManager>,
        mutator: Box<dyn FileMutator>,
        reporter: Box<dyn InstallReporter>,
    ) -> Self {
        Self {
            packages,
            mutator,
            reporter,
        }
    }

    /// Apply one module's chosen drivers to the project at `project`.
    ///
    /// `installed` is shared by every module of the run; a package already
    /// in it is not installed again, but the driver's mutation is still
    /// applied and its installation still reported.
    #[instrument(skip_all, fields(module = module.name, version = version))]
    pub fn apply(
        &self,
        module: &Module,
        chosen: &[String],
        version: &str,
        project: &Path,
        installed: &mut InstalledSet,
    ) -> GantryResult<()> {
        let default = module.default_entry()?;
        let is_chosen = |signature: &str| chosen.iter().any(|c| c == signature);

        for driver in module.drivers {
            if driver.signature == default.signature || !is_chosen(driver.signature) {
                continue;
            }

            if driver.has_package() && !installed.contains(driver.package) {
                info!(package = driver.package, "installing package");
                self.packages.install(driver.package, version, project)?;
                installed.mark(driver.package);
            } else if driver.has_package() {
                debug!(package = driver.package, "package already installed this run");
            }

            if let Some(mutation) = &driver.on_install {
                debug!(file = mutation.file(), "applying driver mutation");
                self.mutator.apply(mutation, project)?;
            }

            self.reporter.installed(module, driver);
        }

        if default.has_package() && !is_chosen(default.signature) {
            info!(package = default.package, "uninstalling displaced default");
            self.packages.uninstall(default.package, project)?;
            self.reporter.uninstalled(module, default);
        }

        Ok(())
    }

    /// Apply every module in order, stopping at the first failure.
    ///
    /// Every module must have a non-empty entry in `selection`; an unresolved
    /// module fails before anything is installed for it.
    pub fn apply_all(
        &self,
        modules: &[&Module],
        selection: &Selection,
        version: &str,
        project: &Path,
        installed: &mut InstalledSet,
    ) -> GantryResult<()> {
        for module in modules {
            let chosen = selection.chosen(module);
            if chosen.is_empty() {
                return Err(DomainError::MissingSelection {
                    module: module.name.to_string(),
                }
                .into());
            }
            self.apply(module, chosen, version, project, installed)?;
        }
        Ok(())
    }
}
