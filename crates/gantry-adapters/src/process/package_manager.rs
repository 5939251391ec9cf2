//! Package manager that shells out to the project's own tooling.

use std::path::Path;

use tracing::{info, instrument};

use gantry_core::{application::PackageManager, error::GantryResult};

/// Command line used to add and remove packages.
///
/// Install runs `<program> <prefix…> <install> <package>@<version>`;
/// uninstall runs `<program> <prefix…> <uninstall> <package>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerCommands {
    pub program: String,
    pub prefix_args: Vec<String>,
    pub install: String,
    pub uninstall: String,
}

impl Default for PackageManagerCommands {
    fn default() -> Self {
        Self {
            program: "go".into(),
            prefix_args: vec!["run".into(), ".".into(), "artisan".into()],
            install: "package:install".into(),
            uninstall: "package:uninstall".into(),
        }
    }
}

/// [`PackageManager`] backed by child processes run inside the project.
#[derive(Debug, Clone, Default)]
pub struct ProcessPackageManager {
    commands: PackageManagerCommands,
}

impl ProcessPackageManager {
    pub fn new(commands: PackageManagerCommands) -> Self {
        Self { commands }
    }

    fn args(&self, subcommand: &str, target: String) -> Vec<String> {
        let mut args = self.commands.prefix_args.clone();
        args.push(subcommand.to_string());
        args.push(target);
        args
    }
}

impl PackageManager for ProcessPackageManager {
    #[instrument(skip(self, project), fields(project = %project.display()))]
    fn install(&self, package: &str, version: &str, project: &Path) -> GantryResult<()> {
        let args = self.args(&self.commands.install, format!("{package}@{version}"));
        super::run(&self.commands.program, &args, Some(project))?;
        info!("package installed");
        Ok(())
    }

    #[instrument(skip(self, project), fields(project = %project.display()))]
    fn uninstall(&self, package: &str, project: &Path) -> GantryResult<()> {
        let args = self.args(&self.commands.uninstall, package.to_string());
        super::run(&self.commands.program, &args, Some(project))?;
        info!("package uninstalled");
        Ok(())
    }
}
