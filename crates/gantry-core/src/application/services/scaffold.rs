//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Materialize the template at the project path
//! 2. Rewrite the namespace (if it differs from the template's)
//! 3. Initialise the project (cleanup, env file, dependencies, key)
//! 4. Install the facades, for the lite template only
//! 5. Install the selected drivers
//!
//! Driver selection must already be complete; see
//! [`DriverSelector`](super::DriverSelector).

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, InstallReporter, NamespaceRewrite, ProjectTasks, TemplateSource},
        services::DriverInstaller,
    },
    domain::{InstalledSet, MODULE_REGISTRY, Module, Namespace, Selection},
    error::GantryResult,
};

/// Everything the scaffold flow needs to know about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Directory the project is created in.
    pub path: PathBuf,
    /// Template repository to fetch.
    pub repository: String,
    /// Fetch the development branch instead of the latest release.
    pub dev: bool,
    /// The template is the lite flavour, which needs its facades installed.
    pub lite: bool,
    /// Remove an existing directory at `path` first.
    pub force: bool,
    pub namespace: Namespace,
    /// Version passed to every driver package install.
    pub driver_version: String,
}

/// Files and directories the template ships that a new project should not keep
/// or must derive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Removed after cloning.
    pub cleanup: Vec<String>,
    /// Marked executable when present.
    pub launcher: String,
    pub env_example: String,
    pub env_file: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            cleanup: vec![".git".into(), ".github".into()],
            launcher: "artisan".into(),
            env_example: ".env.example".into(),
            env_file: ".env".into(),
        }
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    source: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
    rewriter: Box<dyn NamespaceRewrite>,
    tasks: Box<dyn ProjectTasks>,
    installer: DriverInstaller,
    reporter: Box<dyn InstallReporter>,
    layout: ProjectLayout,
    modules: &'static [&'static Module],
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        source: Box<dyn TemplateSource>,
        filesystem: Box<dyn Filesystem>,
        rewriter: Box<dyn NamespaceRewrite>,
        tasks: Box<dyn ProjectTasks>,
        installer: DriverInstaller,
        reporter: Box<dyn InstallReporter>,
    ) -> Self {
        Self {
            source,
            filesystem,
            rewriter,
            tasks,
            installer,
            reporter,
            layout: ProjectLayout::default(),
            modules: MODULE_REGISTRY,
        }
    }

    /// Override the template's file layout.
    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Restrict installation to a subset of modules (registry order by default).
    pub fn with_modules(mut self, modules: &'static [&'static Module]) -> Self {
        self.modules = modules;
        self
    }

    /// Scaffold a new project and install the selected drivers.
    ///
    /// Each call owns a fresh [`InstalledSet`], so repeated runs in one
    /// process never skip installs. Nothing is rolled back on failure.
    #[instrument(skip_all, fields(path = %request.path.display(), namespace = %request.namespace))]
    pub fn run(&self, request: &ScaffoldRequest, selection: &Selection) -> GantryResult<()> {
        let path = request.path.as_path();

        if self.filesystem.exists(path) {
            if !request.force {
                return Err(ApplicationError::ProjectExists {
                    path: path.to_path_buf(),
                }
                .into());
            }
            info!("removing existing directory");
            self.filesystem.remove_all(path)?;
        }

        self.source.fetch(&request.repository, path, request.dev)?;
        self.reporter.step(&format!("Cloned template into {}", path.display()));

        self.rewrite_namespace(path, &request.namespace)?;
        self.initialise(path)?;

        if request.lite {
            self.tasks.install_facades(path)?;
            self.reporter.step("Installed facades");
        }

        let mut installed = InstalledSet::new();
        self.installer.apply_all(
            self.modules,
            selection,
            &request.driver_version,
            path,
            &mut installed,
        )?;

        info!(packages = installed.len(), "scaffold completed");
        Ok(())
    }

    fn rewrite_namespace(&self, path: &Path, namespace: &Namespace) -> GantryResult<()> {
        if namespace.as_str() == self.rewriter.placeholder() {
            return Ok(());
        }

        let report = self.rewriter.rewrite(path, namespace)?;
        info!(
            scanned = report.scanned,
            rewritten = report.rewritten,
            "namespace rewritten"
        );
        self.reporter.step(&format!("Updated namespace to \"{namespace}\""));
        Ok(())
    }

    fn initialise(&self, path: &Path) -> GantryResult<()> {
        for entry in &self.layout.cleanup {
            self.filesystem.remove_all(&path.join(entry))?;
        }

        let launcher = path.join(&self.layout.launcher);
        if self.filesystem.exists(&launcher) {
            self.filesystem.set_executable(&launcher)?;
        }

        self.tasks.tidy(path)?;
        self.reporter.step("Installed dependencies");

        self.filesystem.copy_file(
            &path.join(&self.layout.env_example),
            &path.join(&self.layout.env_file),
        )?;
        self.reporter.step(&format!("Generated {} file", self.layout.env_file));

        self.tasks.generate_key(path)?;
        self.reporter.step("Generated application key");

        Ok(())
    }
}
