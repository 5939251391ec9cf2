//! Toolchain tasks run once after the template is fetched.

use std::path::Path;

use tracing::instrument;

use gantry_core::{
    application::{ApplicationError, ProjectTasks},
    error::GantryResult,
};

/// Argument vectors for the project's toolchain. The first element is the
/// program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCommands {
    pub tidy: Vec<String>,
    pub generate_key: Vec<String>,
    /// Installs the facades a lite template leaves out.
    pub install_facades: Vec<String>,
}

impl Default for ToolchainCommands {
    fn default() -> Self {
        Self {
            tidy: argv(&["go", "mod", "tidy"]),
            generate_key: argv(&["go", "run", ".", "artisan", "key:generate"]),
            install_facades: argv(&["go", "run", ".", "artisan", "package:install"]),
        }
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// [`ProjectTasks`] backed by child processes.
#[derive(Debug, Clone, Default)]
pub struct ToolchainTasks {
    commands: ToolchainCommands,
}

impl ToolchainTasks {
    pub fn new(commands: ToolchainCommands) -> Self {
        Self { commands }
    }

    /// Run `argv` in `project`. An empty vector is a configuration mistake
    /// and fails under the task's `name`.
    fn exec(&self, name: &str, argv: &[String], project: &Path) -> GantryResult<()> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ApplicationError::ExternalCommand {
                command: name.to_string(),
                detail: "no command configured".into(),
            }
            .into());
        };
        super::run(program, args, Some(project))
    }
}

impl ProjectTasks for ToolchainTasks {
    #[instrument(skip(self, project), fields(project = %project.display()))]
    fn tidy(&self, project: &Path) -> GantryResult<()> {
        self.exec("tidy", &self.commands.tidy, project)
    }

    #[instrument(skip(self, project), fields(project = %project.display()))]
    fn generate_key(&self, project: &Path) -> GantryResult<()> {
        self.exec("generate_key", &self.commands.generate_key, project)
    }

    #[instrument(skip(self, project), fields(project = %project.display()))]
    fn install_facades(&self, project: &Path) -> GantryResult<()> {
        self.exec("install_facades", &self.commands.install_facades, project)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = ToolchainTasks::new(ToolchainCommands {
            tidy: vec![],
            ..ToolchainCommands::default()
        });

        let err = tasks.tidy(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "tidy failed: no command configured");
    }

    #[test]
    fn tasks_run_inside_project() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = ToolchainTasks::new(ToolchainCommands {
            tidy: argv(&["sh", "-c", "touch tidied"]),
            generate_key: argv(&["sh", "-c", "echo APP_KEY=x >> .env"]),
            install_facades: argv(&["sh", "-c", "touch facades"]),
        });

        tasks.tidy(dir.path()).unwrap();
        tasks.generate_key(dir.path()).unwrap();
        tasks.install_facades(dir.path()).unwrap();

        assert!(dir.path().join("tidied").exists());
        assert!(dir.path().join(".env").exists());
        assert!(dir.path().join("facades").exists());
    }

    #[test]
    fn failing_task_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = ToolchainTasks::new(ToolchainCommands {
            tidy: argv(&["sh", "-c", "echo 'go: cannot find main module' >&2; exit 1"]),
            ..ToolchainCommands::default()
        });

        let err = tasks.tidy(dir.path()).unwrap_err();
        assert!(err.to_string().contains("cannot find main module"));
    }

    #[test]
    fn default_facade_install_runs_package_install() {
        assert_eq!(
            ToolchainCommands::default().install_facades,
            ["go", "run", ".", "artisan", "package:install"]
        );
    }
}
