//! External process adapters.
//!
//! Everything that shells out lives here: the generated project's package
//! manager, its toolchain tasks, and the git clone that fetches the template.
//! Commands run to completion with captured output; a non-zero exit becomes
//! [`ApplicationError::ExternalCommand`] carrying the trimmed stderr.

mod package_manager;
mod tasks;
mod template;

use std::path::Path;
use std::process::Command;

use tracing::{debug, trace};

use gantry_core::{application::ApplicationError, error::GantryResult};

pub use package_manager::{PackageManagerCommands, ProcessPackageManager};
pub use tasks::{ToolchainCommands, ToolchainTasks};
pub use template::GitTemplateSource;

/// Run `program args…` in `cwd` and wait for it.
pub(crate) fn run<S: AsRef<str>>(
    program: &str,
    args: &[S],
    cwd: Option<&Path>,
) -> GantryResult<()> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let command_line = render(program, &args);

    let mut command = Command::new(program);
    command.args(&args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    debug!(command = %command_line, "running external command");
    let output = command.output().map_err(|e| ApplicationError::ExternalCommand {
        command: command_line.clone(),
        detail: e.to_string(),
    })?;

    trace!(
        stdout = %String::from_utf8_lossy(&output.stdout),
        "external command output"
    );

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = match (stderr.trim(), stdout.trim()) {
        ("", "") => output.status.to_string(),
        ("", out) => out.to_string(),
        (err, _) => err.to_string(),
    };

    Err(ApplicationError::ExternalCommand {
        command: command_line,
        detail,
    }
    .into())
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
