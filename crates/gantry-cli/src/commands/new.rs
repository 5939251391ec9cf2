//! Implementation of the `gantry new` command.
//!
//! Responsibility: gather the project name, template, namespace, and driver
//! choices (from flags or prompts), wire the adapters, and hand everything to
//! the core scaffold service. No business logic lives here.

use std::io::{self, IsTerminal};

use tracing::{debug, info, instrument};

use gantry_adapters::{
    GitTemplateSource, LocalFilesystem, LocalProjectEditor, NamespaceRewriter, NamespaceRules,
    ProcessPackageManager, ToolchainTasks,
};
use gantry_core::{
    application::{DriverInstaller, DriverSelector, ScaffoldRequest, ScaffoldService},
    domain::{
        ChoiceOption, MODULE_REGISTRY, Module, Namespace, ProjectName, ProvidedDrivers, Selection,
    },
    error::GantryError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::{SpinnerPackageManager, SpinnerTasks},
    prompt::Questions,
};

/// Execute the `gantry new` command.
///
/// Dispatch sequence:
/// 1. Resolve and validate the project name and target directory
/// 2. Pick the template (full or lite)
/// 3. Resolve the namespace
/// 4. Resolve every module's drivers, before anything touches the disk
/// 5. Scaffold via `ScaffoldService`
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let questions = Questions::detect(global.no_interaction);
    debug!(interactive = questions.is_interactive(), "prompt mode");

    // 1. Name and path
    let name = project_name(&args, &questions)?;
    let path = std::env::current_dir()
        .with_cli_context(|| "Failed to read the current directory")?
        .join(name.as_str());
    if path.exists() && !args.force {
        return Err(CliError::ProjectExists { path });
    }

    // 2. Template
    let lite = wants_lite(&args, &questions)?;
    let repository = if lite {
        config.template.lite_repository.clone()
    } else {
        config.template.repository.clone()
    };

    // 3. Namespace
    let namespace = namespace(&args, &config, &questions)?;

    // 4. Drivers
    let selection = DriverSelector::new(questions.prompter())
        .resolve_all(MODULE_REGISTRY, |module| provided(&args, module))?;
    debug!(modules = selection.len(), "driver selection resolved");

    // 5. Scaffold
    let request = ScaffoldRequest {
        path,
        repository,
        dev: args.dev,
        lite,
        force: args.force,
        namespace,
        driver_version: args
            .driver_version
            .clone()
            .unwrap_or_else(|| config.drivers.version.clone()),
    };

    let service = build_service(&config, &output)?;

    output.header(&format!("Creating '{name}'..."))?;
    info!(project = %name, path = %request.path.display(), "scaffold started");

    service.run(&request, &selection)?;

    output.print("")?;
    output.success(&format!(
        "Application ready in [{name}]. Build something amazing!"
    ))?;
    print_selection(&selection, &output)?;

    Ok(())
}

fn project_name(args: &NewArgs, questions: &Questions) -> CliResult<ProjectName> {
    let raw = match &args.name {
        Some(name) => name.clone(),
        None => questions
            .input("What is the name of your project?", None)?
            .ok_or_else(|| CliError::InvalidInput {
                message: "the project name is required".into(),
                source: None,
            })?,
    };

    ProjectName::parse(raw.trim()).map_err(|e| CliError::Core(e.into()))
}

/// Whether to scaffold from the lite template.
fn wants_lite(args: &NewArgs, questions: &Questions) -> CliResult<bool> {
    if args.lite || args.full {
        return Ok(args.lite);
    }

    let options = [
        ChoiceOption {
            label: "Full (all facades pre-installed)".into(),
            value: "full".into(),
        },
        ChoiceOption {
            label: "Lite (only the essentials)".into(),
            value: "lite".into(),
        },
    ];
    Ok(questions.choice("Which do you want to install?", &options, "full")? == "lite")
}

fn namespace(args: &NewArgs, config: &AppConfig, questions: &Questions) -> CliResult<Namespace> {
    let raw = match &args.namespace {
        Some(ns) => ns.clone(),
        None => questions
            .input("What is the module name?", Some(config.template.placeholder.as_str()))?
            .unwrap_or_else(|| config.template.placeholder.clone()),
    };

    Namespace::parse(raw.trim()).map_err(|e| CliError::Core(e.into()))
}

/// What the command line supplied for `module`.
fn provided(args: &NewArgs, module: &Module) -> ProvidedDrivers {
    match module.name {
        "cache" => ProvidedDrivers::from_option(args.cache.clone()),
        "database" => ProvidedDrivers::from_option(args.database.clone()),
        "http" => ProvidedDrivers::from_option(args.http.clone()),
        "queue" => ProvidedDrivers::from_option(args.queue.clone()),
        "session" => ProvidedDrivers::from_option(args.session.clone()),
        "storage" => ProvidedDrivers::from_list(args.storage.clone()),
        _ => ProvidedDrivers::Absent,
    }
}

fn build_service(config: &AppConfig, output: &OutputManager) -> Result<ScaffoldService, GantryError> {
    let spinners = !output.is_quiet() && io::stderr().is_terminal();

    let rewriter =
        NamespaceRewriter::new(NamespaceRules::with_placeholder(&config.template.placeholder))?;
    let packages = SpinnerPackageManager::new(
        ProcessPackageManager::new(config.package_manager.package_commands()),
        spinners,
    );
    let tasks = SpinnerTasks::new(
        ToolchainTasks::new(config.package_manager.toolchain_commands()),
        spinners,
    );

    let installer = DriverInstaller::new(
        Box::new(packages),
        Box::new(LocalProjectEditor::new()),
        Box::new(output.clone()),
    );

    Ok(ScaffoldService::new(
        Box::new(GitTemplateSource::new(&config.template.dev_branch)),
        Box::new(LocalFilesystem::new()),
        Box::new(rewriter),
        Box::new(tasks),
        installer,
        Box::new(output.clone()),
    ))
}

fn print_selection(selection: &Selection, output: &OutputManager) -> io::Result<()> {
    if output.is_quiet() {
        return Ok(());
    }
    output.print("")?;
    for (module, chosen) in selection.iter() {
        output.print(&format!("  {module:<9} {}", chosen.join(", ")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use gantry_core::domain::registry::{CACHE, DATABASE, STORAGE};

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse(args: &[&str]) -> NewArgs {
        let cli = Cli::parse_from(["gantry", "new"].iter().chain(args));
        match cli.command {
            Commands::New(args) => *args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn flags_map_to_modules() {
        let args = parse(&["shop", "--cache", "redis", "--storage", "s3,minio"]);
        assert_eq!(
            provided(&args, &CACHE),
            ProvidedDrivers::Single("redis".into())
        );
        assert_eq!(provided(&args, &DATABASE), ProvidedDrivers::Absent);
        assert_eq!(
            provided(&args, &STORAGE),
            ProvidedDrivers::Many(vec!["s3".into(), "minio".into()])
        );
    }

    #[test]
    fn empty_flag_counts_as_absent() {
        let args = parse(&["shop", "--cache", ""]);
        assert_eq!(provided(&args, &CACHE), ProvidedDrivers::Absent);
    }

    #[test]
    fn namespace_defaults_to_placeholder_without_prompting() {
        let args = parse(&["shop"]);
        let ns = namespace(&args, &AppConfig::default(), &Questions::non_interactive()).unwrap();
        assert_eq!(ns.as_str(), "skeleton");
    }

    #[test]
    fn namespace_flag_is_trimmed() {
        let args = parse(&["shop", "-m", "/github.com/acme/shop/"]);
        let ns = namespace(&args, &AppConfig::default(), &Questions::non_interactive()).unwrap();
        assert_eq!(ns.as_str(), "github.com/acme/shop");
    }

    #[test]
    fn missing_name_without_prompt_is_invalid_input() {
        let args = parse(&[]);
        let err = project_name(&args, &Questions::non_interactive()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_name_is_rejected() {
        let args = parse(&["my shop"]);
        let err = project_name(&args, &Questions::non_interactive()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn template_flags_pick_flavour() {
        let questions = Questions::non_interactive();

        assert!(wants_lite(&parse(&["shop", "--lite"]), &questions).unwrap());
        assert!(!wants_lite(&parse(&["shop", "--full"]), &questions).unwrap());
        assert!(!wants_lite(&parse(&["shop"]), &questions).unwrap());
    }

    #[test]
    fn invalid_driver_flag_fails_before_scaffolding() {
        let args = parse(&["shop", "--cache", "foo"]);
        let err = DriverSelector::new(Questions::non_interactive().prompter())
            .resolve_all(MODULE_REGISTRY, |m| provided(&args, m))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid cache driver [foo]. Valid options are: memory, redis"
        );
    }
}
