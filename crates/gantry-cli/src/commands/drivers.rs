//! `gantry drivers`: list modules and the drivers they offer.

use gantry_core::{
    domain::{MODULE_REGISTRY, Module, find_module},
    error::Context,
};

use crate::{
    cli::{DriversArgs, DriversFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: DriversArgs, output: OutputManager) -> CliResult<()> {
    let modules: Vec<&Module> = match &args.module {
        Some(name) => vec![find_module(name).map_err(|e| CliError::Core(e.into()))?],
        None => MODULE_REGISTRY.to_vec(),
    };

    match args.format {
        DriversFormat::Table => {
            output.header("Available Drivers:")?;
            for line in table_lines(&modules) {
                output.print(&line)?;
            }
        }

        // JSON and list output go straight to stdout so they stay parseable
        // under --quiet and in pipes.
        DriversFormat::Json => {
            let json = serde_json::to_string_pretty(&modules).context("serialising drivers")?;
            println!("{json}");
        }

        DriversFormat::List => {
            for line in list_lines(&modules) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn table_lines(modules: &[&Module]) -> Vec<String> {
    let mut lines = Vec::new();
    for module in modules {
        let kind = if module.supports_multiple {
            ", multiple"
        } else {
            ""
        };
        lines.push(format!("  {} (default: {}{kind})", module.name, module.default_driver));

        for driver in module.drivers {
            let package = if driver.has_package() {
                driver.package
            } else {
                "built in"
            };
            lines.push(format!("    {:<10} {:<12} {package}", driver.signature, driver.name));
        }
    }
    lines
}

fn list_lines(modules: &[&Module]) -> Vec<String> {
    modules
        .iter()
        .flat_map(|m| m.drivers.iter().map(move |d| format!("{}/{}", m.name, d.signature)))
        .collect()
}

#[cfg(test)]
mod tests {
    use gantry_core::domain::registry::{CACHE, STORAGE};

    use super::*;

    #[test]
    fn list_is_module_slash_signature() {
        assert_eq!(list_lines(&[&CACHE]), ["cache/memory", "cache/redis"]);
    }

    #[test]
    fn table_marks_default_and_builtin() {
        let lines = table_lines(&[&CACHE]);
        assert_eq!(lines[0], "  cache (default: memory)");
        assert!(lines[1].contains("memory") && lines[1].ends_with("built in"));
        assert!(lines[2].contains("Redis"));
    }

    #[test]
    fn table_marks_multi_choice_modules() {
        let lines = table_lines(&[&STORAGE]);
        assert!(lines[0].ends_with(", multiple)"));
    }

    #[test]
    fn json_includes_mutations() {
        let json = serde_json::to_string(&[&CACHE]).unwrap();
        assert!(json.contains("\"CACHE_STORE\""));
        assert!(json.contains("\"kind\":\"env_values\""));
    }
}
