//! `gantry config`: show the configuration the other commands would use.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => output.print(&format!("{key} = {:?}", config.get(&key)?))?,
        ConfigCommands::List => {
            output.header("Effective configuration (defaults, file, environment):")?;
            output.print(&to_toml(&config)?)?;
        }
        ConfigCommands::Path => output.print(&AppConfig::config_path().display().to_string())?,
    }
    Ok(())
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("cannot render configuration as TOML: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_renders_every_section() {
        let rendered = to_toml(&AppConfig::default()).unwrap();
        for section in ["[template]", "[package_manager]", "[drivers]", "[output]"] {
            assert!(rendered.contains(section), "missing {section}");
        }
    }
}
