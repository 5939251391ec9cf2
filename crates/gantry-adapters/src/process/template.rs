//! Template fetching via a shallow `git clone`.

use std::path::Path;

use tracing::{info, instrument};

use gantry_core::{application::TemplateSource, error::GantryResult};

/// [`TemplateSource`] that clones with `git clone --depth=1`.
#[derive(Debug, Clone)]
pub struct GitTemplateSource {
    program: String,
    dev_branch: String,
}

impl GitTemplateSource {
    pub fn new(dev_branch: impl Into<String>) -> Self {
        Self {
            program: "git".into(),
            dev_branch: dev_branch.into(),
        }
    }

    /// Use a different git binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn args(&self, repository: &str, destination: &Path, dev: bool) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "--depth=1".to_string()];
        if dev {
            args.push(format!("--branch={}", self.dev_branch));
        }
        args.push(repository.to_string());
        args.push(destination.display().to_string());
        args
    }
}

impl Default for GitTemplateSource {
    fn default() -> Self {
        Self::new("master")
    }
}

impl TemplateSource for GitTemplateSource {
    #[instrument(skip(self, destination), fields(destination = %destination.display()))]
    fn fetch(&self, repository: &str, destination: &Path, dev: bool) -> GantryResult<()> {
        super::run(&self.program, &self.args(repository, destination, dev), None)?;
        info!("template cloned");
        Ok(())
    }
}
