//! [`FileMutator`] that edits files of a generated project on disk.

use std::path::Path;

use tracing::{debug, instrument};

use gantry_core::{application::FileMutator, domain::FileMutation, error::GantryResult};

use crate::manifest::ManifestPatcher;

/// Applies driver file mutations relative to the project root.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProjectEditor {
    patcher: ManifestPatcher,
}

impl LocalProjectEditor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileMutator for LocalProjectEditor {
    #[instrument(skip_all, fields(file = mutation.file()))]
    fn apply(&self, mutation: &FileMutation, project: &Path) -> GantryResult<()> {
        let path = project.join(mutation.file());

        match *mutation {
            FileMutation::EnvValues { values, .. } => {
                self.patcher.patch(&path, values.iter().copied())?;
            }
            FileMutation::ConfigEntry { key, value, .. } => {
                self.patcher.replace_config_entry(&path, key, value)?;
            }
        }

        debug!("file mutation applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io};

    use super::*;

    #[test]
    fn env_values_land_in_project_env() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "QUEUE_CONNECTION=sync\n").unwrap();

        LocalProjectEditor::new()
            .apply(
                &FileMutation::EnvValues {
                    file: ".env",
                    values: &[("QUEUE_CONNECTION", "redis")],
                },
                dir.path(),
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(".env")).unwrap(),
            "QUEUE_CONNECTION=redis\n"
        );
    }

    #[test]
    fn missing_target_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalProjectEditor::new()
            .apply(
                &FileMutation::ConfigEntry {
                    file: "config/http.go",
                    key: "default",
                    value: "\"fiber\"",
                },
                dir.path(),
            )
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }
}
