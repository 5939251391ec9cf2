//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use gantry_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GantryError, GantryResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_all(&self, path: &Path) -> GantryResult<()> {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(map_io_error(path, &e)),
        };

        if metadata.is_dir() {
            std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, &e))
        } else {
            std::fs::remove_file(path).map_err(|e| map_io_error(path, &e))
        }
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GantryResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, &e))
    }

    fn set_executable(&self, path: &Path) -> GantryResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, &e))?;
            let mut perms = metadata.permissions();
            perms.set_mode(perms.mode() | 0o755);
            std::fs::set_permissions(path, perms).map_err(|e| map_io_error(path, &e))?;
        }
        #[cfg(not(unix))]
        {
            let _ = path;
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, e: &io::Error) -> GantryError {
    ApplicationError::io(path, e).into()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn remove_all_handles_dirs_files_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(git.join("objects")).unwrap();
        fs::write(git.join("HEAD"), "ref").unwrap();
        let file = dir.path().join(".github");
        fs::write(&file, "").unwrap();

        let local = LocalFilesystem::new();
        local.remove_all(&git).unwrap();
        local.remove_all(&file).unwrap();
        local.remove_all(&dir.path().join("absent")).unwrap();

        assert!(!local.exists(&git));
        assert!(!local.exists(&file));
    }

    #[test]
    fn copy_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let example = dir.path().join(".env.example");
        let env = dir.path().join(".env");
        fs::write(&example, "APP_NAME=Gantry\n").unwrap();
        fs::write(&env, "stale").unwrap();

        LocalFilesystem::new().copy_file(&example, &env).unwrap();

        assert_eq!(fs::read_to_string(env).unwrap(), "APP_NAME=Gantry\n");
    }

    #[test]
    fn copy_missing_source_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .copy_file(&dir.path().join(".env.example"), &dir.path().join(".env"))
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn set_executable_adds_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let launcher = dir.path().join("artisan");
        fs::write(&launcher, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&launcher, fs::Permissions::from_mode(0o644)).unwrap();

        LocalFilesystem::new().set_executable(&launcher).unwrap();

        let mode = fs::metadata(&launcher).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
