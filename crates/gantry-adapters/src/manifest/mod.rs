//! Line-oriented manifest patching.
//!
//! Two shapes of generated file are edited in place:
//!
//! - **Env files**: `KEY=value` lines with `#` comments. [`ManifestPatcher::patch`]
//!   replaces known keys where they stand and appends unknown ones.
//! - **Config blocks**: `"key": value,` entries inside generated source.
//!   [`ManifestPatcher::replace_config_entry`] swaps one entry's value.
//!
//! Both read the whole file, edit the lines in memory, and write the result
//! back with a single call.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use gantry_core::{
    application::ApplicationError,
    error::{Context, GantryResult},
};

/// Edits env files and configuration blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestPatcher;

impl ManifestPatcher {
    pub fn new() -> Self {
        Self
    }

    /// Set `key=value` pairs in the env file at `path`.
    ///
    /// Existing keys are rewritten on their own line (the last occurrence if a
    /// key repeats); missing keys are appended in iteration order. Values that
    /// contain whitespace are double-quoted. Comment and blank lines are left
    /// exactly as they were.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn patch<I, K, V>(&self, path: &Path, replacements: I) -> GantryResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let source = read(path)?;
        let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();

        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, line) in lines.iter().enumerate() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, _)) = line.split_once('=') {
                positions.insert(key.to_string(), index);
            }
        }

        for (key, value) in replacements {
            let (key, value) = (key.as_ref(), value.as_ref());
            let entry = format!("{key}={}", quote_if_spaced(value));

            match positions.get(key) {
                Some(&index) => lines[index] = entry,
                None => {
                    positions.insert(key.to_string(), lines.len());
                    lines.push(entry);
                }
            }
        }

        debug!(keys = positions.len(), "env file patched");
        write(path, &lines.join("\n"))
    }

    /// Replace the value of the first `"key": value` entry in `path`.
    ///
    /// `value` is written verbatim, so string values must include their
    /// quotes. Indentation and the trailing comma are preserved. The file is
    /// not rewritten when the entry already holds `value`.
    #[instrument(skip_all, fields(path = %path.display(), key = key))]
    pub fn replace_config_entry(&self, path: &Path, key: &str, value: &str) -> GantryResult<()> {
        let source = read(path)?;

        let pattern = format!(
            r#"^(?P<indent>\s*)"{}"\s*:\s*(?P<value>.*?)(?P<comma>,?)(?P<trail>\s*(//.*)?)$"#,
            regex::escape(key)
        );
        let re = Regex::new(&pattern).context("building config entry pattern")?;

        let mut found = false;
        let mut changed = false;
        let lines: Vec<String> = source
            .split('\n')
            .map(|line| {
                if found {
                    return line.to_string();
                }
                let Some(caps) = re.captures(line) else {
                    return line.to_string();
                };
                found = true;

                let replaced = format!(
                    "{}\"{key}\": {value}{}{}",
                    &caps["indent"], &caps["comma"], &caps["trail"]
                );
                changed = replaced != line;
                replaced
            })
            .collect();

        if !found {
            return Err(ApplicationError::ConfigEntryNotFound {
                path: path.to_path_buf(),
                key: key.to_string(),
            }
            .into());
        }

        if changed {
            write(path, &lines.join("\n"))?;
        }
        Ok(())
    }
}

fn quote_if_spaced(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn read(path: &Path) -> GantryResult<String> {
    fs::read_to_string(path).map_err(|e| ApplicationError::io(path, &e).into())
}

fn write(path: &Path, content: &str) -> GantryResult<()> {
    fs::write(path, content).map_err(|e| ApplicationError::io(path, &e).into())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn env_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.env");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn patch_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestPatcher::new()
            .patch(&dir.path().join("notfound"), [("A", "b")])
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn patch_replaces_and_appends() {
        let (_dir, path) = env_file("FOO=bar\n#comment\nBAZ=qux");

        let replacements: HashMap<&str, &str> =
            HashMap::from([("FOO", "newbar"), ("BAZ", "newqux"), ("NEW", "new value")]);
        ManifestPatcher::new().patch(&path, replacements).unwrap();

        let out = fs::read_to_string(&path).unwrap();
        assert!(out.starts_with("FOO=newbar\n#comment\nBAZ=newqux\n"));
        assert!(out.lines().any(|l| l == "NEW=\"new value\""));
        assert!(!out.contains("FOO=bar\n"));
    }

    #[test]
    fn patch_last_duplicate_key_wins() {
        let (_dir, path) = env_file("KEY=one\nKEY=two\n");
        ManifestPatcher::new().patch(&path, [("KEY", "three")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "KEY=one\nKEY=three\n");
    }

    #[test]
    fn patch_ignores_commented_out_keys() {
        let (_dir, path) = env_file("#DB_HOST=old\nDB_PORT=5432");
        ManifestPatcher::new()
            .patch(&path, [("DB_HOST", ""), ("DB_PORT", "3306")])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#DB_HOST=old\nDB_PORT=3306\nDB_HOST="
        );
    }

    #[test]
    fn patch_twice_is_stable() {
        let (_dir, path) = env_file("CACHE_STORE=memory");
        let patcher = ManifestPatcher::new();
        patcher.patch(&path, [("CACHE_STORE", "redis"), ("X", "a b")]).unwrap();
        let once = fs::read_to_string(&path).unwrap();
        patcher.patch(&path, [("CACHE_STORE", "redis"), ("X", "a b")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), once);
    }

    const HTTP_CONFIG: &str = "package config\n\nfunc init() {\n\tconfig := facades.Config()\n\tconfig.Add(\"http\", map[string]any{\n\t\t// HTTP Driver\n\t\t\"default\": \"gin\",\n\t})\n}\n";

    #[test]
    fn replace_config_entry_keeps_indent_and_comma() {
        let (_dir, path) = env_file(HTTP_CONFIG);
        ManifestPatcher::new()
            .replace_config_entry(&path, "default", "\"fiber\"")
            .unwrap();

        let out = fs::read_to_string(&path).unwrap();
        assert!(out.contains("\t\t\"default\": \"fiber\",\n"));
        assert!(!out.contains("\"gin\""));
        assert!(out.contains("// HTTP Driver"));
    }

    #[test]
    fn replace_config_entry_only_first_match() {
        let (_dir, path) = env_file("\"default\": 1,\n\"default\": 2,");
        ManifestPatcher::new()
            .replace_config_entry(&path, "default", "9")
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "\"default\": 9,\n\"default\": 2,");
    }

    #[test]
    fn replace_config_entry_missing_key() {
        let (_dir, path) = env_file(HTTP_CONFIG);
        let err = ManifestPatcher::new()
            .replace_config_entry(&path, "engine", "\"fiber\"")
            .unwrap_err();
        assert!(err.to_string().contains("No 'engine' entry"));
    }

    #[test]
    fn replace_config_entry_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestPatcher::new()
            .replace_config_entry(&dir.path().join("config/http.go"), "default", "1")
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }
}
