//! Project-wide namespace rewriting.
//!
//! A freshly cloned template declares its root namespace in a manifest file
//! and qualifies every import with it:
//!
//! ```text
//! go.mod        module skeleton
//! main.go       import "skeleton/bootstrap"
//! ```
//!
//! [`NamespaceRewriter`] walks the tree and swaps the placeholder for the
//! user's namespace in both places. Files are buffered whole and only written
//! back when a line actually changed, so a second run leaves every mtime alone.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use regex::{Captures, Regex};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use gantry_core::{
    application::{ApplicationError, NamespaceRewrite, RewriteReport},
    domain::Namespace,
    error::{Context, GantryResult},
};

/// Which files hold the namespace and how it is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRules {
    /// Namespace the template ships with.
    pub placeholder: String,
    /// Extension of the manifest that declares the namespace, with the dot.
    pub manifest_extension: String,
    /// Extension of source files whose imports are qualified with it.
    pub source_extension: String,
    /// Keyword opening the declaration line in the manifest.
    pub declaration_keyword: String,
}

impl Default for NamespaceRules {
    fn default() -> Self {
        Self {
            placeholder: "skeleton".into(),
            manifest_extension: ".mod".into(),
            source_extension: ".go".into(),
            declaration_keyword: "module".into(),
        }
    }
}

impl NamespaceRules {
    /// Rules for a template that ships with a different placeholder.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Manifest,
    Source,
}

/// Rewrites the template namespace across a project tree.
#[derive(Debug, Clone)]
pub struct NamespaceRewriter {
    rules: NamespaceRules,
    declaration: Regex,
    import: Regex,
}

impl NamespaceRewriter {
    pub fn new(rules: NamespaceRules) -> GantryResult<Self> {
        let placeholder = regex::escape(&rules.placeholder);
        let declaration = Regex::new(&format!(
            r"^{}\s+{placeholder}\b",
            regex::escape(&rules.declaration_keyword)
        ))
        .context("building namespace declaration pattern")?;
        let import = Regex::new(&format!(r#""{placeholder}/([^"]+)""#))
            .context("building namespace import pattern")?;

        Ok(Self {
            rules,
            declaration,
            import,
        })
    }

    pub fn rules(&self) -> &NamespaceRules {
        &self.rules
    }

    fn classify(&self, path: &Path) -> Option<FileKind> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(&self.rules.manifest_extension) {
            Some(FileKind::Manifest)
        } else if name.ends_with(&self.rules.source_extension) {
            Some(FileKind::Source)
        } else {
            None
        }
    }

    fn rewrite_line(&self, kind: FileKind, line: &str, namespace: &str) -> String {
        match kind {
            FileKind::Manifest => match self.declaration.find(line) {
                Some(found) => format!(
                    "{} {namespace}{}",
                    self.rules.declaration_keyword,
                    &line[found.end()..]
                ),
                None => line.to_string(),
            },
            FileKind::Source => self
                .import
                .replace_all(line, |caps: &Captures<'_>| {
                    format!("\"{namespace}/{}\"", &caps[1])
                })
                .into_owned(),
        }
    }

    /// Namespace declared by the first manifest that has a declaration line.
    fn declared_namespace(&self, manifests: &[&Path]) -> GantryResult<Option<String>> {
        for path in manifests {
            let source = fs::read_to_string(path).map_err(|e| ApplicationError::io(path, &e))?;
            let declared = source.lines().find_map(|line| {
                let rest = line.strip_prefix(self.rules.declaration_keyword.as_str())?;
                if !rest.starts_with(char::is_whitespace) {
                    return None;
                }
                rest.split_whitespace().next().map(str::to_string)
            });
            if declared.is_some() {
                return Ok(declared);
            }
        }
        Ok(None)
    }

    /// Rewrite one file. Returns whether it was written.
    fn rewrite_file(&self, path: &Path, kind: FileKind, namespace: &str) -> GantryResult<bool> {
        let source = fs::read_to_string(path).map_err(|e| ApplicationError::io(path, &e))?;

        let mut changed = false;
        let lines: Vec<String> = source
            .split('\n')
            .map(|line| {
                let rewritten = self.rewrite_line(kind, line, namespace);
                changed |= rewritten != line;
                rewritten
            })
            .collect();

        if changed {
            fs::write(path, lines.join("\n")).map_err(|e| ApplicationError::io(path, &e))?;
            debug!(path = %path.display(), "namespace rewritten");
        }
        Ok(changed)
    }
}

impl NamespaceRewrite for NamespaceRewriter {
    fn placeholder(&self) -> String {
        self.rules.placeholder.clone()
    }

    #[instrument(skip_all, fields(root = %root.display(), namespace = %namespace))]
    fn rewrite(&self, root: &Path, namespace: &Namespace) -> GantryResult<RewriteReport> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(walk_error)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(kind) = self.classify(entry.path()) {
                files.push((entry.into_path(), kind));
            }
        }

        let mut report = RewriteReport {
            scanned: files.len(),
            rewritten: 0,
        };

        // The manifest decides for the whole tree: once it declares the target
        // namespace every import has already been qualified with it.
        let manifests: Vec<&Path> = files
            .iter()
            .filter(|(_, kind)| *kind == FileKind::Manifest)
            .map(|(path, _)| path.as_path())
            .collect();
        if self.declared_namespace(&manifests)?.as_deref() == Some(namespace.as_str()) {
            info!(
                scanned = report.scanned,
                "namespace already declared, nothing to rewrite"
            );
            return Ok(report);
        }

        for (path, kind) in &files {
            if self.rewrite_file(path, *kind, namespace.as_str())? {
                report.rewritten += 1;
            }
        }

        info!(
            scanned = report.scanned,
            rewritten = report.rewritten,
            "namespace rewrite finished"
        );
        Ok(report)
    }
}

fn walk_error(err: walkdir::Error) -> ApplicationError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);
    let kind = err.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    ApplicationError::Filesystem {
        path,
        kind,
        reason: err.to_string(),
    }
}
