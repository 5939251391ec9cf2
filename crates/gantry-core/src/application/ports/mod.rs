//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `gantry-adapters` and
//! `gantry-cli` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `PackageManager`: install/uninstall backing packages
//!   - `Prompter`: interactive choices
//!   - `FileMutator`: driver configuration edits
//!   - `InstallReporter`: user-visible progress
//!   - `TemplateSource`, `NamespaceRewrite`, `Filesystem`, `ProjectTasks`:
//!     scaffold steps

pub mod output;

pub use output::{
    FileMutator, Filesystem, InstallReporter, NamespaceRewrite, PackageManager, ProjectTasks,
    Prompter, RewriteReport, TemplateSource,
};

#[cfg(test)]
pub use output::{
    MockFileMutator, MockFilesystem, MockInstallReporter, MockNamespaceRewrite,
    MockPackageManager, MockProjectTasks, MockPrompter, MockTemplateSource,
};
