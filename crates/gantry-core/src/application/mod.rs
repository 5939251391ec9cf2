//! Application layer for Gantry.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (DriverSelector, DriverInstaller, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! catalog data itself. Modules and drivers live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DriverInstaller, DriverSelector, ProjectLayout, ScaffoldRequest, ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    FileMutator, Filesystem, InstallReporter, NamespaceRewrite, PackageManager, ProjectTasks,
    Prompter, RewriteReport, TemplateSource,
};

pub use error::ApplicationError;
