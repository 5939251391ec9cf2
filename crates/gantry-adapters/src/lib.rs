//! Infrastructure adapters for Gantry.
//!
//! This crate implements the ports defined in `gantry-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod manifest;
pub mod namespace;
pub mod process;
pub mod project_editor;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use manifest::ManifestPatcher;
pub use namespace::{NamespaceRewriter, NamespaceRules};
pub use process::{
    GitTemplateSource, PackageManagerCommands, ProcessPackageManager, ToolchainCommands,
    ToolchainTasks,
};
pub use project_editor::LocalProjectEditor;
