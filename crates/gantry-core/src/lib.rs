//! Gantry Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Gantry
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           gantry-cli (CLI)              │
//! │   (flags, prompts, progress output)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (DriverSelector, DriverInstaller,       │
//! │  ScaffoldService)                       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (PackageManager, Prompter, FileMutator) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     gantry-adapters (Infrastructure)    │
//! │ (ManifestPatcher, NamespaceRewriter,    │
//! │  ProcessPackageManager, ToolchainTasks) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Data)        │
//! │   (Module, Driver, Selection, Registry) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gantry_core::{
//!     application::{DriverSelector, DriverInstaller},
//!     domain::{InstalledSet, MODULE_REGISTRY, ProvidedDrivers},
//! };
//!
//! // 1. Resolve every module (flags first, prompts otherwise)
//! let selection = selector.resolve_all(MODULE_REGISTRY, |_| ProvidedDrivers::Absent)?;
//!
//! // 2. Install with a fresh per-run installed set
//! let mut installed = InstalledSet::new();
//! installer.apply_all(MODULE_REGISTRY, &selection, "latest", project, &mut installed)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DriverInstaller, DriverSelector, ScaffoldRequest, ScaffoldService,
        ports::{FileMutator, InstallReporter, PackageManager, Prompter},
    };
    pub use crate::domain::{
        ChoiceOption, Driver, FileMutation, InstalledSet, MODULE_REGISTRY, Module, Namespace,
        ProjectName, ProvidedDrivers, Selection,
    };
    pub use crate::error::{GantryError, GantryResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
