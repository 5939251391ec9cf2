//! Core domain layer for Gantry.
//!
//! This module contains pure data and rules with no I/O. Installing
//! packages, prompting, and touching files all happen behind the ports in
//! `crate::application::ports`.
//!
//! - **Immutable catalog**: modules and drivers are `'static` registry data
//! - **Run-scoped state**: [`Selection`] and [`InstalledSet`] are created per run
//! - **No external crates**: only std, `thiserror`, and `serde` derives

pub mod driver;
pub mod error;
pub mod registry;
pub mod selection;
pub mod value_objects;

pub use driver::{ChoiceOption, Driver, FileMutation, Module};
pub use error::{DomainError, ErrorCategory};
pub use registry::{MODULE_REGISTRY, find_module};
pub use selection::{InstalledSet, ProvidedDrivers, Selection};
pub use value_objects::{Namespace, ProjectName};
