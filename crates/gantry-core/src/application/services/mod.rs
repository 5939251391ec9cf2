//! Application services (use case orchestrators).

mod installer;
mod scaffold;
mod selector;

pub use installer::DriverInstaller;
pub use scaffold::{ProjectLayout, ScaffoldRequest, ScaffoldService};
pub use selector::DriverSelector;
