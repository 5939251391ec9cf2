//! Driver selection.
//!
//! Resolves which drivers are active for each module, either from values the
//! caller already has (CLI flags) or by asking through the [`Prompter`] port.
//! Nothing here has side effects beyond the prompt, so a failure part-way
//! through needs no cleanup.

use tracing::{debug, instrument};

use crate::{
    application::ports::Prompter,
    domain::{Module, ProvidedDrivers, Selection},
    error::GantryResult,
};

/// Resolves driver choices for capability modules.
pub struct DriverSelector {
    prompter: Box<dyn Prompter>,
}

impl DriverSelector {
    pub fn new(prompter: Box<dyn Prompter>) -> Self {
        Self { prompter }
    }

    /// Resolve the chosen drivers for one module.
    ///
    /// Supplied values are validated against the registry. When nothing was
    /// supplied, the prompter is asked, defaulting to the module's default
    /// driver. The returned list is never empty on success.
    #[instrument(skip_all, fields(module = module.name))]
    pub fn resolve(&self, module: &Module, provided: &ProvidedDrivers) -> GantryResult<Vec<String>> {
        let chosen = if module.supports_multiple {
            self.resolve_multiple(module, provided)?
        } else {
            self.resolve_single(module, provided)?
        };

        debug!(chosen = ?chosen, "drivers resolved");
        Ok(chosen)
    }

    /// Resolve every module in order, stopping at the first failure.
    ///
    /// `provided` maps a module name to whatever the caller supplied for it.
    pub fn resolve_all<F>(&self, modules: &[&Module], mut provided: F) -> GantryResult<Selection>
    where
        F: FnMut(&Module) -> ProvidedDrivers,
    {
        let mut selection = Selection::new();
        for module in modules {
            let chosen = self.resolve(module, &provided(module))?;
            selection.set(module, chosen);
        }
        Ok(selection)
    }

    fn resolve_single(&self, module: &Module, provided: &ProvidedDrivers) -> GantryResult<Vec<String>> {
        // A list handed to a single-choice module uses only its first value.
        if let Some(first) = provided.values().into_iter().next() {
            module.validate(&[first.as_str()])?;
            return Ok(vec![first]);
        }

        let driver = self.prompter.choice(
            &format!("Which {} driver will your application use?", module.name),
            &module.choice_options(),
            module.default_driver,
        )?;

        Ok(vec![driver])
    }

    fn resolve_multiple(
        &self,
        module: &Module,
        provided: &ProvidedDrivers,
    ) -> GantryResult<Vec<String>> {
        let values = provided.values();
        if !values.is_empty() {
            module.validate(&values)?;
            return Ok(values);
        }

        let default = vec![module.default_driver.to_string()];
        let drivers = self.prompter.multi_select(
            &format!("Which {} drivers will your application use?", module.name),
            &module.choice_options(),
            &default,
        )?;

        if drivers.is_empty() {
            debug!("empty answer, keeping the default driver");
            return Ok(default);
        }
        Ok(drivers)
    }
}
