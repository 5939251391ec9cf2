//! Run-scoped driver choices and install bookkeeping.
//!
//! Neither type is global: a scaffold run creates its own [`Selection`] and
//! [`InstalledSet`] and drops them when it finishes.

use std::collections::HashSet;

use crate::domain::driver::Module;

/// What the caller supplied for one module before any prompting happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProvidedDrivers {
    /// Nothing supplied; resolution falls back to an interactive prompt.
    #[default]
    Absent,
    /// One value, for single-choice modules.
    Single(String),
    /// A list, for multi-choice modules.
    Many(Vec<String>),
}

impl ProvidedDrivers {
    /// Build from an optional flag value; an empty string counts as absent.
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Single(v),
            _ => Self::Absent,
        }
    }

    /// Build from a list flag. Empty entries are dropped and an empty list
    /// counts as absent.
    pub fn from_list(values: Vec<String>) -> Self {
        let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        if values.is_empty() {
            Self::Absent
        } else {
            Self::Many(values)
        }
    }

    /// Every supplied value, flattened.
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(v) => vec![v.clone()],
            Self::Many(vs) => vs.clone(),
        }
    }
}

/// Chosen driver signatures per module, in the order modules were resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(&'static str, Vec<String>)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the choice for a module, replacing any earlier one.
    pub fn set(&mut self, module: &Module, chosen: Vec<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == module.name) {
            entry.1 = chosen;
        } else {
            self.entries.push((module.name, chosen));
        }
    }

    /// Chosen signatures for a module; empty if it was never resolved.
    pub fn chosen(&self, module: &Module) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| *name == module.name)
            .map(|(_, chosen)| chosen.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, module: &Module, signature: &str) -> bool {
        self.chosen(module).iter().any(|s| s == signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.entries.iter().map(|(n, c)| (*n, c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every recorded choice.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Backing packages already materialized during the current run.
///
/// A package in this set is never installed again in the same run, even if
/// another module selects a driver that shares it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSet {
    packages: HashSet<String>,
}

impl InstalledSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    /// Flag a package as installed. Returns `false` if it already was.
    pub fn mark(&mut self, package: &str) -> bool {
        self.packages.insert(package.to_string())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Clear the set so a later run in the same process installs afresh.
    pub fn reset(&mut self) {
        self.packages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::{CACHE, STORAGE};

    #[test]
    fn provided_from_empty_option_is_absent() {
        assert_eq!(ProvidedDrivers::from_option(Some(String::new())), ProvidedDrivers::Absent);
        assert_eq!(ProvidedDrivers::from_option(None), ProvidedDrivers::Absent);
        assert_eq!(
            ProvidedDrivers::from_option(Some("redis".into())),
            ProvidedDrivers::Single("redis".into())
        );
    }

    #[test]
    fn provided_from_empty_list_is_absent() {
        assert_eq!(ProvidedDrivers::from_list(vec![]), ProvidedDrivers::Absent);
        assert_eq!(
            ProvidedDrivers::from_list(vec![String::new()]),
            ProvidedDrivers::Absent
        );
        assert_eq!(
            ProvidedDrivers::from_list(vec!["s3".into(), String::new()]),
            ProvidedDrivers::Many(vec!["s3".into()])
        );
    }

    #[test]
    fn selection_replaces_existing_entry_in_place() {
        let mut sel = Selection::new();
        sel.set(&CACHE, vec!["memory".into()]);
        sel.set(&STORAGE, vec!["local".into(), "s3".into()]);
        sel.set(&CACHE, vec!["redis".into()]);

        let order: Vec<_> = sel.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["cache", "storage"]);
        assert!(sel.contains(&CACHE, "redis"));
        assert!(!sel.contains(&CACHE, "memory"));
        assert!(sel.contains(&STORAGE, "s3"));
    }

    #[test]
    fn unresolved_module_has_no_choice() {
        assert!(Selection::new().chosen(&CACHE).is_empty());
    }

    #[test]
    fn installed_set_marks_once_and_resets() {
        let mut set = InstalledSet::new();
        assert!(set.mark("pkg"));
        assert!(!set.mark("pkg"));
        assert_eq!(set.len(), 1);

        set.reset();
        assert!(set.is_empty());
        assert!(!set.contains("pkg"));
    }
}
