//! Test utilities
//!
//! An in-memory presence probe and proptest generators for synthetic
//! catalogs.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::discovery::PresenceProbe;
use crate::error::{DiscoveryError, FilesystemError};

/// Presence probe over a fixed set of component names
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    present: HashSet<String>,
    hints: HashMap<String, String>,
    unreadable: bool,
    root_checks: Cell<usize>,
}

impl StaticProbe {
    /// Probe reporting exactly `present` as buildable
    pub fn new(present: &[&str]) -> Self {
        Self {
            present: present.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Give a component a hints manifest
    #[must_use]
    pub fn with_hints(mut self, name: &str, content: &str) -> Self {
        self.hints.insert(name.to_string(), content.to_string());
        self
    }

    /// Make the root unreadable
    #[must_use]
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// How many times discovery has started against this probe
    pub fn root_checks(&self) -> usize {
        self.root_checks.get()
    }
}

impl PresenceProbe for StaticProbe {
    fn check_root(&self, root: &Path) -> Result<(), DiscoveryError> {
        self.root_checks.set(self.root_checks.get() + 1);
        if self.unreadable {
            return Err(DiscoveryError::RootUnreadable {
                path: root.to_path_buf(),
                error: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    fn exists(&self, _root: &Path, name: &str) -> bool {
        self.present.contains(name)
    }

    fn hints(&self, _root: &Path, name: &str) -> Result<Option<String>, FilesystemError> {
        Ok(self.hints.get(name).cloned())
    }
}

pub mod generators {
    use proptest::prelude::*;

    use crate::core::catalog::{ComponentSpec, Tier};

    /// Generate a valid component name
    pub fn component_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,15}"
    }

    /// Generate a tier
    pub fn tier() -> impl Strategy<Value = Tier> {
        prop_oneof![Just(Tier::Core), Just(Tier::Optional)]
    }

    /// Generate an acyclic catalog of up to `max` components
    ///
    /// Component `c<i>` may only depend on `c<j>` with `j < i`, and the
    /// declaration order is shuffled so it rarely matches the dependency order.
    pub fn acyclic_catalog(max: usize) -> impl Strategy<Value = Vec<ComponentSpec>> {
        (1..=max)
            .prop_flat_map(|count| {
                (0..count)
                    .map(|i| (prop::collection::vec(any::<bool>(), i), tier()))
                    .collect::<Vec<_>>()
            })
            .prop_map(|nodes| {
                nodes
                    .into_iter()
                    .enumerate()
                    .map(|(i, (edges, tier))| ComponentSpec {
                        name: format!("c{i}"),
                        dependencies: edges
                            .iter()
                            .enumerate()
                            .filter(|&(_, &linked)| linked)
                            .map(|(j, _)| format!("c{j}"))
                            .collect(),
                        tier,
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    /// Generate a catalog together with a presence mask over it
    pub fn catalog_with_presence(
        max: usize,
    ) -> impl Strategy<Value = (Vec<ComponentSpec>, Vec<bool>)> {
        acyclic_catalog(max).prop_flat_map(|specs| {
            let len = specs.len();
            (Just(specs), prop::collection::vec(any::<bool>(), len))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::catalog::Catalog;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_component_name_generator(name in component_name()) {
            prop_assert!(crate::core::catalog::validate_name(&name).is_ok());
        }

        #[test]
        fn test_acyclic_catalog_generator_is_valid(specs in acyclic_catalog(10)) {
            let catalog = Catalog::new(specs).unwrap();
            prop_assert!(catalog.unknown_dependencies().is_empty());
        }
    }
}
