//! Component discovery
//!
//! Decides which cataloged components are actually present under the
//! component root. The probe is a trait so the engine can run against
//! synthetic trees.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::catalog::{validate_name, Catalog, ComponentSpec, Tier};
use crate::error::{CatalogError, DiscoveryError, FilesystemError};

/// Answers "is this component buildable here?"
pub trait PresenceProbe {
    /// Fail if the root itself cannot be read
    fn check_root(&self, root: &Path) -> Result<(), DiscoveryError>;

    /// Whether `<root>/<name>` holds a build descriptor
    fn exists(&self, root: &Path, name: &str) -> bool;

    /// Raw contents of the component's hints manifest, if it has one
    fn hints(&self, root: &Path, name: &str) -> Result<Option<String>, FilesystemError>;
}

/// A cataloged component confirmed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentComponent {
    /// Catalog entry
    pub spec: ComponentSpec,
    /// Component directory
    pub path: PathBuf,
    /// Extra dependencies from the hints manifest, not already in `spec`
    pub hints: Vec<String>,
}

impl PresentComponent {
    /// Component name
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Component tier
    pub fn tier(&self) -> Tier {
        self.spec.tier
    }

    /// Catalog dependencies followed by hinted ones
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.spec
            .dependencies
            .iter()
            .chain(self.hints.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct HintsManifest {
    #[serde(default)]
    depends: Vec<String>,
}

/// Find the present components, in catalog order
pub fn discover(
    root: &Path,
    catalog: &Catalog,
    probe: &dyn PresenceProbe,
) -> Result<Vec<PresentComponent>, DiscoveryError> {
    probe.check_root(root)?;

    let mut present = Vec::new();
    for spec in catalog.specs() {
        if !probe.exists(root, &spec.name) {
            match spec.tier {
                Tier::Core => {
                    tracing::info!("Core component '{}' not found or not buildable", spec.name);
                }
                Tier::Optional => {
                    tracing::debug!("Optional component '{}' not found, skipping", spec.name);
                }
            }
            continue;
        }

        let hints = read_hints(root, spec, probe)?;
        tracing::debug!("Found component '{}'", spec.name);
        present.push(PresentComponent {
            spec: spec.clone(),
            path: root.join(&spec.name),
            hints,
        });
    }

    tracing::info!(
        "Discovered {} of {} cataloged components",
        present.len(),
        catalog.len()
    );
    Ok(present)
}

fn read_hints(
    root: &Path,
    spec: &ComponentSpec,
    probe: &dyn PresenceProbe,
) -> Result<Vec<String>, CatalogError> {
    let malformed = |error: String| CatalogError::MalformedHints {
        component: spec.name.clone(),
        path: root.join(&spec.name),
        error,
    };

    let content = probe
        .hints(root, &spec.name)
        .map_err(|e| malformed(e.to_string()))?;
    let Some(content) = content else {
        return Ok(Vec::new());
    };

    let manifest: HintsManifest = toml::from_str(&content).map_err(|e| malformed(e.to_string()))?;

    let mut hints: Vec<String> = Vec::new();
    for dep in manifest.depends {
        validate_name(&dep)?;
        if dep == spec.name {
            return Err(CatalogError::SelfDependency {
                name: spec.name.clone(),
            });
        }
        if !spec.dependencies.contains(&dep) && !hints.contains(&dep) {
            hints.push(dep);
        }
    }

    if !hints.is_empty() {
        tracing::debug!("Component '{}' hints extra dependencies: {}", spec.name, hints.join(", "));
    }
    Ok(hints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StaticProbe;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ComponentSpec::core("cogutil", &[]),
            ComponentSpec::core("atomspace", &["cogutil"]),
            ComponentSpec::optional("ure", &["atomspace", "unify"]),
            ComponentSpec::optional("unify", &["atomspace"]),
        ])
        .unwrap()
    }

    fn names(present: &[PresentComponent]) -> Vec<&str> {
        present.iter().map(PresentComponent::name).collect()
    }

    #[test]
    fn test_discover_keeps_catalog_order() {
        let probe = StaticProbe::new(&["unify", "ure", "cogutil", "atomspace"]);
        let present = discover(Path::new("/src"), &catalog(), &probe).unwrap();

        assert_eq!(names(&present), vec!["cogutil", "atomspace", "ure", "unify"]);
        assert_eq!(present[0].path, Path::new("/src/cogutil"));
    }

    #[test]
    fn test_discover_excludes_absent_components() {
        let probe = StaticProbe::new(&["cogutil", "ure"]);
        let present = discover(Path::new("/src"), &catalog(), &probe).unwrap();

        assert_eq!(names(&present), vec!["cogutil", "ure"]);
    }

    #[test]
    fn test_discover_ignores_uncataloged_directories() {
        let probe = StaticProbe::new(&["cogutil", "moses"]);
        let present = discover(Path::new("/src"), &catalog(), &probe).unwrap();

        assert_eq!(names(&present), vec!["cogutil"]);
    }

    #[test]
    fn test_discover_unreadable_root_fails() {
        let probe = StaticProbe::new(&["cogutil"]).unreadable();
        let err = discover(Path::new("/src"), &catalog(), &probe).unwrap_err();

        assert!(matches!(err, DiscoveryError::RootUnreadable { .. }));
    }

    #[test]
    fn test_discover_merges_hints_after_catalog_dependencies() {
        let probe = StaticProbe::new(&["cogutil", "atomspace"])
            .with_hints("atomspace", "depends = [\"cogutil\", \"cogserver\", \"cogserver\"]");
        let present = discover(Path::new("/src"), &catalog(), &probe).unwrap();

        assert_eq!(present[1].hints, vec!["cogserver"]);
        assert_eq!(
            present[1].dependencies().collect::<Vec<_>>(),
            vec!["cogutil", "cogserver"]
        );
    }

    #[test]
    fn test_discover_rejects_self_hint() {
        let probe = StaticProbe::new(&["cogutil"]).with_hints("cogutil", "depends = [\"cogutil\"]");
        let err = discover(Path::new("/src"), &catalog(), &probe).unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::Catalog(CatalogError::SelfDependency { ref name }) if name == "cogutil"
        ));
    }

    #[test]
    fn test_discover_rejects_malformed_hints() {
        let probe = StaticProbe::new(&["cogutil"]).with_hints("cogutil", "depends = 3");
        let err = discover(Path::new("/src"), &catalog(), &probe).unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::Catalog(CatalogError::MalformedHints { .. })
        ));
    }

    #[test]
    fn test_discover_empty_catalog() {
        let probe = StaticProbe::new(&["cogutil"]);
        let present = discover(Path::new("/src"), &Catalog::new(vec![]).unwrap(), &probe).unwrap();
        assert!(present.is_empty());
    }
}
