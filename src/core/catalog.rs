//! Component catalog (cogci.toml) parsing and validation
//!
//! The catalog is the static list of known components, their direct
//! dependencies and their tier. Declaration order matters: it is the
//! tie-break for every later ordering decision.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use crate::config::defaults::{
    DEFAULT_CONTAINER_IMAGE, DEFAULT_DESCRIPTOR_FILE, DEFAULT_HINTS_FILE, DEFAULT_WORKFLOW_NAME,
    DEFAULT_WORKFLOW_PATH,
};
use crate::config::urls::DEFAULT_REPOSITORY_BASE;
use crate::error::CatalogError;
use crate::infra::filesystem;

/// Whether a component is required for a healthy build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Required; skipping it degrades the plan
    #[default]
    Core,
    /// Extra; skipped without warning when unavailable
    Optional,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// A cataloged component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Component name, also its directory name under the root
    pub name: String,

    /// Direct dependencies, in declaration order
    #[serde(default, rename = "depends")]
    pub dependencies: Vec<String>,

    /// Component tier
    #[serde(default)]
    pub tier: Tier,
}

impl ComponentSpec {
    /// Create a core-tier spec
    pub fn core(name: &str, dependencies: &[&str]) -> Self {
        Self::with_tier(name, dependencies, Tier::Core)
    }

    /// Create an optional-tier spec
    pub fn optional(name: &str, dependencies: &[&str]) -> Self {
        Self::with_tier(name, dependencies, Tier::Optional)
    }

    fn with_tier(name: &str, dependencies: &[&str], tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
            tier,
        }
    }
}

/// Validated, ordered set of component specs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    specs: Vec<ComponentSpec>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate `specs` and build a catalog
    ///
    /// Rejects duplicate names, malformed names and self-dependencies.
    /// Repeated dependency names on one component are collapsed.
    pub fn new(specs: Vec<ComponentSpec>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(specs.len());
        let mut validated = Vec::with_capacity(specs.len());

        for mut spec in specs {
            validate_name(&spec.name)?;
            if index.contains_key(&spec.name) {
                return Err(CatalogError::DuplicateComponent { name: spec.name });
            }

            let mut seen = HashSet::new();
            let mut dependencies = Vec::with_capacity(spec.dependencies.len());
            for dep in spec.dependencies.drain(..) {
                validate_name(&dep)?;
                if dep == spec.name {
                    return Err(CatalogError::SelfDependency { name: spec.name });
                }
                if seen.insert(dep.clone()) {
                    dependencies.push(dep);
                }
            }
            spec.dependencies = dependencies;

            index.insert(spec.name.clone(), validated.len());
            validated.push(spec);
        }

        Ok(Self {
            specs: validated,
            index,
        })
    }

    /// The built-in OpenCog component catalog
    ///
    /// cogutil → atomspace → cogserver → opencog form the core chain; the
    /// rest build on top of opencog and are optional.
    pub fn builtin() -> Self {
        let specs = vec![
            ComponentSpec::core("cogutil", &[]),
            ComponentSpec::core("atomspace", &["cogutil"]),
            ComponentSpec::core("cogserver", &["atomspace"]),
            ComponentSpec::core("opencog", &["cogserver"]),
            ComponentSpec::optional("asmoses", &["opencog"]),
            ComponentSpec::optional("ure", &["opencog"]),
            ComponentSpec::optional("unify", &["opencog"]),
            ComponentSpec::optional("attention", &["opencog"]),
            ComponentSpec::optional("miner", &["opencog", "ure"]),
            ComponentSpec::optional("pln", &["ure", "miner"]),
        ];
        let index = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name.clone(), i))
            .collect();
        Self { specs, index }
    }

    /// Specs in declaration order
    pub fn specs(&self) -> &[ComponentSpec] {
        &self.specs
    }

    /// Look up a spec by name
    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    /// Declaration index of a component
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the catalog knows this name
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of cataloged components
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Dependencies that name no cataloged component, as `(component, dependency)`
    pub fn unknown_dependencies(&self) -> Vec<(String, String)> {
        self.specs
            .iter()
            .flat_map(|spec| {
                spec.dependencies
                    .iter()
                    .filter(|dep| !self.contains(dep))
                    .map(|dep| (spec.name.clone(), dep.clone()))
            })
            .collect()
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid component name pattern")
    })
}

/// Check that a name is usable as a directory name and workflow identifier
pub fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(CatalogError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Tool settings stored alongside the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// File that marks a component directory as buildable
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Per-component hints manifest; empty disables hints
    #[serde(default = "default_hints_file")]
    pub hints_file: String,

    /// Base URL components are cloned from
    #[serde(default = "default_repository_base")]
    pub repository_base: String,

    /// Workflow output path, relative to the root
    #[serde(default = "default_workflow_path")]
    pub workflow_path: String,

    /// Workflow display name
    #[serde(default = "default_workflow_name")]
    pub workflow_name: String,

    /// Container image for the CI job
    #[serde(default = "default_container_image")]
    pub container_image: String,
}

fn default_descriptor() -> String {
    DEFAULT_DESCRIPTOR_FILE.to_string()
}

fn default_hints_file() -> String {
    DEFAULT_HINTS_FILE.to_string()
}

fn default_repository_base() -> String {
    DEFAULT_REPOSITORY_BASE.to_string()
}

fn default_workflow_path() -> String {
    DEFAULT_WORKFLOW_PATH.to_string()
}

fn default_workflow_name() -> String {
    DEFAULT_WORKFLOW_NAME.to_string()
}

fn default_container_image() -> String {
    DEFAULT_CONTAINER_IMAGE.to_string()
}

impl Settings {
    /// Hints manifest name, if hints are enabled
    pub fn hints_file(&self) -> Option<&str> {
        Some(self.hints_file.as_str()).filter(|f| !f.is_empty())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            descriptor: default_descriptor(),
            hints_file: default_hints_file(),
            repository_base: default_repository_base(),
            workflow_path: default_workflow_path(),
            workflow_name: default_workflow_name(),
            container_image: default_container_image(),
        }
    }
}

/// On-disk catalog file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogFile {
    /// Tool settings
    #[serde(default)]
    pub settings: Settings,

    /// Components in declaration order
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentSpec>,
}

impl CatalogFile {
    /// Parse a catalog file from TOML
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = filesystem::read_file(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        toml::to_string_pretty(self).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Validate the components and split into catalog and settings
    pub fn into_parts(self) -> Result<(Catalog, Settings), CatalogError> {
        let catalog = Catalog::new(self.components)?;
        Ok((catalog, self.settings))
    }
}
