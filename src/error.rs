//! Error types for cogci
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog errors
///
/// Everything here is structural: the run aborts before a plan is produced.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two catalog entries share a name
    #[error("Invalid catalog: component '{name}' is declared more than once")]
    DuplicateComponent { name: String },

    /// A component lists itself as a dependency
    #[error("Invalid catalog: component '{name}' depends on itself")]
    SelfDependency { name: String },

    /// Component or dependency name is empty or malformed
    #[error("Invalid catalog: '{name}' is not a valid component name")]
    InvalidName { name: String },

    /// Per-component hints file could not be parsed
    #[error("Invalid dependency hints for '{component}' in '{path}': {error}")]
    MalformedHints {
        component: String,
        path: PathBuf,
        error: String,
    },

    /// Catalog file could not be read
    #[error("Failed to read catalog '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Whether this is a configuration error in the catalog data itself
    pub fn is_invalid_spec(&self) -> bool {
        matches!(
            self,
            Self::DuplicateComponent { .. }
                | Self::SelfDependency { .. }
                | Self::InvalidName { .. }
                | Self::MalformedHints { .. }
        )
    }
}

/// Discovery errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The root directory could not be listed
    #[error("Cannot read component root '{path}': {error}")]
    RootUnreadable { path: PathBuf, error: String },

    /// Dependency hints for a present component are invalid
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Plan policy errors
#[derive(Error, Debug)]
pub enum PlanError {
    /// Cycle found while running in fail-fast mode
    #[error("Circular dependency detected between: {}", members.join(", "))]
    Cycle { members: Vec<String> },

    /// Core components were skipped while running in strict mode
    #[error("Build plan is degraded, core components skipped: {}", skipped.join(", "))]
    Degraded { skipped: Vec<String> },
}

/// Workflow rendering and verification errors
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// `generate --check` found no workflow file
    #[error("Workflow file not found at '{path}'. Run 'cogci generate' to create it.")]
    Missing { path: PathBuf },

    /// `generate --check` found a workflow that differs from the current plan
    #[error("Workflow file '{path}' is out of date. Run 'cogci generate' to refresh it.")]
    Stale { path: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level cogci error type
#[derive(Error, Debug)]
pub enum CogciError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Discovery error
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Plan error
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Workflow error
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
