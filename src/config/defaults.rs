//! Default configuration values

/// File whose presence marks a component directory as buildable
pub const DEFAULT_DESCRIPTOR_FILE: &str = "CMakeLists.txt";

/// Optional per-component manifest carrying extra dependency names
pub const DEFAULT_HINTS_FILE: &str = "component.toml";

/// Catalog file looked up in the component root
pub const DEFAULT_CATALOG_FILE: &str = "cogci.toml";

/// Where `cogci generate` writes the workflow, relative to the root
pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/ci-org-generalized.yml";

/// Workflow display name
pub const DEFAULT_WORKFLOW_NAME: &str = "CI Org Generalized";

/// Container image the CI job runs in
pub const DEFAULT_CONTAINER_IMAGE: &str = "opencog/opencog-deps";
