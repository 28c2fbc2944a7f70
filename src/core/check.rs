//! Check command logic
//!
//! Reports which cataloged components are present, catalog dependencies that
//! name nothing, and what would be built, without rendering anything.

use std::path::Path;

use crate::core::catalog::{Catalog, Tier};
use crate::core::discovery::{discover, PresenceProbe};
use crate::core::plan::{plan_present, BuildPlan, PlanOptions};
use crate::error::CogciError;

/// Presence of a single cataloged component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCheck {
    /// Component name
    pub name: String,
    /// Component tier
    pub tier: Tier,
    /// Whether a build descriptor was found
    pub present: bool,
    /// Extra dependencies from the component's hints manifest
    pub hints: Vec<String>,
}

/// Result of the check operation
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Every cataloged component, in catalog order
    pub components: Vec<ComponentCheck>,
    /// `(component, dependency)` pairs where the dependency is not cataloged
    pub unknown_dependencies: Vec<(String, String)>,
    /// The plan that would be built
    pub plan: BuildPlan,
    /// Warnings encountered during check
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if all validations passed
    pub fn is_valid(&self) -> bool {
        !self.plan.degraded
    }

    /// Number of components found on disk
    pub fn present_count(&self) -> usize {
        self.components.iter().filter(|c| c.present).count()
    }
}

/// Perform check operation on a component root
pub fn check(
    root: &Path,
    catalog: &Catalog,
    probe: &dyn PresenceProbe,
) -> Result<CheckResult, CogciError> {
    let present = discover(root, catalog, probe)?;
    let components = catalog
        .specs()
        .iter()
        .map(|spec| {
            let found = present.iter().find(|p| p.name() == spec.name);
            ComponentCheck {
                name: spec.name.clone(),
                tier: spec.tier,
                present: found.is_some(),
                hints: found.map(|p| p.hints.clone()).unwrap_or_default(),
            }
        })
        .collect();

    let unknown_dependencies = catalog.unknown_dependencies();
    let mut warnings: Vec<String> = unknown_dependencies
        .iter()
        .map(|(component, dep)| {
            format!("Component '{component}' depends on '{dep}', which is not in the catalog")
        })
        .collect();

    let plan = plan_present(&present, catalog, PlanOptions::default())?;
    warnings.extend(plan.warnings.iter().cloned());

    Ok(CheckResult {
        components,
        unknown_dependencies,
        plan,
        warnings,
    })
}
