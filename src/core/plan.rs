//! Build plan
//!
//! The plan is the engine's only output: the ordered components to build and
//! a machine-readable reason for every cataloged component that was left out.
//! [`plan`] runs the whole pipeline (discovery, graph, sort, selection) and
//! applies the caller's policy for cycles and degraded plans.

use serde::Serialize;
use std::path::Path;

use crate::core::catalog::{Catalog, Tier};
use crate::core::discovery::{discover, PresenceProbe, PresentComponent};
use crate::core::graph::build_graph;
use crate::core::resolver::sort;
use crate::core::selector::select;
use crate::error::{CogciError, PlanError};

/// Why a component is not built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No build descriptor under the root
    AbsentFromDisk,
    /// Some required dependencies are neither present nor selected
    UnsatisfiedDependency {
        /// The dependencies that were not available
        missing: Vec<String>,
    },
    /// Part of a dependency cycle
    CyclicDependency {
        /// Every component caught in a cycle
        cycle: Vec<String>,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AbsentFromDisk => write!(f, "not found on disk"),
            Self::UnsatisfiedDependency { missing } => {
                write!(f, "unsatisfied dependencies: {}", missing.join(", "))
            }
            Self::CyclicDependency { cycle } => {
                write!(f, "dependency cycle between: {}", cycle.join(", "))
            }
        }
    }
}

/// A cataloged component that will not be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComponent {
    /// Component name
    pub name: String,
    /// Component tier
    pub tier: Tier,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Terminal state of a cataloged component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    /// Will be built
    Selected,
    /// Not on disk
    SkippedAbsent,
    /// Dependencies not satisfied
    SkippedUnsatisfied,
    /// Caught in a cycle
    SkippedCyclic,
}

/// The ordered, filtered list of components to build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// Components to build, dependencies first
    pub selected: Vec<String>,
    /// Everything else, in catalog order
    pub skipped: Vec<SkippedComponent>,
    /// Whether a core component was skipped
    ///
    /// Cycles among optional components are reported in `warnings` only.
    pub degraded: bool,
    /// Human-readable warnings, one per degrading event
    pub warnings: Vec<String>,
}

impl BuildPlan {
    /// Whether a component is selected
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Skip entry for a component
    pub fn skipped(&self, name: &str) -> Option<&SkippedComponent> {
        self.skipped.iter().find(|s| s.name == name)
    }

    /// Terminal state of a component, `None` if it is not cataloged
    pub fn status(&self, name: &str) -> Option<ComponentStatus> {
        if self.is_selected(name) {
            return Some(ComponentStatus::Selected);
        }
        self.skipped(name).map(|s| match s.reason {
            SkipReason::AbsentFromDisk => ComponentStatus::SkippedAbsent,
            SkipReason::UnsatisfiedDependency { .. } => ComponentStatus::SkippedUnsatisfied,
            SkipReason::CyclicDependency { .. } => ComponentStatus::SkippedCyclic,
        })
    }

    /// Skipped core-tier components
    pub fn skipped_core(&self) -> Vec<&str> {
        self.skipped
            .iter()
            .filter(|s| s.tier == Tier::Core)
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Members of a dependency cycle, if one was found
    pub fn cycle_members(&self) -> Option<&[String]> {
        self.skipped.iter().find_map(|s| match &s.reason {
            SkipReason::CyclicDependency { cycle } => Some(cycle.as_slice()),
            _ => None,
        })
    }
}

/// What to do when a cycle is found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Skip the cyclic components and keep going
    #[default]
    Exclude,
    /// Abort the run
    FailFast,
}

/// Run policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Cycle handling
    pub cycle_policy: CyclePolicy,
    /// Turn a degraded plan into an error
    pub fail_on_degraded: bool,
}

/// Compute the build plan for the components under `root`
pub fn plan(
    root: &Path,
    catalog: &Catalog,
    probe: &dyn PresenceProbe,
    options: PlanOptions,
) -> Result<BuildPlan, CogciError> {
    let present = discover(root, catalog, probe)?;
    plan_present(&present, catalog, options)
}

/// Compute the build plan for an already discovered present set
///
/// Lets callers that also report on presence probe the root only once.
pub fn plan_present(
    present: &[PresentComponent],
    catalog: &Catalog,
    options: PlanOptions,
) -> Result<BuildPlan, CogciError> {
    let graph = build_graph(present)?;
    let sorted = sort(&graph);

    if sorted.is_cyclic() && options.cycle_policy == CyclePolicy::FailFast {
        return Err(PlanError::Cycle {
            members: sorted.cycle_members,
        }
        .into());
    }

    let plan = select(&sorted, &graph, catalog);
    tracing::info!(
        "Build plan: {} selected, {} skipped",
        plan.selected.len(),
        plan.skipped.len()
    );

    if plan.degraded && options.fail_on_degraded {
        return Err(PlanError::Degraded {
            skipped: plan.skipped_core().into_iter().map(String::from).collect(),
        }
        .into());
    }

    Ok(plan)
}
