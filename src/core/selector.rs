//! Build-sequence selection
//!
//! Filters the sorted order down to the components that can actually be
//! built. The selector never reorders, so the output keeps the sorter's
//! topological guarantee.

use std::collections::{HashMap, HashSet};

use crate::core::catalog::{Catalog, Tier};
use crate::core::graph::DependencyGraph;
use crate::core::plan::{BuildPlan, SkipReason, SkippedComponent};
use crate::core::resolver::SortResult;

/// Decide which components get built
///
/// A component is selected when it is present and each dependency is either
/// present and already selected, or absent and optional. Skipped core
/// components degrade the plan; skipped optional ones are only recorded.
pub fn select(sorted: &SortResult, graph: &DependencyGraph, catalog: &Catalog) -> BuildPlan {
    let mut selected: Vec<String> = Vec::with_capacity(sorted.order.len());
    let mut selected_set: HashSet<&str> = HashSet::new();
    let mut reasons: HashMap<&str, SkipReason> = HashMap::new();

    for name in &sorted.order {
        let missing = unmet_dependencies(name, graph, catalog, &selected_set);
        if missing.is_empty() {
            selected_set.insert(name);
            selected.push(name.clone());
        } else {
            reasons.insert(name, SkipReason::UnsatisfiedDependency { missing });
        }
    }

    for name in &sorted.cycle_members {
        reasons.insert(
            name,
            SkipReason::CyclicDependency {
                cycle: sorted.cycle_members.clone(),
            },
        );
    }

    for name in &sorted.blocked {
        let missing = unmet_dependencies(name, graph, catalog, &selected_set);
        reasons.insert(name, SkipReason::UnsatisfiedDependency { missing });
    }

    let mut plan = BuildPlan {
        selected,
        ..BuildPlan::default()
    };

    if sorted.is_cyclic() {
        plan.warnings.push(format!(
            "Dependency cycle between {}; these components are skipped",
            sorted.cycle_members.join(", ")
        ));
    }

    for spec in catalog.specs() {
        if selected_set.contains(spec.name.as_str()) {
            continue;
        }
        let reason = if graph.contains(&spec.name) {
            match reasons.remove(spec.name.as_str()) {
                Some(reason) => reason,
                None => continue,
            }
        } else {
            SkipReason::AbsentFromDisk
        };

        if spec.tier == Tier::Core {
            plan.degraded = true;
            let warning = match &reason {
                SkipReason::AbsentFromDisk => {
                    format!("Core component '{}' not found on disk", spec.name)
                }
                other => format!("Core component '{}' skipped: {other}", spec.name),
            };
            tracing::warn!("{warning}");
            plan.warnings.push(warning);
        } else {
            tracing::debug!("Optional component '{}' skipped: {reason}", spec.name);
        }

        plan.skipped.push(SkippedComponent {
            name: spec.name.clone(),
            tier: spec.tier,
            reason,
        });
    }

    plan
}

/// Dependencies of `name` that keep it from being built right now
fn unmet_dependencies(
    name: &str,
    graph: &DependencyGraph,
    catalog: &Catalog,
    selected: &HashSet<&str>,
) -> Vec<String> {
    let unselected = graph
        .dependencies_of(name)
        .into_iter()
        .filter(|dep| !selected.contains(dep))
        .map(String::from);
    let required_absent = graph
        .unsatisfied(name)
        .iter()
        .filter(|dep| catalog.get(dep).map_or(Tier::Core, |spec| spec.tier) == Tier::Core)
        .cloned();

    unselected.chain(required_absent).collect()
}
