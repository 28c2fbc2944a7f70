//! Dependency resolution
//!
//! Computes the build order with Kahn's algorithm and reports cycles
//! instead of failing on them.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::graph::DependencyGraph;

/// Outcome of ordering a dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortResult {
    /// Resolved nodes; every dependency precedes its dependents
    pub order: Vec<String>,
    /// Unresolved nodes lying on (or between) cycles, in node order
    pub cycle_members: Vec<String>,
    /// Unresolved nodes that only sit downstream of a cycle, in node order
    pub blocked: Vec<String>,
}

impl SortResult {
    /// Whether the graph contained a cycle
    pub fn is_cyclic(&self) -> bool {
        !self.cycle_members.is_empty()
    }

    /// Every node the sorter could not place
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.cycle_members
            .iter()
            .chain(self.blocked.iter())
            .map(String::as_str)
    }
}

/// Compute topological sort (build order)
///
/// Among nodes that are ready at the same time, the one that comes first in
/// the graph's node order (catalog order) is emitted first, so equal inputs
/// always produce the same order. Runs in O(V + E).
pub fn sort(graph: &DependencyGraph) -> SortResult {
    let count = graph.len();
    let mut in_degree: Vec<usize> = (0..count)
        .map(|node| graph.dependency_indices(node).len())
        .collect();
    let mut ready: BTreeSet<usize> = (0..count).filter(|&node| in_degree[node] == 0).collect();
    let mut resolved = vec![false; count];
    let mut order = Vec::with_capacity(count);

    while let Some(node) = ready.pop_first() {
        resolved[node] = true;
        order.push(graph.nodes()[node].clone());
        for &dependent in graph.dependent_indices(node) {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() == count {
        return SortResult {
            order,
            ..SortResult::default()
        };
    }

    let blocked = downstream_only(graph, &resolved);
    let mut result = SortResult {
        order,
        ..SortResult::default()
    };
    for node in (0..count).filter(|&node| !resolved[node]) {
        let name = graph.nodes()[node].clone();
        if blocked[node] {
            result.blocked.push(name);
        } else {
            result.cycle_members.push(name);
        }
    }

    tracing::warn!(
        "Circular dependency detected between: {}",
        result.cycle_members.join(", ")
    );
    result
}

/// Mark unresolved nodes that do not lead into a cycle
///
/// Repeatedly peels unresolved nodes with no unresolved dependents. What
/// survives has a path to a cycle.
fn downstream_only(graph: &DependencyGraph, resolved: &[bool]) -> Vec<bool> {
    let count = graph.len();
    let mut out_degree: Vec<usize> = (0..count)
        .map(|node| {
            if resolved[node] {
                0
            } else {
                graph
                    .dependent_indices(node)
                    .iter()
                    .filter(|&&dependent| !resolved[dependent])
                    .count()
            }
        })
        .collect();
    let mut sinks: Vec<usize> = (0..count)
        .filter(|&node| !resolved[node] && out_degree[node] == 0)
        .collect();
    let mut peeled = vec![false; count];

    while let Some(node) = sinks.pop() {
        peeled[node] = true;
        for &dep in graph.dependency_indices(node) {
            if resolved[dep] {
                continue;
            }
            out_degree[dep] -= 1;
            if out_degree[dep] == 0 {
                sinks.push(dep);
            }
        }
    }

    peeled
}
