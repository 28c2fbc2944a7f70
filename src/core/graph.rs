//! Dependency graph over present components
//!
//! Nodes are present component names in discovery order. An edge runs from a
//! dependency to its dependent. Dependencies that are not present never
//! become edges; they are kept as annotations on the dependent so the
//! selector can decide what to do with it.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::core::catalog::Tier;
use crate::core::discovery::PresentComponent;
use crate::error::CatalogError;

/// Directed graph of present components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    tiers: Vec<Tier>,
    index: HashMap<String, usize>,
    /// node -> indices of its present dependencies
    dependencies: Vec<Vec<usize>>,
    /// node -> indices of its dependents
    dependents: Vec<Vec<usize>>,
    /// node -> dependency names that are not present
    unsatisfied: Vec<Vec<String>>,
}

/// Build the graph for a present set
///
/// Node order follows `present`, which discovery keeps in catalog order.
pub fn build_graph(present: &[PresentComponent]) -> Result<DependencyGraph, CatalogError> {
    let mut graph = DependencyGraph::default();

    for component in present {
        if graph.index.contains_key(component.name()) {
            return Err(CatalogError::DuplicateComponent {
                name: component.name().to_string(),
            });
        }
        graph.index.insert(component.name().to_string(), graph.nodes.len());
        graph.nodes.push(component.name().to_string());
        graph.tiers.push(component.tier());
        graph.dependencies.push(Vec::new());
        graph.dependents.push(Vec::new());
        graph.unsatisfied.push(Vec::new());
    }

    for (node, component) in present.iter().enumerate() {
        for dep in component.dependencies() {
            if dep == component.name() {
                return Err(CatalogError::SelfDependency {
                    name: dep.to_string(),
                });
            }
            match graph.index.get(dep) {
                Some(&source) => {
                    if !graph.dependencies[node].contains(&source) {
                        graph.dependencies[node].push(source);
                        graph.dependents[source].push(node);
                    }
                }
                None => {
                    match component.tier() {
                        Tier::Core => tracing::warn!(
                            "Component '{}' depends on '{}', which is not present",
                            component.name(),
                            dep
                        ),
                        Tier::Optional => tracing::debug!(
                            "Optional component '{}' depends on '{}', which is not present",
                            component.name(),
                            dep
                        ),
                    }
                    graph.unsatisfied[node].push(dep.to_string());
                }
            }
        }
    }

    tracing::debug!(
        "Dependency graph: {} nodes, {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}

impl DependencyGraph {
    /// Node names in discovery order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a component is a node
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tier of a node
    pub fn tier(&self, name: &str) -> Option<Tier> {
        self.index.get(name).map(|&i| self.tiers[i])
    }

    /// Present dependencies of a node
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.index
            .get(name)
            .map(|&i| self.names(&self.dependencies[i]))
            .unwrap_or_default()
    }

    /// Nodes that depend on this one
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        self.index
            .get(name)
            .map(|&i| self.names(&self.dependents[i]))
            .unwrap_or_default()
    }

    /// Dependencies of a node that are not present
    pub fn unsatisfied(&self, name: &str) -> &[String] {
        match self.index.get(name) {
            Some(&i) => &self.unsatisfied[i],
            None => &[],
        }
    }

    /// All edges as `(dependency, dependent)`, grouped by dependent in node order
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.dependencies
            .iter()
            .enumerate()
            .flat_map(|(node, deps)| {
                deps.iter()
                    .map(move |&dep| (self.nodes[dep].as_str(), self.nodes[node].as_str()))
            })
            .collect()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    pub(crate) fn dependency_indices(&self, node: usize) -> &[usize] {
        &self.dependencies[node]
    }

    pub(crate) fn dependent_indices(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    fn names(&self, indices: &[usize]) -> Vec<&str> {
        indices.iter().map(|&i| self.nodes[i].as_str()).collect()
    }

    /// Format as DOT graph
    ///
    /// `cycle_members` are drawn red; absent dependencies are dashed grey nodes.
    pub fn format_dot(&self, cycle_members: &[String]) -> String {
        let mut output = String::new();
        output.push_str("digraph components {\n");
        output.push_str("    rankdir=LR;\n");
        output.push_str("    node [shape=box];\n");
        output.push('\n');

        for (node, name) in self.nodes.iter().enumerate() {
            let mut attrs = Vec::new();
            if self.tiers[node] == Tier::Optional {
                attrs.push("style=rounded");
            }
            if cycle_members.contains(name) {
                attrs.push("color=red");
            }
            if attrs.is_empty() {
                let _ = writeln!(output, "    \"{name}\";");
            } else {
                let _ = writeln!(output, "    \"{name}\" [{}];", attrs.join(", "));
            }
        }

        let mut absent: Vec<&str> = Vec::new();
        for missing in self.unsatisfied.iter().flatten() {
            if !absent.contains(&missing.as_str()) {
                absent.push(missing);
            }
        }
        for name in &absent {
            let _ = writeln!(output, "    \"{name}\" [style=dashed, color=grey];");
        }
        output.push('\n');

        for (dep, dependent) in self.edges() {
            let _ = writeln!(output, "    \"{dep}\" -> \"{dependent}\";");
        }
        for (node, missing) in self.unsatisfied.iter().enumerate() {
            for dep in missing {
                let _ = writeln!(
                    output,
                    "    \"{dep}\" -> \"{}\" [style=dashed, color=grey];",
                    self.nodes[node]
                );
            }
        }

        output.push_str("}\n");
        output
    }
}
