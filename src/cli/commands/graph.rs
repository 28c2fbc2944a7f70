//! CLI command for displaying the dependency graph
//!
//! Implements the `cogci graph` command.

use anyhow::Result;

use super::Workspace;
use crate::core::discovery::discover;
use crate::core::graph::build_graph;
use crate::core::resolver::sort;

/// Execute the graph command
pub async fn execute(workspace: &Workspace) -> Result<()> {
    let (catalog, settings) = workspace.load()?;
    let probe = workspace.probe(&settings);

    let present = discover(&workspace.root, &catalog, &probe)?;
    let graph = build_graph(&present)?;
    let sorted = sort(&graph);

    print!("{}", graph.format_dot(&sorted.cycle_members));
    Ok(())
}
