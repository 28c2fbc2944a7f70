//! Check command implementation
//!
//! Implements `cogci check` to validate the catalog and component layout
//! without generating anything.

use anyhow::{bail, Result};

use super::Workspace;
use crate::cli::output::{is_json, is_quiet, print_json, status};
use crate::core::catalog::Tier;
use crate::core::check;

/// Execute the check command
pub async fn execute(workspace: &Workspace) -> Result<()> {
    let (catalog, settings) = workspace.load()?;
    let probe = workspace.probe(&settings);

    tracing::info!("Checking components under {}", workspace.root.display());
    let result = check::check(&workspace.root, &catalog, &probe)?;

    if is_json() {
        let components: Vec<_> = result
            .components
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "tier": c.tier,
                    "present": c.present,
                    "hints": c.hints,
                })
            })
            .collect();
        let unknown: Vec<_> = result
            .unknown_dependencies
            .iter()
            .map(|(component, dep)| {
                serde_json::json!({
                    "component": component,
                    "dependency": dep,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "status": if result.is_valid() { "success" } else { "error" },
            "components": components,
            "unknown_dependencies": unknown,
            "plan": result.plan,
            "warnings": result.warnings,
        }));
        if !result.is_valid() {
            bail!("Check failed: core components would be skipped");
        }
        return Ok(());
    }

    // Quiet mode - only report failure
    if is_quiet() {
        if !result.is_valid() {
            bail!("Check failed: core components would be skipped");
        }
        return Ok(());
    }

    println!("Checking components in {}...\n", workspace.root.display());
    println!("✓ Catalog is valid ({} components)", catalog.len());
    println!("  Build descriptor: {}\n", settings.descriptor);

    for component in &result.components {
        let marker = if component.present {
            status::SUCCESS
        } else if component.tier == Tier::Core {
            status::ERROR
        } else {
            status::SKIPPED
        };
        let tier = match component.tier {
            Tier::Core => "",
            Tier::Optional => " [optional]",
        };
        let state = if component.present { "found" } else { "not found" };
        println!("  {marker} {}{tier} - {state}", component.name);
        if !component.hints.is_empty() {
            println!("      extra dependencies: {}", component.hints.join(", "));
        }
    }

    // Display warnings
    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  {} {warning}", status::WARNING);
        }
    }

    // Display what would be built
    println!("\nComponents that would be built:");
    if result.plan.selected.is_empty() {
        println!("  (none)");
    } else {
        for name in &result.plan.selected {
            println!("  • {name}");
        }
    }

    println!();
    if result.is_valid() {
        println!(
            "{} Check passed - {} of {} components present",
            status::SUCCESS,
            result.present_count(),
            catalog.len()
        );
        Ok(())
    } else {
        bail!("Check failed - core components would be skipped, see warnings above");
    }
}
