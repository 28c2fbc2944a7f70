//! CLI command for showing the build plan
//!
//! Implements the `cogci plan` command.

use anyhow::Result;

use super::Workspace;
use crate::cli::output::{
    is_json, is_quiet, print_detail, print_info, print_json, print_warning, status,
};
use crate::core::catalog::Tier;
use crate::core::plan::{plan, CyclePolicy, PlanOptions};

/// Execute the plan command
pub async fn execute(workspace: &Workspace, fail_on_cycle: bool, strict: bool) -> Result<()> {
    let (catalog, settings) = workspace.load()?;
    let probe = workspace.probe(&settings);
    let options = PlanOptions {
        cycle_policy: if fail_on_cycle {
            CyclePolicy::FailFast
        } else {
            CyclePolicy::Exclude
        },
        fail_on_degraded: strict,
    };

    let plan = plan(&workspace.root, &catalog, &probe, options)?;

    if is_json() {
        print_json(&serde_json::to_value(&plan)?);
        return Ok(());
    }

    if is_quiet() {
        for name in &plan.selected {
            println!("{name}");
        }
        return Ok(());
    }

    print_info(&format!(
        "Build order ({} of {} components):",
        plan.selected.len(),
        catalog.len()
    ));
    if plan.selected.is_empty() {
        print_detail("(none)");
    }
    for (i, name) in plan.selected.iter().enumerate() {
        print_detail(&format!("{:>2}. {name}", i + 1));
    }

    if !plan.skipped.is_empty() {
        println!();
        print_info("Skipped:");
        for skipped in &plan.skipped {
            let tier = match skipped.tier {
                Tier::Core => "",
                Tier::Optional => " [optional]",
            };
            print_detail(&format!(
                "{} {}{tier}: {}",
                status::SKIPPED,
                skipped.name,
                skipped.reason
            ));
        }
    }

    if !plan.warnings.is_empty() {
        println!();
        for warning in &plan.warnings {
            print_warning(warning);
        }
    }

    Ok(())
}
