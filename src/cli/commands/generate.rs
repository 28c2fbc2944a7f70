//! CLI command for generating the CI workflow
//!
//! Implements `cogci generate`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Workspace;
use crate::cli::output::{is_json, print_detail, print_json, print_success, print_warning};
use crate::core::plan::{plan, PlanOptions};
use crate::core::workflow;
use crate::infra::filesystem;

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output path override
    pub output: Option<PathBuf>,
    /// Print instead of writing
    pub stdout: bool,
    /// Verify the existing file instead of writing
    pub check: bool,
}

/// Execute the generate command
pub async fn execute(workspace: &Workspace, options: GenerateOptions) -> Result<()> {
    let (catalog, settings) = workspace.load()?;
    let probe = workspace.probe(&settings);

    let plan = plan(&workspace.root, &catalog, &probe, PlanOptions::default())?;
    for warning in &plan.warnings {
        print_warning(warning);
    }

    let rendered = workflow::render(&plan, &settings);

    if options.stdout {
        print!("{rendered}");
        return Ok(());
    }

    let target = options
        .output
        .unwrap_or_else(|| PathBuf::from(&settings.workflow_path));
    let path = workspace.resolve(&target);

    if options.check {
        let existing = read_existing(&path)?;
        workflow::check_up_to_date(&path, existing.as_deref(), &rendered)?;
        report(&path, &plan.selected, "up to date");
        return Ok(());
    }

    filesystem::write_file(&path, &rendered)
        .with_context(|| format!("Failed to write workflow to {}", path.display()))?;
    tracing::info!("Workflow written to {}", path.display());
    report(&path, &plan.selected, "written");
    Ok(())
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(filesystem::read_file(path)?))
}

fn report(path: &Path, selected: &[String], outcome: &str) {
    if is_json() {
        print_json(&serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
            "outcome": outcome,
            "components": selected,
        }));
        return;
    }
    print_success(&format!("Workflow {outcome}: {}", path.display()));
    print_detail(&format!(
        "{} components: {}",
        selected.len(),
        selected.join(", ")
    ));
}
