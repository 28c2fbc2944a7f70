//! CLI command for writing a starter catalog
//!
//! Implements `cogci init`: writes the built-in catalog to `cogci.toml` so
//! components can be added or re-tiered by editing data.

use anyhow::{bail, Result};

use super::Workspace;
use crate::cli::output::{print_detail, print_success};
use crate::core::catalog::{Catalog, CatalogFile, Settings};
use crate::infra::filesystem;

/// Execute the init command
pub async fn execute(workspace: &Workspace, force: bool) -> Result<()> {
    let path = workspace.catalog_path();
    if path.exists() && !force {
        bail!(
            "Catalog already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }

    let file = CatalogFile {
        settings: Settings::default(),
        components: Catalog::builtin().specs().to_vec(),
    };
    filesystem::write_file(&path, &file.to_toml()?)?;

    print_success(&format!("Created {}", path.display()));
    print_detail(&format!(
        "{} components; add [[component]] entries to extend the build",
        file.components.len()
    ));
    Ok(())
}
