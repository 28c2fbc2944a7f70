//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod generate;
pub mod graph;
pub mod init;
pub mod plan;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::defaults::DEFAULT_CATALOG_FILE;
use crate::core::catalog::{Catalog, CatalogFile, Settings};
use crate::infra::filesystem::FsProbe;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the built-in catalog to cogci.toml for editing
    Init {
        /// Overwrite an existing catalog
        #[arg(short, long)]
        force: bool,
    },

    /// Show the build plan
    Plan {
        /// Fail instead of skipping components caught in a dependency cycle
        #[arg(long)]
        fail_on_cycle: bool,

        /// Fail when a core component would be skipped
        #[arg(long)]
        strict: bool,
    },

    /// Validate the catalog and report component presence
    Check,

    /// Generate the CI workflow
    Generate {
        /// Write the workflow here instead of the configured path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the workflow instead of writing it
        #[arg(long, conflicts_with = "check")]
        stdout: bool,

        /// Fail if the workflow on disk is missing or out of date
        #[arg(long)]
        check: bool,
    },

    /// Print the component dependency graph in DOT format
    Graph,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, workspace: &Workspace) -> Result<()> {
        match self {
            Self::Init { force } => init::execute(workspace, force).await,
            Self::Plan {
                fail_on_cycle,
                strict,
            } => plan::execute(workspace, fail_on_cycle, strict).await,
            Self::Check => check::execute(workspace).await,
            Self::Generate {
                output,
                stdout,
                check,
            } => {
                let options = generate::GenerateOptions {
                    output,
                    stdout,
                    check,
                };
                generate::execute(workspace, options).await
            }
            Self::Graph => graph::execute(workspace).await,
        }
    }
}

/// Component root and catalog location shared by all commands
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Component root
    pub root: PathBuf,
    /// Explicit catalog path, if one was given
    pub catalog: Option<PathBuf>,
}

impl Workspace {
    /// Create a workspace
    pub fn new(root: PathBuf, catalog: Option<PathBuf>) -> Self {
        Self { root, catalog }
    }

    /// Where the catalog is read from (and written to by `init`)
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_CATALOG_FILE))
    }

    /// Load the catalog and settings
    ///
    /// An explicit `--catalog` must exist; otherwise a missing `cogci.toml`
    /// falls back to the built-in catalog.
    pub fn load(&self) -> Result<(Catalog, Settings)> {
        let path = self.catalog_path();
        if path.is_file() {
            tracing::info!("Loading catalog from {}", path.display());
            let file = CatalogFile::load(&path)?;
            let parts = file
                .into_parts()
                .with_context(|| format!("Invalid catalog at {}", path.display()))?;
            return Ok(parts);
        }
        if self.catalog.is_some() {
            bail!("Catalog file not found: {}", path.display());
        }
        tracing::info!(
            "No {} in {}, using the built-in catalog",
            DEFAULT_CATALOG_FILE,
            self.root.display()
        );
        Ok((Catalog::builtin(), Settings::default()))
    }

    /// Filesystem probe for these settings
    pub fn probe(&self, settings: &Settings) -> FsProbe {
        FsProbe::from_settings(settings)
    }

    /// Resolve a path relative to the root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_falls_back_to_builtin_catalog() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new(temp.path().to_path_buf(), None);

        let (catalog, settings) = workspace.load().unwrap();
        assert_eq!(catalog, Catalog::builtin());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_missing_explicit_catalog_fails() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::new(
            temp.path().to_path_buf(),
            Some(temp.path().join("other.toml")),
        );

        assert!(workspace.load().is_err());
    }

    #[test]
    fn test_load_reads_root_catalog() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(DEFAULT_CATALOG_FILE),
            "[[component]]\nname = \"cogutil\"\n",
        )
        .unwrap();
        let workspace = Workspace::new(temp.path().to_path_buf(), None);

        let (catalog, _) = workspace.load().unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(DEFAULT_CATALOG_FILE),
            "[[component]]\nname = \"a\"\ndepends = [\"a\"]\n",
        )
        .unwrap();
        let workspace = Workspace::new(temp.path().to_path_buf(), None);

        let err = workspace.load().unwrap_err();
        assert!(format!("{err:#}").contains("depends on itself"));
    }

    #[test]
    fn test_resolve_relative_to_root() {
        let workspace = Workspace::new(PathBuf::from("/src"), None);
        assert_eq!(workspace.resolve(Path::new("ci.yml")), PathBuf::from("/src/ci.yml"));
        assert_eq!(workspace.resolve(Path::new("/tmp/ci.yml")), PathBuf::from("/tmp/ci.yml"));
    }
}
