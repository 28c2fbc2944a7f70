//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use commands::{Commands, Workspace};

/// cogci - CI build order for OpenCog components
///
/// Finds the components checked out under a root directory, orders them by
/// their dependencies, and generates the CI workflow that builds them.
#[derive(Parser, Debug)]
#[command(name = "cogci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding one sub-directory per component
    #[arg(long, global = true, env = "COGCI_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Component catalog (defaults to <root>/cogci.toml, then the built-in catalog)
    #[arg(long, global = true, env = "COGCI_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            let workspace = Workspace::new(self.root, self.catalog);
            cmd.run(&workspace).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
