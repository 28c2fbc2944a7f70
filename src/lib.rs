//! cogci - deterministic CI build order for OpenCog components
//!
//! Discovers which components exist under a source root, orders them by their
//! dependencies, and renders the result as a GitHub Actions workflow.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Planning engine and workflow rendering
//! - [`infra`] - Infrastructure layer (filesystem)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
