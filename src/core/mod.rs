//! Core business logic module
//!
//! The planning engine and the workflow renderer. Filesystem access goes
//! through the [`discovery::PresenceProbe`] trait; the real implementation
//! lives in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`catalog`] - Component catalog (cogci.toml) parsing and validation
//! - [`discovery`] - Presence probing of cataloged components
//! - [`graph`] - Dependency graph over present components
//! - [`resolver`] - Topological sort with cycle reporting
//! - [`selector`] - Build-sequence selection
//! - [`plan`] - Build plan types and the planning pipeline
//! - [`check`] - Configuration validation logic
//! - [`workflow`] - GitHub Actions workflow rendering

pub mod catalog;
pub mod check;
pub mod discovery;
pub mod graph;
pub mod plan;
pub mod resolver;
pub mod selector;
pub mod workflow;
