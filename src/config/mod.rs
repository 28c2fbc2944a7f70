//! Configuration constants
//!
//! - [`defaults`] - Default file names and workflow settings
//! - [`urls`] - Repository URLs

pub mod defaults;
pub mod urls;
