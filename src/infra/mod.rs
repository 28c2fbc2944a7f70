//! Infrastructure layer
//!
//! Handles filesystem I/O. This module is the only place where side
//! effects occur.

pub mod filesystem;
