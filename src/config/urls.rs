//! Repository URLs

/// Base URL components are cloned from (`<base>/<name>.git`)
pub const DEFAULT_REPOSITORY_BASE: &str = "https://github.com/opencog";
