//! Filesystem operations
//!
//! Handles file and directory operations, and the on-disk presence probe
//! used by discovery.

use std::path::Path;

use crate::core::catalog::Settings;
use crate::core::discovery::PresenceProbe;
use crate::error::{DiscoveryError, FilesystemError};

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Presence probe backed by the real filesystem
///
/// A component is present when `<root>/<name>/<descriptor>` is a file.
#[derive(Debug, Clone)]
pub struct FsProbe {
    descriptor: String,
    hints_file: Option<String>,
}

impl FsProbe {
    /// Create a probe for a descriptor file name
    pub fn new(descriptor: &str) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            hints_file: None,
        }
    }

    /// Also read per-component dependency hints from `hints_file`
    #[must_use]
    pub fn with_hints(mut self, hints_file: &str) -> Self {
        self.hints_file = Some(hints_file.to_string());
        self
    }

    /// Probe configured from catalog settings
    pub fn from_settings(settings: &Settings) -> Self {
        let probe = Self::new(&settings.descriptor);
        match settings.hints_file() {
            Some(hints) => probe.with_hints(hints),
            None => probe,
        }
    }
}

impl PresenceProbe for FsProbe {
    fn check_root(&self, root: &Path) -> Result<(), DiscoveryError> {
        std::fs::read_dir(root)
            .map(|_| ())
            .map_err(|e| DiscoveryError::RootUnreadable {
                path: root.to_path_buf(),
                error: e.to_string(),
            })
    }

    fn exists(&self, root: &Path, name: &str) -> bool {
        root.join(name).join(&self.descriptor).is_file()
    }

    fn hints(&self, root: &Path, name: &str) -> Result<Option<String>, FilesystemError> {
        let Some(hints_file) = &self.hints_file else {
            return Ok(None);
        };
        let path = root.join(name).join(hints_file);
        if !path.is_file() {
            return Ok(None);
        }
        read_file(&path).map(Some)
    }
}
