//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test component root
///
/// Creates a temporary directory holding component checkouts and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check out a buildable component (directory with CMakeLists.txt)
    pub fn add_component(&self, name: &str) {
        self.create_file(
            &format!("{name}/CMakeLists.txt"),
            &format!("project({name})\n"),
        );
    }

    /// Write the catalog file at the project root
    pub fn write_catalog(&self, content: &str) {
        self.create_file("cogci.toml", content);
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run cogci with `--root` pointing at this project
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cogci"));
        cmd.current_dir(self.path());
        cmd.env_remove("COGCI_ROOT");
        cmd.env_remove("COGCI_CATALOG");
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd.arg("--root");
        cmd.arg(self.path());
        cmd.output().expect("Failed to execute cogci")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a finished command
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr of a finished command
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Four-component catalog: cogutil <- atomspace <- {unify, ure}, ure also needs unify
#[allow(dead_code)]
pub const SAMPLE_CATALOG: &str = r#"
[[component]]
name = "cogutil"

[[component]]
name = "atomspace"
depends = ["cogutil"]

[[component]]
name = "ure"
depends = ["atomspace", "unify"]

[[component]]
name = "unify"
depends = ["atomspace"]
"#;

/// Same catalog with ure and unify optional
#[allow(dead_code)]
pub const SAMPLE_CATALOG_OPTIONAL: &str = r#"
[[component]]
name = "cogutil"

[[component]]
name = "atomspace"
depends = ["cogutil"]

[[component]]
name = "ure"
tier = "optional"
depends = ["atomspace", "unify"]

[[component]]
name = "unify"
tier = "optional"
depends = ["atomspace"]
"#;

/// Two components that depend on each other
#[allow(dead_code)]
pub const CYCLIC_CATALOG: &str = r#"
[[component]]
name = "cogutil"

[[component]]
name = "a"
depends = ["b"]

[[component]]
name = "b"
depends = ["a"]
"#;
