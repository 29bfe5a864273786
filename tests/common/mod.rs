//! Common test utilities for relconf integration tests.
//!
//! Provides `TestEnv` for isolated settings files backed by the real git
//! binary, so tests never touch a repository the developer cares about.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use relconf::config::{DEFAULT_CONFIG_FILE, ReleaseConfig};
use relconf::storage::GitConfigStore;
pub use tempfile::TempDir;

/// A test environment with an isolated settings file in a temp directory.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Path of the settings file inside the temp directory.
    pub fn file(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_CONFIG_FILE)
    }

    /// Build a resolver against the real git store with a fixed environment.
    pub fn config(&self, env: &[(&str, &str)]) -> relconf::Result<ReleaseConfig> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ReleaseConfig::new_with_store(
            self.file(),
            Box::new(GitConfigStore::new("git", self.file())),
            Box::new(env),
        )
    }

    /// Run `git config --file <file>` directly, for fixtures and assertions.
    pub fn git_config(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .arg("config")
            .arg("--file")
            .arg(self.file())
            .args(args)
            .output()
            .expect("failed to run git");
        if !output.status.success() {
            return None;
        }
        let mut value = String::from_utf8_lossy(&output.stdout).into_owned();
        if value.ends_with('\n') {
            value.pop();
        }
        Some(value)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
