//! Git-config backed store.
//!
//! Persists settings with `git config --file <file>` so the settings file
//! stays in the format users already know how to edit by hand. The git
//! binary itself is pluggable, matching however the host tool was told to
//! invoke git.

use std::path::PathBuf;
use std::process::{Command, Output};

use super::backend::ConfigStore;
use crate::{Error, Result};

/// Config store that shells out to `git config` against a single file.
#[derive(Debug, Clone)]
pub struct GitConfigStore {
    git_path: String,
    file: PathBuf,
}

impl GitConfigStore {
    /// Create a store bound to `file`, using the given git binary.
    pub fn new(git_path: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            git_path: git_path.into(),
            file: file.into(),
        }
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(&self.git_path)
            .arg("config")
            .arg("--file")
            .arg(&self.file)
            .args(args)
            .output()
    }
}

impl ConfigStore for GitConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        let output = self.run(&["--get", key]).ok()?;
        if !output.status.success() {
            return None;
        }
        let mut value = String::from_utf8_lossy(&output.stdout).into_owned();
        // git terminates the value with a single newline; inner newlines
        // belong to the value (e.g. templates)
        if value.ends_with('\n') {
            value.pop();
        }
        Some(value)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        let output = self.run(&["--type=bool", "--get", key]).ok()?;
        if !output.status.success() {
            return None;
        }
        match String::from_utf8_lossy(&output.stdout).trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let output = self.run(&[key, value]).map_err(|e| Error::Persistence {
            key: key.to_string(),
            details: format!("failed to run {}: {}", self.git_path, e),
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Persistence {
                key: key.to_string(),
                details: if stderr.is_empty() {
                    "unknown error".to_string()
                } else {
                    stderr
                },
            });
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.file.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> GitConfigStore {
        GitConfigStore::new("git", dir.path().join(".relconf"))
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set("relconf.releaseBranch", "main").unwrap();
        assert_eq!(
            store.get("relconf.releaseBranch").as_deref(),
            Some("main")
        );
    }

    #[test]
    fn test_get_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("relconf.releaseBranch"), None);
        assert_eq!(store.get_bool("relconf.vPrefix"), None);
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("relconf.releaseBranch", "main").unwrap();
        assert_eq!(store.get("relconf.command"), None);
    }

    #[test]
    fn test_get_bool_canonicalizes_spellings() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set("relconf.vPrefix", "yes").unwrap();
        assert_eq!(store.get_bool("relconf.vPrefix"), Some(true));

        store.set("relconf.vPrefix", "0").unwrap();
        assert_eq!(store.get_bool("relconf.vPrefix"), Some(false));
    }

    #[test]
    fn test_multiline_value_survives() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let template = "## Release {{version}}\n\n- change one\n- change two";
        store.set("relconf.template", template).unwrap();
        assert_eq!(store.get("relconf.template").as_deref(), Some(template));
    }

    #[test]
    fn test_set_into_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        std::fs::write(dir.path().join(".relconf"), "}{ not a settings file").unwrap();
        let err = store.set("relconf.releaseBranch", "main").unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
    }

    #[test]
    fn test_location_is_file_path() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.location().ends_with(".relconf"));
    }
}
