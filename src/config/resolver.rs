//! Precedence resolution for release settings.
//!
//! [`ReleaseConfig`] owns the five setting slots and recomputes them on
//! [`ReleaseConfig::reload`]:
//!
//! 1. A non-empty environment variable wins.
//! 2. Otherwise the settings file entry is used.
//! 3. Otherwise the slot is unset.
//!
//! Setters persist through the store first and tag the slot as
//! programmatically set. A failed write is treated as a broken settings
//! file: the file is recreated from default content and the write retried
//! exactly once.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{
    DEFAULT_CONFIG_CONTENT, DEFAULT_CONFIG_FILE, ENV_COMMAND, ENV_RELEASE_BRANCH, ENV_TEMPLATE,
    ENV_VERSION_FILE, ENV_VPREFIX, KEY_COMMAND, KEY_RELEASE_BRANCH, KEY_TEMPLATE,
    KEY_VERSION_FILE, KEY_VPREFIX, decode_null, encode_null, parse_bool,
};
use crate::storage::{ConfigStore, GitConfigStore};
use crate::{Error, Result};

/// Tracks which layer produced a resolved setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from an environment variable.
    EnvVar(&'static str),
    /// Value from the settings file.
    ConfigFile,
    /// Value set programmatically by the host tool.
    Programmatic,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "file"),
            ValueSource::Programmatic => write!(f, "set"),
        }
    }
}

/// A resolved setting value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    raw: String,
    source: ValueSource,
}

impl Resolved {
    /// Create a resolved value from raw stored text and its source.
    pub fn new(raw: impl Into<String>, source: ValueSource) -> Self {
        Self {
            raw: raw.into(),
            source,
        }
    }

    /// The effective value. The stored null sentinel decodes to `""`; any
    /// other text is returned verbatim.
    pub fn value(&self) -> &str {
        decode_null(&self.raw)
    }

    /// True when the effective value is empty.
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// Where the value came from.
    pub fn source(&self) -> &ValueSource {
        &self.source
    }
}

/// Read-only view of the process environment.
///
/// Injected so tests can resolve against fixed fixtures instead of mutating
/// real process state.
pub trait EnvSource {
    /// Look up a variable; `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolver for the five release settings.
///
/// Owns the in-memory slots, the bound file path, the store handle and the
/// environment view. Single-threaded by design; callers must serialize
/// access.
pub struct ReleaseConfig {
    release_branch: Option<Resolved>,
    version_file: Option<Resolved>,
    command: Option<Resolved>,
    template: Option<Resolved>,
    v_prefix: Option<bool>,

    file: PathBuf,
    store: Box<dyn ConfigStore>,
    env: Box<dyn EnvSource>,
}

impl std::fmt::Debug for ReleaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseConfig")
            .field("release_branch", &self.release_branch)
            .field("version_file", &self.version_file)
            .field("command", &self.command)
            .field("template", &self.template)
            .field("v_prefix", &self.v_prefix)
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

impl ReleaseConfig {
    /// Create a resolver bound to `.relconf` in the current directory and
    /// resolve all settings.
    ///
    /// `git_path` is the git binary used by the backing store. Fails only
    /// when the boolean environment override is not parseable.
    pub fn new(git_path: impl Into<String>) -> Result<Self> {
        Self::new_with_file(git_path, DEFAULT_CONFIG_FILE)
    }

    /// Create a resolver bound to an explicit settings file.
    pub fn new_with_file(git_path: impl Into<String>, file: impl Into<PathBuf>) -> Result<Self> {
        let file = file.into();
        let store = GitConfigStore::new(git_path, file.clone());
        Self::new_with_store(file, Box::new(store), Box::new(ProcessEnv))
    }

    /// Create a resolver with an injected store and environment.
    pub fn new_with_store(
        file: impl Into<PathBuf>,
        store: Box<dyn ConfigStore>,
        env: Box<dyn EnvSource>,
    ) -> Result<Self> {
        let mut config = Self {
            release_branch: None,
            version_file: None,
            command: None,
            template: None,
            v_prefix: None,
            file: file.into(),
            store,
            env,
        };
        config.reload()?;
        Ok(config)
    }

    /// Recompute every setting from the environment and the store.
    ///
    /// Each slot is overwritten based on its own lookup; a setting found in
    /// neither layer becomes unset even if a previous reload populated it.
    /// A malformed boolean environment override fails the call immediately,
    /// leaving settings after the boolean untouched.
    pub fn reload(&mut self) -> Result<()> {
        self.release_branch = self.resolve_string(ENV_RELEASE_BRANCH, KEY_RELEASE_BRANCH);
        self.version_file = self.resolve_string(ENV_VERSION_FILE, KEY_VERSION_FILE);
        self.v_prefix = self.resolve_bool(ENV_VPREFIX, KEY_VPREFIX)?;
        self.command = self.resolve_string(ENV_COMMAND, KEY_COMMAND);
        self.template = self.resolve_string(ENV_TEMPLATE, KEY_TEMPLATE);
        Ok(())
    }

    fn resolve_string(&self, var: &'static str, key: &str) -> Option<Resolved> {
        match self.env.var(var) {
            Some(value) if !value.is_empty() => {
                Some(Resolved::new(value, ValueSource::EnvVar(var)))
            }
            _ => self
                .store
                .get(key)
                .map(|value| Resolved::new(value, ValueSource::ConfigFile)),
        }
    }

    fn resolve_bool(&self, var: &'static str, key: &str) -> Result<Option<bool>> {
        match self.env.var(var) {
            Some(value) if !value.is_empty() => match parse_bool(&value) {
                Some(b) => Ok(Some(b)),
                None => Err(Error::InvalidEnvironmentValue { var, value }),
            },
            _ => Ok(self.store.get_bool(key)),
        }
    }

    /// Persist the release branch and mark it programmatically set.
    pub fn set_release_branch(&mut self, branch: &str) -> Result<()> {
        self.persist(KEY_RELEASE_BRANCH, encode_null(branch))?;
        self.release_branch = Some(Resolved::new(branch, ValueSource::Programmatic));
        Ok(())
    }

    /// Persist the version file list and mark it programmatically set.
    pub fn set_version_file(&mut self, path: &str) -> Result<()> {
        self.persist(KEY_VERSION_FILE, encode_null(path))?;
        self.version_file = Some(Resolved::new(path, ValueSource::Programmatic));
        Ok(())
    }

    /// Persist the v-prefix flag.
    ///
    /// Booleans are written in their canonical text form, never
    /// sentinel-encoded.
    pub fn set_v_prefix(&mut self, v_prefix: bool) -> Result<()> {
        self.persist(KEY_VPREFIX, if v_prefix { "true" } else { "false" })?;
        self.v_prefix = Some(v_prefix);
        Ok(())
    }

    /// The branch releases are cut from, if resolved.
    pub fn release_branch(&self) -> Option<&Resolved> {
        self.release_branch.as_ref()
    }

    /// The version file list, if resolved.
    pub fn version_file(&self) -> Option<&Resolved> {
        self.version_file.as_ref()
    }

    /// The pre-release command, if resolved.
    pub fn command(&self) -> Option<&Resolved> {
        self.command.as_ref()
    }

    /// The pull request template, if resolved.
    pub fn template(&self) -> Option<&Resolved> {
        self.template.as_ref()
    }

    /// The v-prefix flag. `None` means not configured, which callers must
    /// distinguish from an explicit `false`.
    pub fn v_prefix(&self) -> Option<bool> {
        self.v_prefix
    }

    /// Path of the bound settings file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn persist(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.file.exists() {
            self.initialize_file()?;
        }
        if self.store.set(key, value).is_err() {
            // the settings file might be invalid or broken, so recreate it
            // and retry once
            self.initialize_file()?;
            self.store.set(key, value)?;
        }
        Ok(())
    }

    /// Recreate the settings file from default content, discarding whatever
    /// is there.
    fn initialize_file(&self) -> Result<()> {
        match fs::remove_file(&self.file) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::write(&self.file, DEFAULT_CONFIG_CONTENT)?;
        Ok(())
    }
}
