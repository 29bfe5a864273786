//! Relconf - layered configuration resolution for release automation.
//!
//! This library resolves the settings a release pipeline needs (release
//! branch, version files, tag v-prefix, pre-release command, pull request
//! template) from two layers, in strict precedence order:
//!
//! 1. Process environment variables (`RELEASE_BRANCH`, `VERSION_FILE`, ...)
//! 2. A git-config formatted settings file (`.relconf`) in the repository root
//!
//! Each resolved value carries its source so callers can report where a
//! setting came from. Writes go back to the settings file through
//! [`storage::ConfigStore`], recreating the file from documented default
//! content if it is missing or broken.

pub mod config;
pub mod storage;

/// Library-level error type for relconf operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid boolean {value:?} in environment variable {var}")]
    InvalidEnvironmentValue { var: &'static str, value: String },

    #[error("failed to persist {key}: {details}")]
    Persistence { key: String, details: String },
}

/// Result type alias for relconf operations.
pub type Result<T> = std::result::Result<T, Error>;
