//! Persistence layer for release settings.
//!
//! Two stores implement [`ConfigStore`]:
//! - [`GitConfigStore`] - the settings file via the git binary (default)
//! - [`MemoryStore`] - shared in-memory map for tests and embedders

pub mod backend;
pub mod git_config;
pub mod memory;

pub use backend::ConfigStore;
pub use git_config::GitConfigStore;
pub use memory::MemoryStore;
