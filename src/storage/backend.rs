//! Config store trait.

use crate::Result;

/// Key-value persistence for release settings, scoped to a single file.
///
/// Keys are dotted git-config style names (`relconf.releaseBranch`). Reads
/// report absence with `None` - a missing entry, a missing file or an
/// unreadable file all mean "not configured", never an error. Writes fail
/// hard and leave repair decisions to the caller.
///
/// Stores are used from one thread at a time; the trait carries no
/// `Send + Sync` bound.
pub trait ConfigStore {
    /// Read a value. `None` when the key is absent or the file unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Read a value as a boolean. `None` when absent or not
    /// boolean-parseable.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Storage location description (for display purposes).
    fn location(&self) -> String;
}
