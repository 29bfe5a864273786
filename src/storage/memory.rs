//! In-memory config store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::backend::ConfigStore;
use crate::config::parse_bool;
use crate::{Error, Result};

/// Config store backed by a shared in-memory map.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the resolver wrote. `fail_writes` makes the next N writes fail, which is
/// how the self-repair path is exercised without a real broken file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    failing_writes: Rc<Cell<u32>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry as stored, sentinel included.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Insert an entry directly, bypassing any resolver.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Remove an entry directly.
    pub fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    /// Make the next `count` writes fail.
    pub fn fail_writes(&self, count: u32) {
        self.failing_writes.set(count);
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.raw(key).and_then(|v| parse_bool(&v))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let remaining = self.failing_writes.get();
        if remaining > 0 {
            self.failing_writes.set(remaining - 1);
            return Err(Error::Persistence {
                key: key.to_string(),
                details: "write failure injected".to_string(),
            });
        }
        self.insert(key, value);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.set("relconf.releaseBranch", "main").unwrap();
        assert_eq!(store.raw("relconf.releaseBranch").as_deref(), Some("main"));
    }

    #[test]
    fn test_get_bool_parses_stored_text() {
        let store = MemoryStore::new();
        store.insert("relconf.vPrefix", "True");
        assert_eq!(store.get_bool("relconf.vPrefix"), Some(true));

        store.insert("relconf.vPrefix", "nope");
        assert_eq!(store.get_bool("relconf.vPrefix"), None);
    }

    #[test]
    fn test_fail_writes_counts_down() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        store.fail_writes(1);

        assert!(handle.set("relconf.command", "make dist").is_err());
        assert!(handle.set("relconf.command", "make dist").is_ok());
        assert_eq!(store.raw("relconf.command").as_deref(), Some("make dist"));
    }
}
