//! In-process slot backend.

use super::{KvBackend, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Map-backed [`KvBackend`] for ephemeral sessions and tests.
///
/// Counts committed writes so callers can observe persistence side effects.
#[derive(Debug, Default)]
pub struct MemoryKvBackend {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw text without counting it as a write.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Returns raw stored text for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of `write` calls committed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KvBackend for MemoryKvBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.insert_raw(key, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
