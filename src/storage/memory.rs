use super::StorageBackend;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<String, String>,
    write_count: usize,
}

/// In-memory storage for tests. Clones share the same slots, so a test can
/// hand one handle to the store and keep another to observe writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a test thread panicked mid-write; the
        // map itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of writes performed across all slots. Used by debounce tests
    /// to assert coalescing.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    /// Raw stored payload for a slot, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().slots.get(key).cloned()
    }
}

impl StorageBackend for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().slots.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.slots.insert(key.to_string(), payload.to_string());
        inner.write_count += 1;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock().slots.remove(key);
        Ok(())
    }
}
