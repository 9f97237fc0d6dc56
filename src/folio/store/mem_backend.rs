use super::backend::StorageBackend;
use crate::error::{FolioError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since folio is single-threaded, which keeps
/// the `StorageBackend` trait on `&self`.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    failing_key: RefCell<Option<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing rollback paths.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Fail writes to `key` only, leaving every other key writable.
    pub fn set_failing_key(&self, key: Option<&str>) {
        *self.failing_key.borrow_mut() = key.map(str::to_string);
    }

    /// Number of successful writes, across all keys.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Seed a key directly, bypassing the write counter.
    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() || self.failing_key.borrow().as_deref() == Some(key) {
            return Err(FolioError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}
