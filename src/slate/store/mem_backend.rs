use super::backend::StorageBackend;
use crate::error::{Result, SlateError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the ledger is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (e.g. an exhausted storage quota).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Put an arbitrary raw value under `key`, bypassing serialization.
    /// Used to plant corrupt data.
    pub fn put_raw(&self, key: &str, raw: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SlateError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        format!("memory://{}", key)
    }
}
