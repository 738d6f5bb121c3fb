use super::FavoritesBackend;
use crate::error::{FavdexError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory favorites backend for testing.
///
/// Uses `RefCell` for interior mutability since favdex is single-threaded.
/// Counts writes so tests can assert that a mutation was persisted.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<HashMap<String, Vec<usize>>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record, as if written by an earlier run.
    pub fn with_record(self, key: &str, positions: &[usize]) -> Self {
        self.records
            .borrow_mut()
            .insert(key.to_string(), positions.to_vec());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw view of a record, bypassing error simulation.
    pub fn record(&self, key: &str) -> Option<Vec<usize>> {
        self.records.borrow().get(key).cloned()
    }
}

impl FavoritesBackend for MemBackend {
    fn load_favorites(&self, key: &str) -> Result<Option<Vec<usize>>> {
        if self.simulate_read_error.get() {
            return Err(FavdexError::Store("Simulated read error".to_string()));
        }
        Ok(self.records.borrow().get(key).cloned())
    }

    fn save_favorites(&self, key: &str, positions: &[usize]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(FavdexError::Store("Simulated write error".to_string()));
        }
        self.records
            .borrow_mut()
            .insert(key.to_string(), positions.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
