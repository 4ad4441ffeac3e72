use super::backend::StorageBackend;
use crate::error::{CreelError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since creel is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
pub struct MemBackend {
    table: RefCell<Option<String>>,
    photos: RefCell<HashMap<String, Vec<u8>>>,
    simulate_locked: RefCell<bool>,
    simulate_io_failure: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            table: RefCell::new(None),
            photos: RefCell::new(HashMap::new()),
            simulate_locked: RefCell::new(false),
            simulate_io_failure: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing table text (e.g. a legacy export).
    pub fn with_table(text: &str) -> Self {
        let backend = Self::default();
        *backend.table.borrow_mut() = Some(text.to_string());
        backend
    }

    /// Make table writes fail as if the file were open in another program.
    pub fn set_simulate_locked(&self, locked: bool) {
        *self.simulate_locked.borrow_mut() = locked;
    }

    /// Make table writes fail with an I/O error, e.g. a full disk.
    pub fn set_simulate_io_failure(&self, failing: bool) {
        *self.simulate_io_failure.borrow_mut() = failing;
    }

    /// Raw table text as last written.
    pub fn table_text(&self) -> Option<String> {
        self.table.borrow().clone()
    }

    pub fn photo_bytes(&self, reference: &str) -> Option<Vec<u8>> {
        self.photos.borrow().get(reference).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read_table(&self) -> Result<Option<String>> {
        Ok(self.table.borrow().clone())
    }

    fn write_table(&self, content: &str) -> Result<()> {
        if *self.simulate_locked.borrow() {
            return Err(CreelError::StoreLocked(self.table_path()));
        }
        if *self.simulate_io_failure.borrow() {
            return Err(CreelError::Io(std::io::Error::other("disk full")));
        }
        *self.table.borrow_mut() = Some(content.to_string());
        Ok(())
    }

    fn table_path(&self) -> PathBuf {
        PathBuf::from("memory://catches.csv")
    }

    fn write_photo(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let reference = format!("photos/{}", file_name);
        self.photos
            .borrow_mut()
            .insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    fn photo_exists(&self, reference: &str) -> bool {
        self.photos.borrow().contains_key(reference)
    }

    fn photo_path(&self, reference: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", reference))
    }
}
