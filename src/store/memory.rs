//! In-process store, handy for tests and dry runs.

use super::{RemoteStore, StoreError, VersionedContent};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<String, (String, u64)>>,
    writes: RefCell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource without going through the version check.
    pub fn put(&self, path: &str, content: &str) {
        let mut files = self.files.borrow_mut();
        let next = files.get(path).map(|(_, v)| v + 1).unwrap_or(1);
        files.insert(path.to_string(), (content.to_string(), next));
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).map(|(c, _)| c.clone())
    }

    /// Number of successful `write` calls.
    pub fn write_count(&self) -> u64 {
        *self.writes.borrow()
    }
}

impl RemoteStore for MemoryStore {
    fn read_versioned(&self, path: &str) -> Result<VersionedContent, StoreError> {
        self.files
            .borrow()
            .get(path)
            .map(|(content, v)| VersionedContent {
                content: content.clone(),
                version: v.to_string(),
            })
            .ok_or_else(|| StoreError::not_found(path))
    }

    fn read_raw(&self, path: &str) -> Result<String, StoreError> {
        self.get(path).ok_or_else(|| StoreError::not_found(path))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        expected: Option<&str>,
        _message: &str,
    ) -> Result<String, StoreError> {
        let mut files = self.files.borrow_mut();
        let current = files.get(path).map(|(_, v)| v.to_string());

        match (expected, current.as_deref()) {
            (Some(_), None) => return Err(StoreError::not_found(path)),
            (Some(want), Some(have)) if want != have => {
                return Err(StoreError::conflict(path, "version token is stale"));
            }
            (None, Some(_)) => return Err(StoreError::conflict(path, "resource already exists")),
            _ => {}
        }

        let next = current.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0) + 1;
        files.insert(path.to_string(), (content.to_string(), next));
        *self.writes.borrow_mut() += 1;
        Ok(next.to_string())
    }
}
