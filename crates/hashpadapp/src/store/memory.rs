use super::KeyValueStore;
use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key/value store.
///
/// Uses `RefCell` for interior mutability since hashpad is single-threaded.
/// Failure modes can be switched on to exercise the best-effort paths:
/// an unavailable store fails every call, and a quota rejects writes that would
/// push the total size (keys + values, in bytes) past the limit.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    unavailable: RefCell<bool>,
    quota: RefCell<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::new();
        *store.quota.borrow_mut() = Some(bytes);
        store
    }

    /// Simulate storage being disabled (private browsing, policy, ...).
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.borrow_mut() = unavailable;
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if *self.unavailable.borrow() {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if let Some(quota) = *self.quota.borrow() {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
