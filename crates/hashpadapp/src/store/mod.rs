//! # Storage Layer
//!
//! The address fragment is the authoritative copy of a document. Everything in
//! this module is a *convenience* on top of it, and every access is best-effort.
//!
//! ## Two Stores
//!
//! | Store | Lifetime | Holds |
//! |-------|----------|-------|
//! | Durable | survives restarts | the last published fragment, under [`LAST_FRAGMENT_KEY`] |
//! | Session | one editing session | one caret offset per document, under [`caret_key`] |
//!
//! Both are plain string key/value stores behind the [`KeyValueStore`] trait,
//! shaped after the browser's Web Storage API.
//!
//! ## Best-Effort Policy
//!
//! Storage can be missing, disabled, or full. None of that is allowed to break
//! editing: [`read_best_effort`] and [`write_best_effort`] catch every
//! [`StorageError`], log it at debug level, and carry on. There is no retry; the
//! next save simply tries again. When storage is gone the editor degrades to
//! address-only persistence (and no caret memory).
//!
//! ## Implementations
//!
//! - [`memory::MemoryStore`]: in-process map with failure simulation for tests.
//! - [`fs::FileStore`]: one JSON file, written atomically (tmp file + rename).

use crate::error::StorageError;

pub mod fs;
pub mod memory;

/// Durable-store key holding the last published fragment.
pub const LAST_FRAGMENT_KEY: &str = "hashpad:last";

const CARET_KEY_PREFIX: &str = "hashpad:caret:";

/// Session-store key for a document's caret: its identity, else its raw fragment.
pub fn caret_key(document_key: &str) -> String {
    format!("{}{}", CARET_KEY_PREFIX, document_key)
}

/// Abstract string key/value storage.
///
/// Methods take `&self`; implementations use interior mutability since hashpad
/// runs in a single execution context.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read a key, treating any failure as "not there".
pub fn read_best_effort<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("storage read of {} failed: {}", key, e);
            None
        }
    }
}

/// Write a key, swallowing failures. Returns whether the write landed.
pub fn write_best_effort<S: KeyValueStore + ?Sized>(store: &S, key: &str, value: &str) -> bool {
    match store.set_item(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("storage write of {} failed: {}", key, e);
            false
        }
    }
}
