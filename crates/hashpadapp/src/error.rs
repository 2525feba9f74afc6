//! # Error Taxonomy
//!
//! Hashpad distinguishes three families of failure, each with its own recovery
//! policy:
//!
//! | Error | Raised by | Recovery |
//! |-------|-----------|----------|
//! | [`DecodeError`] | codec, payload parsing | reset to a blank, identity-less document |
//! | [`StorageError`] | durable/session stores | swallowed at the call site, logged |
//! | [`SelectionError`] | caret mapping | caret capture returns 0, restore no-ops |
//!
//! None of them is ever surfaced to the person editing: the orchestrator always
//! ends in either the intended document or a clean blank one. [`HashpadError`]
//! exists for the outer layers (file stores, CLI, export) that do want to
//! report failures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("fragment is not valid url-safe base64: {0}")]
    Encoding(String),

    #[error("compressed stream is corrupt: {0}")]
    Compression(String),

    #[error("decoded payload is not valid UTF-8")]
    Utf8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("storage data is malformed: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Malformed(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no active selection")]
    NoSelection,

    #[error("selection lies outside the editable surface")]
    OutsideSurface,
}

#[derive(Error, Debug)]
pub enum HashpadError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, HashpadError>;
