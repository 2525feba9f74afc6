//! # Address
//!
//! The address is where a document really lives. In a browser it is
//! `location.hash`; here it is anything implementing [`Address`].
//!
//! Two ways to publish a fragment mirror the browser's history API:
//!
//! - [`Address::replace`]: overwrite the current entry in place. Used by every
//!   ordinary save so typing does not flood the back button.
//! - [`Address::push`]: append a new entry. Used by "new document" so the
//!   previous document stays one step back.
//!
//! Fragments are passed around raw, without the leading `#`. An empty string
//! means "no fragment".

use crate::error::{HashpadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub trait Address {
    /// The current raw fragment, `""` when there is none.
    fn fragment(&self) -> String;

    /// Overwrite the current history entry.
    fn replace(&mut self, fragment: &str);

    /// Publish as a new history entry.
    fn push(&mut self, fragment: &str);
}

/// Address with an in-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAddress {
    entries: Vec<String>,
    current: usize,
}

impl Default for MemoryAddress {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
            current: 0,
        }
    }
}

impl MemoryAddress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `address`, which may be a URL, `#fragment` or bare fragment.
    pub fn at(address: &str) -> Self {
        Self {
            entries: vec![crate::fragment::fragment_from_address(address).to_string()],
            current: 0,
        }
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// A history must have at least one entry and point inside it.
    fn is_consistent(&self) -> bool {
        self.current < self.entries.len()
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.current + 1 >= self.entries.len() {
            return false;
        }
        self.current += 1;
        true
    }
}

impl Address for MemoryAddress {
    fn fragment(&self) -> String {
        self.entries[self.current].clone()
    }

    fn replace(&mut self, fragment: &str) {
        self.entries[self.current] = fragment.to_string();
    }

    fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(fragment.to_string());
        self.current = self.entries.len() - 1;
    }
}

/// A [`MemoryAddress`] loaded from and persisted to a JSON file.
///
/// Gives successive CLI invocations the same continuity a browser tab has.
/// Changes stay in memory until [`FileAddress::persist`] is called.
#[derive(Debug, Clone)]
pub struct FileAddress {
    path: PathBuf,
    inner: MemoryAddress,
}

impl FileAddress {
    /// Open the address file, starting empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let inner: MemoryAddress = serde_json::from_str(&content)
                .map_err(|e| HashpadError::Config(format!("{}: {}", path.display(), e)))?;
            if !inner.is_consistent() {
                return Err(HashpadError::Config(format!(
                    "{}: current entry {} outside a history of {}",
                    path.display(),
                    inner.current,
                    inner.entries.len()
                )));
            }
            inner
        } else {
            MemoryAddress::new()
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    pub fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.inner)
            .map_err(|e| HashpadError::Config(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Address for FileAddress {
    fn fragment(&self) -> String {
        self.inner.fragment()
    }

    fn replace(&mut self, fragment: &str) {
        self.inner.replace(fragment);
    }

    fn push(&mut self, fragment: &str) {
        self.inner.push(fragment);
    }
}
