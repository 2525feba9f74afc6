//! # Data Directory and Wiring
//!
//! The CLI stands in for a browser tab: the address bar, `localStorage` and
//! `sessionStorage` all become small JSON files in one data directory, so
//! successive invocations behave like reloads of the same page.
//!
//! ```text
//! <data dir>/
//!   address.json   current fragment + history (FileAddress)
//!   durable.json   last published fragment   (FileStore)
//!   session.json   caret offsets             (FileStore)
//!   hashpad.toml   optional config
//! ```
//!
//! ## Locating the Directory
//!
//! 1. `HASHPAD_DATA` if set (tests use this to isolate state).
//! 2. Otherwise the OS data directory via the `directories` crate.

use crate::address::FileAddress;
use crate::api::HashpadApi;
use crate::config::HashpadConfig;
use crate::error::{HashpadError, Result};
use crate::store::fs::FileStore;
use crate::surface::TreeSurface;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "HASHPAD_DATA";
pub const ADDRESS_FILE: &str = "address.json";
pub const DURABLE_FILE: &str = "durable.json";
pub const SESSION_FILE: &str = "session.json";

pub type FileApi = HashpadApi<FileAddress, FileStore, FileStore, TreeSurface>;

pub struct HashpadContext {
    pub api: FileApi,
    pub data_dir: PathBuf,
}

impl HashpadContext {
    /// Write the address back to disk. Stores persist on every write already.
    pub fn persist(&self) -> Result<()> {
        self.api.address().persist()
    }
}

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "hashpad", "hashpad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| HashpadError::Config("could not determine a data directory".to_string()))
}

/// Build the file-backed API rooted at `dir`, creating the directory if needed.
///
/// Nothing is loaded yet; callers decide whether to `load`, `new_document`, etc.
pub fn initialize_in(dir: &Path) -> Result<HashpadContext> {
    std::fs::create_dir_all(dir)?;
    let config = HashpadConfig::load(dir)?;
    let address = FileAddress::open(dir.join(ADDRESS_FILE))?;
    let durable = FileStore::new(dir.join(DURABLE_FILE));
    let session = FileStore::new(dir.join(SESSION_FILE));
    tracing::debug!("data directory: {}", dir.display());

    Ok(HashpadContext {
        api: HashpadApi::new(address, durable, session, TreeSurface::new(), config),
        data_dir: dir.to_path_buf(),
    })
}

pub fn initialize() -> Result<HashpadContext> {
    initialize_in(&data_dir()?)
}
