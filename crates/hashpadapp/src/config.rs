//! # Configuration
//!
//! Hashpad configuration is loaded with [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `HASHPAD_SAVE_DEBOUNCE_MS`, `HASHPAD_DEFAULT_TITLE`, etc.
//! 2. **Config file**: `hashpad.toml` in the data directory (see [`crate::init`]).
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `save_debounce_ms` | `500` | Quiet period after the last edit before saving |
//! | `caret_debounce_ms` | `150` | Quiet period after the last selection change before capturing the caret |
//! | `default_title` | `Untitled` | Title used when the content has no leading heading |
//! | `compression_level` | `6` | Deflate level, 0 (store) to 9 (smallest) |
//! | `base_url` | unset | Prefix the CLI puts in front of `#fragment` when printing addresses |

use crate::error::{HashpadError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "hashpad.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HashpadConfig {
    /// Milliseconds of quiet after an edit before the document is saved.
    #[config(env = "HASHPAD_SAVE_DEBOUNCE_MS", default = 500)]
    pub save_debounce_ms: u64,

    /// Milliseconds of quiet after a selection change before the caret is captured.
    #[config(env = "HASHPAD_CARET_DEBOUNCE_MS", default = 150)]
    pub caret_debounce_ms: u64,

    /// Title shown when the content does not start with a heading.
    #[config(env = "HASHPAD_DEFAULT_TITLE", default = "Untitled")]
    pub default_title: String,

    /// Deflate compression level (0-9).
    #[config(env = "HASHPAD_COMPRESSION_LEVEL", default = 6)]
    pub compression_level: u32,

    /// Base URL for printed addresses, e.g. "https://pad.example/".
    #[config(env = "HASHPAD_BASE_URL")]
    pub base_url: Option<String>,
}

impl Default for HashpadConfig {
    fn default() -> Self {
        Self {
            save_debounce_ms: 500,
            caret_debounce_ms: 150,
            default_title: "Untitled".to_string(),
            compression_level: crate::codec::DEFAULT_LEVEL,
            base_url: None,
        }
    }
}

impl HashpadConfig {
    /// Load from the environment and `<dir>/hashpad.toml` (if present).
    pub fn load(dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| HashpadError::Config(e.to_string()))
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn caret_debounce(&self) -> Duration {
        Duration::from_millis(self.caret_debounce_ms)
    }

    /// Render a full address for a raw fragment.
    pub fn address_for(&self, fragment: &str) -> String {
        match &self.base_url {
            Some(base) => {
                let base = base.split('#').next().unwrap_or_default();
                format!("{}#{}", base, fragment)
            }
            None => format!("#{}", fragment),
        }
    }
}
