//! # Command Layer
//!
//! This module contains the **persistence orchestration** of hashpad. Each
//! lifecycle step lives in its own submodule as a plain function over a
//! [`Workspace`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where load and save actually happen:
//! - Resolve, decode and render fragments
//! - Encode and publish the surface's state
//! - Remember and restore the caret per document
//! - Thread the [`crate::session::SessionContext`] through: take the current one, return the next
//!
//! ## What Commands Do NOT Do
//!
//! - **Scheduling**: debouncing lives in [`crate::api`]
//! - **Terminal I/O**: the CLI crate renders results
//! - **Fail**: every storage or decode problem is recovered here. A command always
//!   leaves the surface showing either the intended document or a blank one.
//!
//! ## Command Modules
//!
//! - [`load`]: resolve a fragment (address, then durable fallback) and render it
//! - [`save`]: encode the surface and publish it in place
//! - [`create`]: start a new document with a fresh identity
//! - [`caret`]: capture/restore the caret offset for the current document
//! - [`export`]: turn the current document into a downloadable file

use crate::address::Address;
use crate::config::HashpadConfig;
use crate::store::KeyValueStore;
use crate::surface::EditableSurface;

pub mod caret;
pub mod create;
pub mod export;
pub mod load;
pub mod save;

/// Everything a command touches, borrowed for the duration of one call.
pub struct Workspace<'a> {
    pub address: &'a mut dyn Address,
    /// Survives restarts; holds the last published fragment.
    pub durable: &'a dyn KeyValueStore,
    /// Per editing session; holds caret offsets.
    pub session: &'a dyn KeyValueStore,
    pub surface: &'a mut dyn EditableSurface,
    pub config: &'a HashpadConfig,
}

impl Workspace<'_> {
    /// Title for the surface's current content.
    pub fn current_title(&self) -> String {
        crate::document::derive_title(&self.surface.content(), &self.config.default_title)
    }
}

