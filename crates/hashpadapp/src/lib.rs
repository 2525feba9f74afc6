//! # Hashpad Architecture
//!
//! Hashpad is a **single-document notepad whose only persistence is the
//! address**. The whole document (content plus an optional style string) is
//! compressed into the URL fragment, so a link *is* the document. Local storage
//! only adds conveniences: the last fragment for a cold start, and the caret
//! position per document.
//!
//! This crate is UI-agnostic. A browser front-end, the `hashpad` CLI, and the
//! tests all drive the same [`api::HashpadApi`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front-end (CLI crate, browser glue, tests)                 │
//! │  - Turns user events into API calls, renders results        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns collaborators, session and debounce timers          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - load / save / create / caret / export                    │
//! │  - SessionContext in, SessionContext out                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Building blocks                                            │
//! │  codec, fragment, identity, document, caret, surface,       │
//! │  store/, address                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! content ─┐
//!          ├─ payload "content\0style" ─ raw deflate ─ base64url ─ data
//! style ───┘                                                        │
//!                                          fragment "#data;docid" ◀─┘
//! ```
//!
//! ## Module Overview
//!
//! - [`codec`]: text to URL-safe token and back
//! - [`fragment`]: `data[;docid]` parsing and building
//! - [`identity`]: 16-char document identities
//! - [`document`]: the content/style pair, payload framing, title derivation
//! - [`caret`]: offset capture/restore over any [`surface::EditableSurface`]
//! - [`surface`]: the editing surface abstraction and an in-memory tree
//! - [`store`]: best-effort key/value storage
//! - [`address`]: the address bar abstraction
//! - [`session`]: the explicit session context
//! - [`debounce`]: trailing-edge timers
//! - [`commands`]: persistence orchestration
//! - [`api`]: the event facade
//! - [`config`]: `hashpad.toml` + `HASHPAD_*` settings
//! - [`init`]: data directory and file-backed wiring
//! - [`error`]: error taxonomy

pub mod address;
pub mod api;
pub mod caret;
pub mod codec;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod fragment;
pub mod identity;
pub mod init;
pub mod session;
pub mod store;
pub mod surface;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
