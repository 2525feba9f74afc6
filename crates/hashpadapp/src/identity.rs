//! # Document Identity
//!
//! Every time content changes, the data token in the address changes with it. The
//! document identity is what lets two different addresses still be "the same
//! document": a short opaque token minted once per *new document* and carried
//! unchanged through every subsequent save.
//!
//! ## Format
//!
//! Exactly 16 characters of lowercase ASCII alphanumerics, e.g.
//! `3f9c0a7d21be4c58`.
//!
//! ## Generation
//!
//! 1. Draw a random value from the strongest available source. By default this
//!    is a v4 UUID built from 16 bytes of operating system randomness.
//! 2. Strip everything that is not alphanumeric (the hyphens).
//! 3. Lowercase.
//! 4. Keep the first 16 characters.
//!
//! [`IdSource::TimeComposite`] is the fallback when the secure source fails to
//! deliver: the current time, a process-local counter and a per-process randomly
//! seeded hasher are mixed together, then run through the same steps.
//!
//! Identities are not registered anywhere. Uniqueness is statistical: 64 bits of
//! entropy is far beyond what concurrent "new document" clicks can collide on.

use crate::error::{HashpadError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Builder;

/// Length of a generated identity.
pub const ID_LEN: usize = 16;

static COMPOSITE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdSource {
    /// OS-backed random UUID.
    #[default]
    Secure,
    /// Time + counter + per-process random state.
    TimeComposite,
}

fn composite_entropy() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let count = COMPOSITE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = RandomState::new().build_hasher();
    nanos.hash(&mut hasher);
    count.hash(&mut hasher);
    format!("{:016x}{:x}{:x}", hasher.finish(), nanos, count)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Mint a fresh identity from the secure source, falling back to the
    /// time composite when it is unavailable.
    pub fn generate() -> Self {
        Self::generate_from(IdSource::Secure)
    }

    pub fn generate_from(source: IdSource) -> Self {
        match source {
            IdSource::Secure => Self::generate_with(getrandom::fill),
            IdSource::TimeComposite => Self(sanitize(&composite_entropy())),
        }
    }

    /// Mint an identity from `fill`, which must fill the buffer with random
    /// bytes. Any error switches to the time composite.
    pub fn generate_with<E: fmt::Display>(
        fill: impl FnOnce(&mut [u8]) -> std::result::Result<(), E>,
    ) -> Self {
        let mut bytes = [0u8; 16];
        let raw = match fill(&mut bytes) {
            Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
            Err(e) => {
                tracing::warn!("secure random source unavailable ({}), using time composite", e);
                composite_entropy()
            }
        };
        Self(sanitize(&raw))
    }

    /// Strictly validate an identity: 16 lowercase alphanumerics.
    pub fn parse(s: &str) -> Result<Self> {
        if is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(HashpadError::InvalidId(s.to_string()))
        }
    }

    /// Accept whatever an address carries as an opaque identity.
    ///
    /// Returns `None` for the empty string, which means "no identity".
    pub fn from_docid(docid: &str) -> Option<Self> {
        if docid.is_empty() {
            None
        } else {
            Some(Self(docid.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .take(ID_LEN)
        .collect()
}

pub fn is_well_formed(s: &str) -> bool {
    s.len() == ID_LEN
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
