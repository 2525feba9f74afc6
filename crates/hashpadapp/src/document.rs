//! # Document State and Payload Format
//!
//! A hashpad document is nothing more than a pair:
//!
//! - `content`: the text being edited
//! - `style`: an opaque string (in practice CSS declarations applied to the
//!   editing surface), possibly empty
//!
//! [`DocumentState`] is never stored on its own. It is read off the surface when
//! saving and rendered onto the surface when loading.
//!
//! ## Payload
//!
//! Before compression the pair is flattened into a single string:
//!
//! ```text
//! <content>            style is empty
//! <content>\0<style>   style present
//! ```
//!
//! Parsing splits on the **first** NUL. Content cannot carry a NUL of its own (it
//! would be indistinguishable from the separator), so NULs are dropped from the
//! content when the payload is built.
//!
//! ## Empty Documents
//!
//! An empty pair encodes to the empty data token rather than to a compressed
//! empty stream, so a brand-new document's address is just `#;<docid>`. The empty
//! token decodes back to the empty pair.
//!
//! ## Titles
//!
//! [`derive_title`] is a read-only scan used to label the document (window title,
//! export filename). Only a Markdown ATX heading on the first non-blank line
//! counts, e.g. `# Groceries`. Long titles are truncated to 60 characters for
//! display (59 chars + `…`).

use crate::codec;
use crate::error::{DecodeError, Result};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Separates content from style inside the payload.
pub const STYLE_SEPARATOR: char = '\0';

const TITLE_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    pub content: String,
    pub style: String,
}

impl DocumentState {
    pub fn new(content: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: style.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty() && self.style.is_empty()
    }

    /// Flatten into the pre-compression payload.
    pub fn to_payload(&self) -> String {
        let content: String = self
            .content
            .chars()
            .filter(|&c| c != STYLE_SEPARATOR)
            .collect();
        let dropped = self.content.len() - content.len();
        if dropped > 0 {
            tracing::debug!("dropped {} NUL characters from content", dropped);
        }
        if self.style.is_empty() {
            content
        } else {
            format!("{}{}{}", content, STYLE_SEPARATOR, self.style)
        }
    }

    /// Split a payload on its first NUL. No NUL means no style.
    pub fn from_payload(payload: &str) -> Self {
        match payload.split_once(STYLE_SEPARATOR) {
            Some((content, style)) => Self::new(content, style),
            None => Self::new(payload, ""),
        }
    }

    /// Encode into a fragment data token.
    pub fn encode(&self, level: u32) -> Result<String> {
        if self.is_blank() {
            return Ok(String::new());
        }
        codec::compress_with_level(&self.to_payload(), level)
    }

    /// Decode a fragment data token.
    pub fn decode(data: &str) -> std::result::Result<Self, DecodeError> {
        codec::decompress(data).map(|payload| Self::from_payload(&payload))
    }

    pub fn title(&self, default: &str) -> String {
        derive_title(&self.content, default)
    }
}

/// Title from a leading ATX heading, or `default`.
pub fn derive_title(content: &str, default: &str) -> String {
    let Some(first_line) = content.lines().find(|l| !l.trim().is_empty()) else {
        return default.to_string();
    };

    let mut events = Parser::new(first_line);
    if !matches!(events.next(), Some(Event::Start(Tag::Heading { .. }))) {
        return default.to_string();
    }

    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    let title = text.trim();
    if title.is_empty() {
        return default.to_string();
    }
    truncate_title(title)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = title.chars().take(TITLE_MAX_CHARS - 1).collect();
        format!("{}…", truncated)
    } else {
        title.to_string()
    }
}

/// Whether the content opens with a heading (used to pick `.md` on export).
pub fn starts_with_heading(content: &str) -> bool {
    derive_title(content, "") != ""
}
