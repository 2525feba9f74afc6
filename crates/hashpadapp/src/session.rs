//! The editing session as an explicit value.
//!
//! Which document is open (its identity and the fragment it was last published
//! under) is not ambient state. Each command in [`crate::commands`] receives the
//! current [`SessionContext`] (or none, for a fresh load) and returns the next
//! one.
//!
//! ```text
//! Loading ──load──▶ Idle ◀──save── Editing
//!                    │  └──edit──────▲
//!                    └──new──▶ NewDocument ──▶ Idle
//! ```

use crate::identity::DocumentId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Idle,
    /// Edits happened and a save is pending.
    Editing,
    NewDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub doc_id: Option<DocumentId>,
    /// Raw fragment the document was last loaded from or published to.
    pub fragment: String,
    pub title: String,
    pub phase: Phase,
}

impl SessionContext {
    pub fn loading() -> Self {
        Self {
            doc_id: None,
            fragment: String::new(),
            title: String::new(),
            phase: Phase::Loading,
        }
    }

    /// Key under which this document's caret is remembered.
    ///
    /// The identity when there is one, otherwise the raw fragment.
    pub fn document_key(&self) -> &str {
        match &self.doc_id {
            Some(id) => id.as_str(),
            None => &self.fragment,
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_prefers_identity() {
        let mut session = SessionContext::loading();
        session.fragment = "AwA".to_string();
        assert_eq!(session.document_key(), "AwA");

        session.doc_id = DocumentId::from_docid("0123456789abcdef");
        assert_eq!(session.document_key(), "0123456789abcdef");
    }

    #[test]
    fn test_with_phase() {
        let session = SessionContext::loading().with_phase(Phase::Editing);
        assert_eq!(session.phase, Phase::Editing);
    }
}
