use super::{caret, Workspace};
use crate::address::Address;
use crate::document::DocumentState;
use crate::error::DecodeError;
use crate::fragment::Fragment;
use crate::identity::DocumentId;
use crate::session::{Phase, SessionContext};
use crate::store::{read_best_effort, LAST_FRAGMENT_KEY};

/// Where a load found its fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    Address,
    DurableStorage,
    Nothing,
}

/// A successfully decoded fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub state: DocumentState,
    pub doc_id: Option<DocumentId>,
    /// The raw fragment it came from.
    pub fragment: String,
}

impl LoadedDocument {
    pub fn blank() -> Self {
        Self {
            state: DocumentState::blank(),
            doc_id: None,
            fragment: String::new(),
        }
    }
}

/// Recovery for a failed decode: a blank document with no identity.
pub trait OrBlank {
    fn or_blank(self) -> LoadedDocument;
}

impl OrBlank for Result<LoadedDocument, DecodeError> {
    fn or_blank(self) -> LoadedDocument {
        self.unwrap_or_else(|e| {
            tracing::warn!("discarding undecodable fragment: {}", e);
            LoadedDocument::blank()
        })
    }
}

/// Parse and decode a raw fragment.
pub fn decode_fragment(raw: &str) -> Result<LoadedDocument, DecodeError> {
    let fragment = Fragment::parse(raw);
    let state = DocumentState::decode(&fragment.data)?;
    Ok(LoadedDocument {
        state,
        doc_id: DocumentId::from_docid(&fragment.docid),
        fragment: raw.to_string(),
    })
}

/// The current address fragment, else the last one recorded in durable storage.
pub fn resolve_fragment(ws: &Workspace<'_>) -> (String, FragmentSource) {
    let from_address = ws.address.fragment();
    if !from_address.is_empty() {
        return (from_address, FragmentSource::Address);
    }
    match read_best_effort(ws.durable, LAST_FRAGMENT_KEY) {
        Some(stored) if !stored.is_empty() => (stored, FragmentSource::DurableStorage),
        _ => (String::new(), FragmentSource::Nothing),
    }
}

/// Load whatever the address (or its fallback) points at onto the surface.
///
/// Never fails: an undecodable fragment leaves a blank, identity-less document.
pub fn run(ws: &mut Workspace<'_>) -> SessionContext {
    let (raw, source) = resolve_fragment(ws);
    tracing::debug!("loading fragment from {:?}", source);

    let loaded = decode_fragment(&raw).or_blank();
    ws.surface.render(&loaded.state);

    if source == FragmentSource::DurableStorage && !loaded.fragment.is_empty() {
        ws.address.replace(&loaded.fragment);
    }

    let session = SessionContext {
        doc_id: loaded.doc_id,
        fragment: loaded.fragment,
        title: loaded.state.title(&ws.config.default_title),
        phase: Phase::Idle,
    };

    ws.surface.focus();
    caret::restore(ws, &session);
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caret::capture_offset;
    use crate::codec;
    use crate::store::KeyValueStore;
    use crate::surface::EditableSurface;
    use crate::test_utils::TestEnv;

    fn fragment_for(content: &str, style: &str, docid: &str) -> String {
        let data = DocumentState::new(content, style).encode(6).unwrap();
        Fragment::new(data, docid).build()
    }

    #[test]
    fn test_load_from_address() {
        let raw = fragment_for("# Hello\nworld", "color:red", "0123456789abcdef");
        let mut env = TestEnv::at(&format!("https://pad.test/#{}", raw));

        let session = run(&mut env.ws());

        assert_eq!(env.surface.content(), "# Hello\nworld");
        assert_eq!(env.surface.style(), "color:red");
        assert_eq!(session.doc_id.unwrap().as_str(), "0123456789abcdef");
        assert_eq!(session.fragment, raw);
        assert_eq!(session.title, "Hello");
        assert_eq!(session.phase, Phase::Idle);
        assert!(env.surface.is_focused());
    }

    #[test]
    fn test_load_legacy_fragment_without_identity() {
        let raw = codec::compress("legacy text").unwrap();
        let mut env = TestEnv::at(&format!("#{}", raw));

        let session = run(&mut env.ws());

        assert_eq!(env.surface.content(), "legacy text");
        assert_eq!(session.doc_id, None);
        assert_eq!(session.document_key(), raw);
        assert_eq!(session.title, "Untitled");
    }

    #[test]
    fn test_load_falls_back_to_durable_storage() {
        let raw = fragment_for("remembered", "", "0123456789abcdef");
        let mut env = TestEnv::new();
        env.durable.set_item(LAST_FRAGMENT_KEY, &raw).unwrap();

        let (_, source) = resolve_fragment(&env.ws());
        assert_eq!(source, FragmentSource::DurableStorage);

        let session = run(&mut env.ws());
        assert_eq!(env.surface.content(), "remembered");
        assert_eq!(session.fragment, raw);
        // The address now reflects the document again.
        assert_eq!(env.address.fragment(), raw);
        assert_eq!(env.address.history_len(), 1);
    }

    #[test]
    fn test_address_wins_over_durable_storage() {
        let in_address = fragment_for("from address", "", "");
        let mut env = TestEnv::at(&in_address);
        env.durable
            .set_item(LAST_FRAGMENT_KEY, &fragment_for("from storage", "", ""))
            .unwrap();

        run(&mut env.ws());
        assert_eq!(env.surface.content(), "from address");
    }

    #[test]
    fn test_load_nothing_gives_blank() {
        let mut env = TestEnv::new();
        let (_, source) = resolve_fragment(&env.ws());
        assert_eq!(source, FragmentSource::Nothing);

        let session = run(&mut env.ws());
        assert_eq!(env.surface.content(), "");
        assert_eq!(session.doc_id, None);
        assert_eq!(session.fragment, "");
    }

    #[test]
    fn test_corrupt_fragment_resets_to_blank() {
        let mut env = TestEnv::at("#***invalid***");
        env.surface.render(&DocumentState::new("stale", "stale:style"));

        let session = run(&mut env.ws());

        assert_eq!(env.surface.state(), DocumentState::blank());
        assert_eq!(session.doc_id, None);
        assert_eq!(session.fragment, "");
        assert_eq!(session.title, "Untitled");
    }

    #[test]
    fn test_corrupt_fragment_with_identity_drops_identity() {
        let mut env = TestEnv::at("#!!!!;0123456789abcdef");
        let session = run(&mut env.ws());
        assert_eq!(session.doc_id, None);
        assert!(env.surface.state().is_blank());
    }

    #[test]
    fn test_corrupt_durable_fallback_resets_without_touching_address() {
        let mut env = TestEnv::new();
        env.durable.set_item(LAST_FRAGMENT_KEY, "%%%").unwrap();

        let session = run(&mut env.ws());
        assert_eq!(session.fragment, "");
        assert_eq!(env.address.fragment(), "");
    }

    #[test]
    fn test_unavailable_durable_storage_is_ignored() {
        let mut env = TestEnv::new();
        env.durable.set_unavailable(true);
        let session = run(&mut env.ws());
        assert_eq!(session.fragment, "");
    }

    #[test]
    fn test_empty_new_document_fragment_keeps_identity() {
        let mut env = TestEnv::at("#;0123456789abcdef");
        let session = run(&mut env.ws());
        assert_eq!(env.surface.content(), "");
        assert_eq!(session.doc_id.unwrap().as_str(), "0123456789abcdef");
    }

    #[test]
    fn test_load_restores_remembered_caret() {
        let raw = fragment_for("hello world", "", "0123456789abcdef");
        let mut env = TestEnv::at(&raw);
        env.session
            .set_item("hashpad:caret:0123456789abcdef", "6")
            .unwrap();

        run(&mut env.ws());
        assert_eq!(capture_offset(&env.surface), 6);
    }

    #[test]
    fn test_load_clamps_remembered_caret() {
        let raw = fragment_for("short", "", "0123456789abcdef");
        let mut env = TestEnv::at(&raw);
        env.session
            .set_item("hashpad:caret:0123456789abcdef", "500")
            .unwrap();

        run(&mut env.ws());
        assert_eq!(capture_offset(&env.surface), 5);
    }

    #[test]
    fn test_or_blank_passes_success_through() {
        let raw = fragment_for("ok", "", "");
        let loaded = decode_fragment(&raw).or_blank();
        assert_eq!(loaded.state.content, "ok");
        assert_eq!(decode_fragment("@@@").or_blank(), LoadedDocument::blank());
    }
}
