use super::Workspace;
use crate::caret::{capture_offset, restore_offset};
use crate::session::SessionContext;
use crate::store::{caret_key, read_best_effort, write_best_effort};

/// Snapshot the caret and remember it for the current document.
///
/// Returns the captured offset (0 when the selection is missing or elsewhere).
pub fn capture(ws: &mut Workspace<'_>, session: &SessionContext) -> usize {
    let offset = capture_offset(&*ws.surface);
    remember(ws, session.document_key(), offset);
    offset
}

/// Best-effort write of `offset` under the document's caret key.
pub fn remember(ws: &Workspace<'_>, document_key: &str, offset: usize) {
    write_best_effort(ws.session, &caret_key(document_key), &offset.to_string());
}

/// The remembered offset, if one is stored and parses.
pub fn recall(ws: &Workspace<'_>, document_key: &str) -> Option<usize> {
    let raw = read_best_effort(ws.session, &caret_key(document_key))?;
    match raw.trim().parse() {
        Ok(offset) => Some(offset),
        Err(_) => {
            tracing::debug!("ignoring unparsable caret entry {:?}", raw);
            None
        }
    }
}

/// Put the caret back where it was for this document (start when unknown).
///
/// Returns the offset that was restored.
pub fn restore(ws: &mut Workspace<'_>, session: &SessionContext) -> usize {
    let offset = recall(ws, session.document_key()).unwrap_or(0);
    restore_offset(&mut *ws.surface, offset);
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DocumentId;
    use crate::store::KeyValueStore;
    use crate::test_utils::TestEnv;

    fn session_with_id(id: &str) -> SessionContext {
        let mut session = SessionContext::loading();
        session.doc_id = DocumentId::from_docid(id);
        session
    }

    #[test]
    fn test_capture_persists_under_identity() {
        let mut env = TestEnv::with_content("hello\nworld");
        let session = session_with_id("0123456789abcdef");
        restore_offset(&mut env.surface, 8);

        let offset = capture(&mut env.ws(), &session);
        assert_eq!(offset, 8);
        assert_eq!(
            env.session.get_item("hashpad:caret:0123456789abcdef").unwrap(),
            Some("8".to_string())
        );
    }

    #[test]
    fn test_capture_keys_by_fragment_without_identity() {
        let mut env = TestEnv::with_content("abc");
        let mut session = SessionContext::loading();
        session.fragment = "S0xKBgA".to_string();
        restore_offset(&mut env.surface, 2);

        capture(&mut env.ws(), &session);
        assert_eq!(
            env.session.get_item("hashpad:caret:S0xKBgA").unwrap(),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_capture_without_selection_stores_zero() {
        let mut env = TestEnv::with_content("abc");
        let session = session_with_id("0123456789abcdef");
        assert_eq!(capture(&mut env.ws(), &session), 0);
    }

    #[test]
    fn test_restore_round_trip() {
        let mut env = TestEnv::with_content("line one\nline two");
        let session = session_with_id("0123456789abcdef");
        restore_offset(&mut env.surface, 12);
        capture(&mut env.ws(), &session);

        env.surface.clear_selection();
        let restored = restore(&mut env.ws(), &session);
        assert_eq!(restored, 12);
        assert_eq!(capture_offset(&env.surface), 12);
    }

    #[test]
    fn test_restore_defaults_to_start() {
        let mut env = TestEnv::with_content("abc");
        let session = session_with_id("0123456789abcdef");
        assert_eq!(restore(&mut env.ws(), &session), 0);
        assert_eq!(capture_offset(&env.surface), 0);
    }

    #[test]
    fn test_restore_ignores_garbage_entry() {
        let mut env = TestEnv::with_content("abc");
        env.session
            .set_item("hashpad:caret:0123456789abcdef", "not a number")
            .unwrap();
        let session = session_with_id("0123456789abcdef");
        assert_eq!(restore(&mut env.ws(), &session), 0);
    }

    #[test]
    fn test_storage_failure_is_silent() {
        let mut env = TestEnv::with_content("abc");
        env.session.set_unavailable(true);
        let session = session_with_id("0123456789abcdef");
        restore_offset(&mut env.surface, 3);

        assert_eq!(capture(&mut env.ws(), &session), 3);
        assert_eq!(restore(&mut env.ws(), &session), 0);
    }
}
