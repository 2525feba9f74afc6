use super::{caret, Workspace};
use crate::document::DocumentState;
use crate::fragment::Fragment;
use crate::identity::DocumentId;
use crate::session::{Phase, SessionContext};
use crate::store::{write_best_effort, LAST_FRAGMENT_KEY};

/// Start a new, empty document with a fresh identity.
///
/// Unlike a save, this pushes a new address entry so the previous document
/// stays reachable through history.
pub fn run(ws: &mut Workspace<'_>) -> SessionContext {
    run_with_id(ws, DocumentId::generate())
}

pub fn run_with_id(ws: &mut Workspace<'_>, id: DocumentId) -> SessionContext {
    let blank = DocumentState::blank();
    ws.surface.render(&blank);

    // A blank document encodes to an empty token; the fragment is just ";<id>".
    let data = blank
        .encode(ws.config.compression_level)
        .unwrap_or_default();
    let fragment = Fragment::new(data, id.as_str()).build();

    ws.address.push(&fragment);
    write_best_effort(ws.durable, LAST_FRAGMENT_KEY, &fragment);
    tracing::debug!("started new document {}", id);

    let session = SessionContext {
        doc_id: Some(id),
        fragment,
        title: ws.config.default_title.clone(),
        phase: Phase::NewDocument,
    };

    caret::remember(ws, session.document_key(), 0);
    caret::restore(ws, &session);
    ws.surface.focus();
    session.with_phase(Phase::Idle)
}
