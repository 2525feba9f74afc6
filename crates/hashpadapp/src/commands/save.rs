use super::{caret, Workspace};
use crate::caret::try_capture_offset;
use crate::fragment::Fragment;
use crate::session::{Phase, SessionContext};
use crate::store::{write_best_effort, LAST_FRAGMENT_KEY};

/// Build the fragment the surface would publish under `session`'s identity.
pub fn fragment_for_surface(ws: &Workspace<'_>, session: &SessionContext) -> crate::error::Result<String> {
    let state = ws.surface.state();
    let data = state.encode(ws.config.compression_level)?;
    let docid = session.doc_id.as_ref().map(|id| id.as_str()).unwrap_or_default();
    Ok(Fragment::new(data, docid).build())
}

/// Encode the surface and publish it in place.
///
/// The address entry is replaced (no new history entry) only when the fragment
/// changed. Durable storage is updated best-effort. The identity carried by
/// `session` is kept as is, so a document's identity survives every save.
pub fn run(ws: &mut Workspace<'_>, session: SessionContext) -> SessionContext {
    // The caret key may change below (documents without identity are keyed by
    // fragment), so take the live offset before publishing.
    let offset = try_capture_offset(&*ws.surface)
        .ok()
        .or_else(|| caret::recall(ws, session.document_key()));

    let fragment = match fragment_for_surface(ws, &session) {
        Ok(fragment) => fragment,
        Err(e) => {
            tracing::warn!("could not encode document, keeping previous address: {}", e);
            return session.with_phase(Phase::Idle);
        }
    };

    if ws.address.fragment() != fragment {
        ws.address.replace(&fragment);
        tracing::debug!("published fragment ({} chars)", fragment.len());
    }
    write_best_effort(ws.durable, LAST_FRAGMENT_KEY, &fragment);

    let session = SessionContext {
        fragment,
        title: ws.current_title(),
        phase: Phase::Idle,
        ..session
    };

    if let Some(offset) = offset {
        caret::remember(ws, session.document_key(), offset);
    }
    ws.surface.focus();
    caret::restore(ws, &session);
    session
}
