use tracing::{debug, info};

use crate::models::UpdateMessage;
use crate::state::AppState;

/// Handle a document update received from `sender_id`.
///
/// The sender joins the document's session on its first update, then the raw
/// message text is fanned out to every other current member with a live
/// connection. Members without one are skipped; they are reconciled only when
/// their own connection closes. A failed send is swallowed and the sender
/// gets no acknowledgment either way.
pub fn handle_update_message(update: &UpdateMessage, raw: &str, sender_id: &str, state: &AppState) {
    info!(
        "Update message received for document {} from client {}",
        update.document_id, sender_id
    );

    // Implicit join, idempotent for senders that are already members.
    state.sessions.join(&update.document_id, sender_id);

    let mut delivered: u32 = 0;
    let mut stale: u32 = 0;
    for peer in state.sessions.members(&update.document_id) {
        if peer == sender_id {
            continue;
        }
        match state.connections.lookup(&peer) {
            Some(handle) => match handle.send_text(raw.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    debug!("Delivery to peer {} failed: {}", peer, e);
                }
            },
            None => {
                stale += 1;
            }
        }
    }

    debug!(
        "Relayed update for document {} to {} peer(s) ({} stale)",
        update.document_id, delivered, stale
    );
}
