use axum::extract::ws::Message;
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::models::ServiceError;

/// Sending half of a connection's outbound queue.
///
/// Sends enqueue without suspending; a dedicated writer task drains the queue
/// into the socket. A send fails once the writer task is gone, which means
/// the transport is closed.
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl ConnectionHandle {
    /// Create a handle together with the receiving end for the writer task.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a text frame for delivery.
    pub fn send_text(&self, text: String) -> Result<(), ServiceError> {
        self.tx
            .send(Message::Text(text))
            .map_err(|_| ServiceError::Transport("connection closed".to_string()))
    }

    /// Ask the writer task to close the socket.
    pub fn close(&self) {
        let _ = self.tx.send(Message::Close(None));
    }

    /// Whether two handles refer to the same connection.
    pub fn same_channel(&self, other: &ConnectionHandle) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

/// client_id -> live connection handle.
///
/// At most one entry per client id. Registering a second connection under an
/// id in use supersedes the prior entry; the caller is handed the superseded
/// handle so it can close it.
#[derive(Default)]
pub struct ConnectionRegistry {
    conns: RwLock<HashMap<String, ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            conns: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the entry for `client_id`. Returns the handle it
    /// superseded, if any.
    pub fn register(&self, client_id: String, handle: ConnectionHandle) -> Option<ConnectionHandle> {
        self.conns.write().insert(client_id, handle)
    }

    /// Remove the entry if present; no-op when absent.
    pub fn unregister(&self, client_id: &str) {
        self.conns.write().remove(client_id);
    }

    pub fn lookup(&self, client_id: &str) -> Option<ConnectionHandle> {
        self.conns.read().get(client_id).cloned()
    }

    /// Number of live connections.
    pub fn count(&self) -> usize {
        self.conns.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_reports_not_found_after_unregister() {
        let registry = ConnectionRegistry::new();
        let (handle, _rx) = ConnectionHandle::channel();

        registry.register("client-a".to_string(), handle);
        assert!(registry.lookup("client-a").is_some());

        registry.unregister("client-a");
        assert!(registry.lookup("client-a").is_none());
    }

    #[test]
    fn unregister_of_unknown_client_is_a_noop() {
        let registry = ConnectionRegistry::new();
        registry.unregister("never-registered");
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn register_supersedes_prior_entry() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = ConnectionHandle::channel();
        let (second, _rx2) = ConnectionHandle::channel();

        assert!(registry.register("client-a".to_string(), first.clone()).is_none());
        let superseded = registry
            .register("client-a".to_string(), second.clone())
            .expect("first handle should be returned");

        assert!(superseded.same_channel(&first));
        assert_eq!(registry.count(), 1);

        let live = registry.lookup("client-a").expect("entry must exist");
        assert!(live.same_channel(&second));
        assert!(!live.same_channel(&first));
    }

    #[test]
    fn send_text_fails_once_the_writer_side_is_gone() {
        let (handle, rx) = ConnectionHandle::channel();
        drop(rx);
        assert!(handle.send_text("hello".to_string()).is_err());
    }

    #[tokio::test]
    async fn close_queues_a_close_frame() {
        let (handle, mut rx) = ConnectionHandle::channel();
        handle.close();
        match rx.recv().await {
            Some(Message::Close(_)) => {}
            other => panic!("expected close frame, got {:?}", other),
        }
    }
}
