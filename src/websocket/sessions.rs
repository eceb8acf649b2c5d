use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// document_id -> set of client ids currently in the live session.
///
/// Sessions are created implicitly by the first update naming an unseen
/// document id and are never destroyed; an emptied entry stays in the table.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, HashSet<String>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Idempotent membership add, creating the session when absent.
    pub fn join(&self, document_id: &str, client_id: &str) {
        self.sessions
            .write()
            .entry(document_id.to_string())
            .or_default()
            .insert(client_id.to_string());
    }

    /// Remove `client_id` from every session it belongs to.
    ///
    /// Scans the full table under the write lock, so the removal cannot
    /// interleave with a concurrent `join` or `members` enumeration.
    pub fn leave_all(&self, client_id: &str) {
        for members in self.sessions.write().values_mut() {
            members.remove(client_id);
        }
    }

    /// Current members of `document_id`; empty when the session is unknown.
    pub fn members(&self, document_id: &str) -> HashSet<String> {
        self.sessions
            .read()
            .get(document_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of sessions in the table, emptied ones included.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Total membership entries across all sessions.
    pub fn member_count(&self) -> usize {
        self.sessions.read().values().map(|m| m.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_is_idempotent() {
        let registry = SessionRegistry::new();
        registry.join("doc-1", "client-a");
        registry.join("doc-1", "client-a");

        let members = registry.members("doc-1");
        assert_eq!(members.len(), 1);
        assert!(members.contains("client-a"));
    }

    #[test]
    fn members_of_unknown_session_is_empty() {
        let registry = SessionRegistry::new();
        assert!(registry.members("never-seen").is_empty());
    }

    #[test]
    fn leave_all_removes_the_client_from_every_session() {
        let registry = SessionRegistry::new();
        registry.join("doc-1", "client-a");
        registry.join("doc-2", "client-a");
        registry.join("doc-3", "client-a");
        registry.join("doc-2", "client-b");

        registry.leave_all("client-a");

        assert!(!registry.members("doc-1").contains("client-a"));
        assert!(!registry.members("doc-2").contains("client-a"));
        assert!(!registry.members("doc-3").contains("client-a"));
        assert!(registry.members("doc-2").contains("client-b"));
    }

    #[test]
    fn emptied_sessions_stay_in_the_table() {
        let registry = SessionRegistry::new();
        registry.join("doc-1", "client-a");
        registry.leave_all("client-a");

        assert!(registry.members("doc-1").is_empty());
        assert_eq!(registry.session_count(), 1);
    }
}
