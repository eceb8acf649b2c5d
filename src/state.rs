use crate::websocket::connections::ConnectionRegistry;
use crate::websocket::sessions::SessionRegistry;

/// Shared state for the live collaboration subsystem.
///
/// Both registries are mutated from every connection's task; each guards its
/// own table so no lock is ever held across a suspension point.
pub struct AppState {
    pub connections: ConnectionRegistry,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            sessions: SessionRegistry::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
