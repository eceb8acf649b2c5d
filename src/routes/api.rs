use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handlers::{
    add_friend, analyze_command, chat, create_document, diagnostics, get_document, get_versions,
    health_check, list_documents, list_friends, login, ready_check, register, respond_friend,
    set_document_permission, speech_to_text, text_to_speech, update_content, upload_file,
};
use crate::routes::auth_middleware::auth_middleware;
use crate::state::AppState;

/// Create API routes
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/v1/diagnostics", get(diagnostics))
        .route("/documents", post(create_document).get(list_documents))
        .route("/documents/:document_id", get(get_document))
        .route("/documents/:document_id/content", put(update_content))
        .route("/documents/:document_id/versions", get(get_versions))
        .route(
            "/documents/:document_id/permissions",
            put(set_document_permission),
        )
        .route("/upload", post(upload_file))
        .route("/ai/chat", post(chat))
        .route("/ai/analyze-command", post(analyze_command))
        .route("/ai/speech-to-text", post(speech_to_text))
        .route("/ai/text-to-speech", post(text_to_speech))
        .route("/friends", get(list_friends))
        .route("/friends/:friend_id", post(add_friend).put(respond_friend))
        .route_layer(middleware::from_fn(auth_middleware)); // Applies to all routes added above

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/token", post(login))
        .route("/register", post(register))
        .merge(protected)
        .with_state(state)
}
