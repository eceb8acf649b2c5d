use axum::{Extension, Json};
use tracing::info;

use crate::clients::ai_client;
use crate::models::{AnalyzeCommandRequest, ChatRequest, ChatResponse, ErrorResponse, ServiceError};

/// Run a chat completion against the configured language-model API
#[utoipa::path(
    post,
    path = "/api/ai/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply", body = ChatResponse),
        (status = 502, description = "Language-model API failure", body = ErrorResponse)
    )
)]
pub async fn chat(
    Extension(user_id): Extension<String>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServiceError> {
    let client = ai_client::get_ai_client()
        .ok_or_else(|| ServiceError::Internal("AI client not configured".to_string()))?;

    info!(
        "Chat completion requested by user {} ({} messages)",
        user_id,
        payload.messages.len()
    );

    let response = client.chat(&payload.messages).await?;

    Ok(Json(ChatResponse {
        response,
        status: "success".to_string(),
    }))
}

/// Analyze a natural-language command into a structured description
#[utoipa::path(
    post,
    path = "/api/ai/analyze-command",
    request_body = AnalyzeCommandRequest,
    responses(
        (status = 200, description = "Structured command description"),
        (status = 502, description = "Language-model API failure", body = ErrorResponse)
    )
)]
pub async fn analyze_command(
    Extension(_user_id): Extension<String>,
    Json(payload): Json<AnalyzeCommandRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let client = ai_client::get_ai_client()
        .ok_or_else(|| ServiceError::Internal("AI client not configured".to_string()))?;

    let command_info = client.analyze_command(&payload.text).await?;
    Ok(Json(command_info))
}
