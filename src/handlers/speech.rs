use axum::{Extension, Json};
use base64::engine::general_purpose;
use base64::Engine as _;

use crate::clients::speech_client;
use crate::models::{
    ErrorResponse, ServiceError, SpeechToTextRequest, SpeechToTextResponse, TextToSpeechRequest,
    TextToSpeechResponse,
};

/// Transcribe base64 audio to text
#[utoipa::path(
    post,
    path = "/api/ai/speech-to-text",
    request_body = SpeechToTextRequest,
    responses(
        (status = 200, description = "Transcribed text", body = SpeechToTextResponse),
        (status = 400, description = "Invalid base64 audio", body = ErrorResponse),
        (status = 502, description = "Speech API failure", body = ErrorResponse)
    )
)]
pub async fn speech_to_text(
    Extension(_user_id): Extension<String>,
    Json(payload): Json<SpeechToTextRequest>,
) -> Result<Json<SpeechToTextResponse>, ServiceError> {
    let client = speech_client::get_speech_client()
        .ok_or_else(|| ServiceError::Internal("Speech client not configured".to_string()))?;

    let audio = general_purpose::STANDARD
        .decode(&payload.audio_base64)
        .map_err(|e| ServiceError::BadRequest(format!("Invalid base64 audio: {}", e)))?;

    let text = client.transcribe(&audio).await?;

    Ok(Json(SpeechToTextResponse {
        text,
        status: "success".to_string(),
    }))
}

/// Synthesize text into base64 audio
#[utoipa::path(
    post,
    path = "/api/ai/text-to-speech",
    request_body = TextToSpeechRequest,
    responses(
        (status = 200, description = "Synthesized audio", body = TextToSpeechResponse),
        (status = 502, description = "Speech API failure", body = ErrorResponse)
    )
)]
pub async fn text_to_speech(
    Extension(_user_id): Extension<String>,
    Json(payload): Json<TextToSpeechRequest>,
) -> Result<Json<TextToSpeechResponse>, ServiceError> {
    let client = speech_client::get_speech_client()
        .ok_or_else(|| ServiceError::Internal("Speech client not configured".to_string()))?;

    let audio = client.synthesize(&payload.text).await?;

    Ok(Json(TextToSpeechResponse {
        audio_base64: general_purpose::STANDARD.encode(audio),
        status: "success".to_string(),
    }))
}
