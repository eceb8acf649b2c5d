use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One chat message in a conversation
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for chat completion
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Response carrying the model's reply
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
}

/// Request body for command analysis
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AnalyzeCommandRequest {
    pub text: String,
}

/// Request body for speech-to-text
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SpeechToTextRequest {
    pub audio_base64: String,
}

/// Response carrying the transcribed text
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SpeechToTextResponse {
    pub text: String,
    pub status: String,
}

/// Request body for text-to-speech
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TextToSpeechRequest {
    pub text: String,
}

/// Response carrying the synthesized audio
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TextToSpeechResponse {
    pub audio_base64: String,
    pub status: String,
}
