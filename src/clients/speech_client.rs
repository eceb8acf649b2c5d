use base64::engine::general_purpose;
use base64::Engine as _;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::models::ServiceError;

static SPEECH_CLIENT: OnceCell<Arc<SpeechClient>> = OnceCell::const_new();

/// Client for the third-party speech-to-text / text-to-speech API.
#[derive(Debug)]
pub struct SpeechClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SpeechClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Transcribe audio to text.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, ServiceError> {
        let url = format!("{}/speech-to-text", self.base_url);
        let body = serde_json::json!({
            "audio_base64": general_purpose::STANDARD.encode(audio),
        });

        let response: serde_json::Value = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Internal("Malformed transcription response".to_string()))
    }

    /// Synthesize text into audio bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ServiceError> {
        let url = format!("{}/text-to-speech", self.base_url);
        let body = serde_json::json!({ "text": text });

        let response: serde_json::Value = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let audio_base64 = response["audio_base64"]
            .as_str()
            .ok_or_else(|| ServiceError::Internal("Malformed synthesis response".to_string()))?;

        general_purpose::STANDARD
            .decode(audio_base64)
            .map_err(|e| ServiceError::Internal(format!("Invalid audio in synthesis response: {}", e)))
    }
}

/// Initialize the global SpeechClient
pub fn init_speech_client(base_url: String, api_key: String) -> Result<(), &'static str> {
    let client = SpeechClient::new(base_url, api_key);
    SPEECH_CLIENT
        .set(Arc::new(client))
        .map_err(|_| "SpeechClient already initialized")?;
    info!("Speech client initialized");
    Ok(())
}

/// Get the global SpeechClient instance
pub fn get_speech_client() -> Option<Arc<SpeechClient>> {
    SPEECH_CLIENT.get().cloned()
}
