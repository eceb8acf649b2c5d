use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::models::{ChatMessage, ServiceError};

static AI_CLIENT: OnceCell<Arc<AiClient>> = OnceCell::const_new();

/// Client for the third-party language-model API. Stateless pass-through;
/// nothing about a conversation is retained here.
#[derive(Debug)]
pub struct AiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    /// Run a chat completion and return the assistant's reply text.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
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

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Internal("Malformed completion response".to_string()))
    }

    /// Analyze a natural-language command and return a structured
    /// description of it. Falls back to an "unknown" shape when the model
    /// reply is not valid JSON.
    pub async fn analyze_command(&self, text: &str) -> Result<serde_json::Value, ServiceError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: "You are a command analyzer. Identify the type of command and extract relevant parameters."
                    .to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ];

        let analysis = self.chat(&messages).await?;

        Ok(serde_json::from_str(&analysis).unwrap_or_else(|_| {
            serde_json::json!({
                "type": "unknown",
                "parameters": {},
                "original_text": text,
            })
        }))
    }
}

/// Initialize the global AiClient
pub fn init_ai_client(base_url: String, api_key: String, model: String) -> Result<(), &'static str> {
    let client = AiClient::new(base_url, api_key, model);
    AI_CLIENT
        .set(Arc::new(client))
        .map_err(|_| "AiClient already initialized")?;
    info!("AI client initialized");
    Ok(())
}

/// Get the global AiClient instance
pub fn get_ai_client() -> Option<Arc<AiClient>> {
    AI_CLIENT.get().cloned()
}
