pub mod ai_client;
pub mod speech_client;
