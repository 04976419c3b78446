// ABOUTME: Ollama native chat dialect for local LLM inference.
// ABOUTME: Seeds history with the role as an assistant message; no auth.

use serde::{Deserialize, Serialize};

use super::client::{ChatProtocol, decode_envelope};
use super::openai::OpenAIMessage;
use super::{Conversation, Headers, HistorySeed, ProviderConfig};
use crate::error::LlmError;

pub const OLLAMA_DEFAULT_HOST: &str = "localhost";
pub const OLLAMA_DEFAULT_PORT: u16 = 11434;
pub const OLLAMA_DEFAULT_PATH: &str = "/api/chat";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.2";

/// Ollama /api/chat request format.
#[derive(Debug, Serialize)]
pub struct OllamaRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub stream: bool,
}

/// Ollama /api/chat response format.
#[derive(Debug, Deserialize)]
pub struct OllamaResponse {
    pub message: OpenAIMessage,
}

/// Dialect for a local Ollama server.
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaDialect;

impl ChatProtocol for OllamaDialect {
    fn history_seed(&self) -> HistorySeed {
        HistorySeed::AssistantMessage
    }

    fn build_headers(&self, _config: &ProviderConfig) -> Headers {
        Headers::new()
    }

    fn build_request_body(
        &self,
        config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError> {
        let req = OllamaRequest {
            model: config.model.clone(),
            messages: conversation
                .history()
                .iter()
                .map(OpenAIMessage::from)
                .collect(),
            stream: false,
        };
        Ok(serde_json::to_value(&req)?)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        let resp: OllamaResponse = decode_envelope(response)?;
        Ok(resp.message.content)
    }
}
