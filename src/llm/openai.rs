// ABOUTME: OpenAI chat-completions dialect.
// ABOUTME: System role is the first history message; auth is a bearer token.

use serde::{Deserialize, Serialize};

use super::client::{ChatProtocol, decode_envelope};
use super::{Conversation, Headers, HistorySeed, Message, ProviderConfig};
use crate::error::LlmError;

pub const OPENAI_DEFAULT_HOST: &str = "api.openai.com";
pub const OPENAI_DEFAULT_PATH: &str = "/v1/chat/completions";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI API request format.
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl OpenAIRequest {
    pub fn new(model: impl Into<String>, history: &[Message]) -> Self {
        Self {
            model: model.into(),
            messages: history.iter().map(OpenAIMessage::from).collect(),
            stream: None,
            temperature: None,
        }
    }
}

/// OpenAI message format, also spoken by Ollama and xAI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for OpenAIMessage {
    fn from(msg: &Message) -> Self {
        OpenAIMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI response choice.
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}

/// OpenAI response message.
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    pub content: Option<String>,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: String,
}

/// Answer text from an OpenAI-shaped envelope, shared with xAI.
pub(crate) fn extract_openai_answer(response: &serde_json::Value) -> Result<String, LlmError> {
    if let Ok(error) = serde_json::from_value::<OpenAIError>(response.clone()) {
        return Err(LlmError::malformed(
            format!("error envelope: {}", error.error.message),
            response.to_string(),
        ));
    }

    let resp: OpenAIResponse = decode_envelope(response)?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::malformed("missing choices[0].message.content", response.to_string()))
}

pub(crate) fn bearer_headers(api_key: &str) -> Headers {
    Headers::from([("Authorization".to_string(), format!("Bearer {}", api_key))])
}

/// Dialect for the OpenAI chat-completions API.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIDialect;

impl ChatProtocol for OpenAIDialect {
    fn history_seed(&self) -> HistorySeed {
        HistorySeed::SystemMessage
    }

    fn build_headers(&self, config: &ProviderConfig) -> Headers {
        bearer_headers(&config.api_key)
    }

    fn build_request_body(
        &self,
        config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError> {
        let req = OpenAIRequest::new(&config.model, conversation.history());
        Ok(serde_json::to_value(&req)?)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        extract_openai_answer(response)
    }
}
