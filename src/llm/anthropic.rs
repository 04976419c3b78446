// ABOUTME: Anthropic Messages API dialect.
// ABOUTME: System role is a top-level field; auth is x-api-key plus a version header.

use serde::{Deserialize, Serialize};

use super::client::{ChatProtocol, decode_envelope};
use super::{Conversation, Headers, HistorySeed, Message, ProviderConfig};
use crate::error::LlmError;

pub const ANTHROPIC_DEFAULT_HOST: &str = "api.anthropic.com";
pub const ANTHROPIC_DEFAULT_PATH: &str = "/v1/messages";
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic API request format.
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    pub system: String,
}

/// Anthropic message format.
#[derive(Debug, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for AnthropicMessage {
    fn from(msg: &Message) -> Self {
        AnthropicMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

/// Anthropic content block. Only text is read back.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContent {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Anthropic API response format.
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    pub content: Vec<AnthropicContent>,
}

/// Anthropic API error response.
#[derive(Debug, Deserialize)]
pub struct AnthropicError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Dialect for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicDialect {
    pub max_tokens: u32,
    pub version: String,
}

impl Default for AnthropicDialect {
    fn default() -> Self {
        Self {
            max_tokens: ANTHROPIC_DEFAULT_MAX_TOKENS,
            version: ANTHROPIC_VERSION.to_string(),
        }
    }
}

impl ChatProtocol for AnthropicDialect {
    fn history_seed(&self) -> HistorySeed {
        HistorySeed::Empty
    }

    fn build_headers(&self, config: &ProviderConfig) -> Headers {
        Headers::from([
            ("x-api-key".to_string(), config.api_key.clone()),
            ("anthropic-version".to_string(), self.version.clone()),
        ])
    }

    fn build_request_body(
        &self,
        config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError> {
        let req = AnthropicRequest {
            model: config.model.clone(),
            messages: conversation
                .history()
                .iter()
                .map(AnthropicMessage::from)
                .collect(),
            max_tokens: self.max_tokens,
            system: conversation.system_role().to_string(),
        };
        Ok(serde_json::to_value(&req)?)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        if let Ok(error) = serde_json::from_value::<AnthropicError>(response.clone()) {
            return Err(LlmError::malformed(
                format!("{}: {}", error.error.error_type, error.error.message),
                response.to_string(),
            ));
        }

        let resp: AnthropicResponse = decode_envelope(response)?;
        resp.content
            .into_iter()
            .find_map(|block| match block {
                AnthropicContent::Text { text } => Some(text),
                AnthropicContent::Other => None,
            })
            .ok_or_else(|| LlmError::malformed("missing content[0].text", response.to_string()))
    }
}
