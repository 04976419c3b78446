// ABOUTME: xAI (Grok) dialect wrapping the OpenAI-compatible chat API.
// ABOUTME: Adds stream=false and a fixed temperature to the OpenAI request.

use super::client::ChatProtocol;
use super::openai::{OpenAIRequest, bearer_headers, extract_openai_answer};
use super::{Conversation, Headers, HistorySeed, ProviderConfig};
use crate::error::LlmError;

pub const XAI_DEFAULT_HOST: &str = "api.x.ai";
pub const XAI_DEFAULT_PATH: &str = "/v1/chat/completions";
pub const XAI_DEFAULT_MODEL: &str = "grok-2-latest";

/// Dialect for the xAI API.
#[derive(Debug, Clone, Copy, Default)]
pub struct XaiDialect {
    pub temperature: f64,
}

impl ChatProtocol for XaiDialect {
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
        let mut req = OpenAIRequest::new(&config.model, conversation.history());
        req.stream = Some(false);
        req.temperature = Some(self.temperature);
        Ok(serde_json::to_value(&req)?)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        extract_openai_answer(response)
    }
}
