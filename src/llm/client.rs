// ABOUTME: Defines the ChatProtocol trait - the per-vendor capability set -
// ABOUTME: and the Dialect sum type that dispatches over the five vendors.

use serde::de::DeserializeOwned;

use super::{
    AnthropicDialect, Conversation, Endpoint, GeminiDialect, Headers, HistorySeed, OllamaDialect,
    OpenAIDialect, ProviderConfig, ProviderKind, XaiDialect,
};
use crate::error::LlmError;

/// What every vendor dialect must know how to do.
///
/// Dialects are stateless: configuration and history are passed in, so the
/// same dialect value can serve any provider of its kind.
pub trait ChatProtocol {
    /// How the system role sits in the history.
    fn history_seed(&self) -> HistorySeed;

    /// Auth and version headers; `Content-Type` is added by the caller.
    fn build_headers(&self, config: &ProviderConfig) -> Headers;

    /// The JSON body for the current model, role and history.
    fn build_request_body(
        &self,
        config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError>;

    /// Pull the generated text out of the vendor's response envelope.
    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError>;

    /// Where the request is sent.
    fn endpoint(&self, config: &ProviderConfig) -> Endpoint {
        Endpoint {
            protocol: config.protocol,
            host: config.host.clone(),
            port: config.port,
            path: config.url_path.clone(),
        }
    }
}

/// Decode a response envelope, reporting the payload when it does not fit.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    response: &serde_json::Value,
) -> Result<T, LlmError> {
    T::deserialize(response).map_err(|e| LlmError::malformed(e.to_string(), response.to_string()))
}

/// One of the supported vendor dialects.
#[derive(Debug, Clone)]
pub enum Dialect {
    OpenAI(OpenAIDialect),
    Anthropic(AnthropicDialect),
    Gemini(GeminiDialect),
    Ollama(OllamaDialect),
    Xai(XaiDialect),
}

impl Dialect {
    /// The default dialect for a provider kind.
    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::OpenAI => Dialect::OpenAI(OpenAIDialect),
            ProviderKind::Anthropic => Dialect::Anthropic(AnthropicDialect::default()),
            ProviderKind::Gemini => Dialect::Gemini(GeminiDialect),
            ProviderKind::Ollama => Dialect::Ollama(OllamaDialect),
            ProviderKind::Xai => Dialect::Xai(XaiDialect::default()),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Dialect::OpenAI(_) => ProviderKind::OpenAI,
            Dialect::Anthropic(_) => ProviderKind::Anthropic,
            Dialect::Gemini(_) => ProviderKind::Gemini,
            Dialect::Ollama(_) => ProviderKind::Ollama,
            Dialect::Xai(_) => ProviderKind::Xai,
        }
    }

    fn protocol(&self) -> &dyn ChatProtocol {
        match self {
            Dialect::OpenAI(d) => d,
            Dialect::Anthropic(d) => d,
            Dialect::Gemini(d) => d,
            Dialect::Ollama(d) => d,
            Dialect::Xai(d) => d,
        }
    }
}

impl ChatProtocol for Dialect {
    fn history_seed(&self) -> HistorySeed {
        self.protocol().history_seed()
    }

    fn build_headers(&self, config: &ProviderConfig) -> Headers {
        self.protocol().build_headers(config)
    }

    fn build_request_body(
        &self,
        config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError> {
        self.protocol().build_request_body(config, conversation)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        self.protocol().extract_answer(response)
    }

    fn endpoint(&self, config: &ProviderConfig) -> Endpoint {
        self.protocol().endpoint(config)
    }
}
