// ABOUTME: Google Gemini generateContent dialect.
// ABOUTME: Role goes in system_instruction; model and key are encoded in the URL.

use serde::{Deserialize, Serialize};

use super::client::{ChatProtocol, decode_envelope};
use super::{Conversation, Endpoint, Headers, HistorySeed, Message, ProviderConfig, Role};
use crate::error::LlmError;

pub const GEMINI_DEFAULT_HOST: &str = "generativelanguage.googleapis.com";
pub const GEMINI_DEFAULT_PATH: &str = "/v1beta/models";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini API request format.
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub system_instruction: GeminiContent,
    pub contents: Vec<GeminiContent>,
}

/// Gemini content (message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Gemini content part. Non-text parts deserialize with empty text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Gemini response candidate.
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

fn convert_message_to_content(msg: &Message) -> GeminiContent {
    // Gemini only knows "user" and "model".
    let role = match msg.role {
        Role::Assistant => "model",
        Role::User | Role::System => "user",
    };

    GeminiContent {
        role: Some(role.to_string()),
        parts: vec![GeminiPart {
            text: msg.content.clone(),
        }],
    }
}

/// Dialect for the Gemini generateContent API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiDialect;

impl ChatProtocol for GeminiDialect {
    fn history_seed(&self) -> HistorySeed {
        HistorySeed::Empty
    }

    fn build_headers(&self, _config: &ProviderConfig) -> Headers {
        Headers::new()
    }

    fn build_request_body(
        &self,
        _config: &ProviderConfig,
        conversation: &Conversation,
    ) -> Result<serde_json::Value, LlmError> {
        let req = GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: conversation.system_role().to_string(),
                }],
            },
            contents: conversation
                .history()
                .iter()
                .map(convert_message_to_content)
                .collect(),
        };
        Ok(serde_json::to_value(&req)?)
    }

    fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        let resp: GeminiResponse = decode_envelope(response)?;
        let candidate = resp.candidates.into_iter().next().ok_or_else(|| {
            LlmError::malformed("missing candidates[0]", response.to_string())
        })?;

        if candidate.content.parts.is_empty() {
            return Err(LlmError::malformed(
                "missing candidates[0].content.parts",
                response.to_string(),
            ));
        }

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        Ok(text.trim_end_matches('\n').to_string())
    }

    fn endpoint(&self, config: &ProviderConfig) -> Endpoint {
        Endpoint {
            protocol: config.protocol,
            host: config.host.clone(),
            port: config.port,
            path: format!(
                "{}/{}:generateContent?key={}",
                config.url_path.trim_end_matches('/'),
                urlencoding::encode(&config.model),
                urlencoding::encode(&config.api_key)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Protocol;
    use serde_json::json;

    fn config() -> ProviderConfig {
        ProviderConfig {
            name: "gemini".to_string(),
            api_key: "g-key".to_string(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            protocol: Protocol::Https,
            host: GEMINI_DEFAULT_HOST.to_string(),
            port: 443,
            url_path: GEMINI_DEFAULT_PATH.to_string(),
            system_role: "Be helpful".to_string(),
            color: "region.bluish".to_string(),
            color_code: "#268BD2".to_string(),
        }
    }

    #[test]
    fn test_baseline_request() {
        let conv = Conversation::new(GeminiDialect.history_seed(), "Be helpful");
        let body = GeminiDialect.build_request_body(&config(), &conv).unwrap();

        assert_eq!(
            body,
            json!({
                "system_instruction": {"parts": [{"text": "Be helpful"}]},
                "contents": []
            })
        );
    }

    #[test]
    fn test_assistant_turns_use_model_role() {
        let mut conv = Conversation::new(GeminiDialect.history_seed(), "Be helpful");
        conv.push(Message::user("Hello"));
        conv.push(Message::assistant("Hi"));

        let body = GeminiDialect.build_request_body(&config(), &conv).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "Hi");
    }

    #[test]
    fn test_endpoint_carries_model_and_key() {
        let endpoint = GeminiDialect.endpoint(&config());
        assert_eq!(
            endpoint.path,
            "/v1beta/models/gemini-1.5-flash:generateContent?key=g-key"
        );
        assert_eq!(endpoint.redacted_path(), "/v1beta/models/gemini-1.5-flash:generateContent");
    }

    #[test]
    fn test_endpoint_encodes_key() {
        let mut cfg = config();
        cfg.api_key = "a&b".to_string();
        assert!(GeminiDialect.endpoint(&cfg).path.ends_with("?key=a%26b"));
    }

    #[test]
    fn test_no_auth_headers() {
        assert!(GeminiDialect.build_headers(&config()).is_empty());
    }

    #[test]
    fn test_extract_strips_trailing_newline() {
        let response = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "hi there\n"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(GeminiDialect.extract_answer(&response).unwrap(), "hi there");
    }

    #[test]
    fn test_extract_no_candidates() {
        let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(
            GeminiDialect.extract_answer(&response),
            Err(LlmError::MalformedResponse { .. })
        ));
    }
}
