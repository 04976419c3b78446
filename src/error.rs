// ABOUTME: Defines all error types for the confab library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under ConfabError.

/// Top-level error type for the confab library.
#[derive(Debug, thiserror::Error)]
pub enum ConfabError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from provider and orchestration operations.
///
/// Authentication, rate-limit and server failures are not told apart: the
/// HTTP status is never inspected, so a non-2xx reply shows up as a
/// `MalformedResponse` carrying whatever body the vendor sent.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response ({reason}): {payload}")]
    MalformedResponse { reason: String, payload: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider listed more than once: {0}")]
    DuplicateProvider(String),

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LlmError {
    /// Build a `MalformedResponse` from a reason and the raw body.
    pub fn malformed(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            payload: payload.into(),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors from loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}
