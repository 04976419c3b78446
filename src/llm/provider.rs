// ABOUTME: Provider - one configured vendor connection owning its conversation.
// ABOUTME: send_turn appends the user turn, posts, extracts and records the answer.

use super::{
    ChatProtocol, Conversation, Dialect, Endpoint, Headers, Message, ProviderConfig, ProviderKind,
    Transport,
};
use crate::error::LlmError;

/// A configured provider together with its conversation state.
///
/// `send_turn` takes `&mut self`, so a provider can only have one request in
/// flight at a time.
#[derive(Debug, Clone)]
pub struct Provider {
    dialect: Dialect,
    config: ProviderConfig,
    conversation: Conversation,
}

impl Provider {
    /// Create a provider using the default dialect for `kind`.
    pub fn new(kind: ProviderKind, config: ProviderConfig) -> Self {
        Self::with_dialect(Dialect::for_kind(kind), config)
    }

    /// Create a provider with an explicitly tuned dialect.
    pub fn with_dialect(dialect: Dialect, config: ProviderConfig) -> Self {
        let conversation = Conversation::new(dialect.history_seed(), config.system_role.clone());
        Self {
            dialect,
            config,
            conversation,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn kind(&self) -> ProviderKind {
        self.dialect.kind()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn system_role(&self) -> &str {
        self.conversation.system_role()
    }

    pub fn history(&self) -> &[Message] {
        self.conversation.history()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.api_key = api_key.into();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.config.model = model.into();
    }

    /// Set the system role, resetting history if it changed.
    ///
    /// Returns `true` when the history was reset.
    pub fn set_system_role(&mut self, system_role: &str) -> bool {
        let reset = self.conversation.set_system_role(system_role);
        if reset {
            self.config.system_role = system_role.to_string();
            tracing::info!(provider = %self.config.name, "system role changed, history reset");
        }
        reset
    }

    pub fn reset_history(&mut self) {
        self.conversation.reset();
    }

    pub fn append_user_turn(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::user(text));
    }

    pub fn append_assistant_turn(&mut self, text: impl Into<String>) {
        self.conversation.push(Message::assistant(text));
    }

    /// Vendor-specific auth headers.
    pub fn build_headers(&self) -> Headers {
        self.dialect.build_headers(&self.config)
    }

    /// Headers actually sent: `Content-Type` overlaid by the vendor headers.
    pub fn request_headers(&self) -> Headers {
        let mut headers = Headers::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);
        headers.extend(self.build_headers());
        headers
    }

    pub fn build_request_body(&self) -> Result<serde_json::Value, LlmError> {
        self.dialect
            .build_request_body(&self.config, &self.conversation)
    }

    pub fn endpoint(&self) -> Endpoint {
        self.dialect.endpoint(&self.config)
    }

    pub fn extract_answer(&self, response: &serde_json::Value) -> Result<String, LlmError> {
        self.dialect.extract_answer(response)
    }

    /// Send one user turn and return the assistant's reply.
    ///
    /// The user turn stays in the history even if the call fails.
    pub async fn send_turn(
        &mut self,
        transport: &dyn Transport,
        text: &str,
    ) -> Result<String, LlmError> {
        self.append_user_turn(text);

        let body = self.build_request_body()?;
        let headers = self.request_headers();
        let endpoint = self.endpoint();

        tracing::debug!(
            provider = %self.config.name,
            model = %self.config.model,
            host = %endpoint.host,
            path = endpoint.redacted_path(),
            turns = self.conversation.history().len(),
            "sending turn"
        );

        let raw = transport.post(&endpoint, &headers, &body).await?;
        let response: serde_json::Value = serde_json::from_slice(&raw).map_err(|e| {
            LlmError::malformed(
                format!("invalid JSON: {}", e),
                String::from_utf8_lossy(&raw).into_owned(),
            )
        })?;

        let answer = self.extract_answer(&response)?;
        self.append_assistant_turn(answer.clone());
        Ok(answer)
    }
}
