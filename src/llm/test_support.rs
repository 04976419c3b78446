// ABOUTME: Scripted in-process transport for unit tests.
// ABOUTME: Replays canned response bodies and records every request.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Endpoint, Headers, Transport};
use crate::error::LlmError;

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub headers: Headers,
    pub body: serde_json::Value,
}

/// Transport that answers from a queue of canned results.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response body.
    pub fn respond(self, body: serde_json::Value) -> Self {
        self.respond_raw(body.to_string().into_bytes())
    }

    /// Queue a raw response body.
    pub fn respond_raw(self, body: impl Into<Vec<u8>>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint: endpoint.clone(),
            headers: headers.clone(),
            body: body.clone(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(LlmError::Transport(message)),
            None => Err(LlmError::Transport("no scripted response left".to_string())),
        }
    }
}

/// OpenAI-shaped reply body.
pub fn openai_reply(text: &str) -> serde_json::Value {
    serde_json::json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
}

/// A provider of `kind` with default settings and a fixed test key.
pub fn provider(kind: super::ProviderKind) -> super::Provider {
    let mut settings = crate::config::Settings::default();
    settings.system_role = "be brief".to_string();
    settings
        .keys
        .insert(kind.as_str().to_string(), format!("test-{}", kind));
    super::Provider::new(kind, settings.provider_config(kind))
}
