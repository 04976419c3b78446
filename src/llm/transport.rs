// ABOUTME: Transport abstraction for provider calls - a single JSON POST.
// ABOUTME: HttpTransport performs it with reqwest and returns the raw body.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::Protocol;
use crate::error::LlmError;

/// Request headers, ordered for stable logs and tests.
pub type Headers = BTreeMap<String, String>;

/// Where a provider's request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    /// Path, optionally with a query string.
    pub path: String,
}

impl Endpoint {
    /// Full URL for the request.
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol.scheme(),
            self.host,
            self.port,
            self.path
        )
    }

    /// Path without the query string, safe to log.
    pub fn redacted_path(&self) -> &str {
        self.path.split('?').next().unwrap_or_default()
    }
}

/// Trait for provider transports.
///
/// Implementations return the response body whatever the status code;
/// only connection and IO failures are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, LlmError>;
}

/// HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("confab/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, LlmError> {
        let mut request = self.http.post(endpoint.url()).json(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                host = %endpoint.host,
                path = endpoint.redacted_path(),
                status = status.as_u16(),
                "provider returned non-success status"
            );
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
