// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use confab::prelude::*;` to get started quickly.

pub use crate::brainstorm::{Brainstorm, Transcript, TranscriptEntry, Turn};
pub use crate::config::{ProviderSettings, Settings};
pub use crate::context::{ChatContext, Reply};
pub use crate::error::{ConfabError, ConfigError, LlmError};
pub use crate::llm::{
    ChatProtocol, Conversation, Dialect, Endpoint, Headers, HistorySeed, HttpTransport, Message,
    Protocol, Provider, ProviderConfig, ProviderKind, Role, Transport,
};
pub use crate::registry::ProviderRegistry;
