// ABOUTME: LLM module - provider abstraction over vendor chat APIs.
// ABOUTME: Defines types, conversation state, transport and the five dialects.

mod anthropic;
mod client;
mod conversation;
mod gemini;
mod ollama;
mod openai;
mod provider;
mod transport;
mod types;
mod xai;

pub use anthropic::*;
pub use client::*;
pub use conversation::*;
pub use gemini::*;
pub use ollama::*;
pub use openai::*;
pub use provider::*;
pub use transport::*;
pub use types::*;
pub use xai::*;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod types_test;

#[cfg(test)]
mod anthropic_test;
