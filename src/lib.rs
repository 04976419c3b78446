// ABOUTME: Root module for confab - one chat interface over several LLM vendors.
// ABOUTME: Re-exports all public types from submodules.

pub mod brainstorm;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod prelude;
pub mod registry;

pub use context::{ChatContext, Reply};
pub use error::ConfabError;
