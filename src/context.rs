// ABOUTME: ChatContext - the explicit context object a front end drives.
// ABOUTME: Owns the registry and transport; answers single turns and brainstorms.

use std::sync::Arc;

use futures::Stream;

use crate::brainstorm::{Brainstorm, Turn};
use crate::config::Settings;
use crate::error::{ConfabError, LlmError};
use crate::llm::{HttpTransport, Transport};
use crate::registry::ProviderRegistry;

/// A single-turn answer plus what a front end needs to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub provider: String,
    pub answer: String,
    /// Annotation shown next to the answer; the model name.
    pub label: String,
    pub color: String,
    pub color_code: String,
}

/// Everything needed to talk to the configured providers.
///
/// Built once, then handed to whatever drives confab. The presentation
/// layer only ever sees `Reply` values and brainstorm `Turn`s.
pub struct ChatContext {
    registry: ProviderRegistry,
    transport: Arc<dyn Transport>,
    brainstorm: Brainstorm,
    brainstorm_rounds: usize,
    brainstorm_participants: Vec<String>,
}

impl ChatContext {
    /// Build a context that talks HTTP.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfabError> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(settings, transport)?)
    }

    /// Build a context over any transport.
    pub fn with_transport(
        settings: &Settings,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, LlmError> {
        let registry = ProviderRegistry::from_settings(settings)?;
        Ok(Self {
            registry,
            transport,
            brainstorm: Brainstorm::new(settings.brainstorm_role.clone()),
            brainstorm_rounds: settings.brainstorm_rounds,
            brainstorm_participants: settings.brainstorm_participants.clone(),
        })
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.registry
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), LlmError> {
        self.registry.set_active(name)
    }

    /// Re-apply settings to the live providers.
    ///
    /// Keys and models are replaced. A system role that differs from the
    /// current one resets that provider's history.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<(), LlmError> {
        self.registry.set_active(&settings.active_provider)?;

        for provider in self.registry.all_mut() {
            let config = settings.provider_config(provider.kind());
            provider.set_api_key(config.api_key);
            provider.set_model(config.model);
            provider.set_system_role(&config.system_role);
        }

        self.brainstorm = Brainstorm::new(settings.brainstorm_role.clone());
        self.brainstorm_rounds = settings.brainstorm_rounds;
        self.brainstorm_participants = settings.brainstorm_participants.clone();
        Ok(())
    }

    /// Ask the active provider.
    pub async fn ask(&mut self, input: &str) -> Result<Reply, LlmError> {
        let name = self.registry.active().name().to_string();
        self.ask_with(&name, input).await
    }

    /// Ask a specific provider, continuing its conversation.
    pub async fn ask_with(&mut self, name: &str, input: &str) -> Result<Reply, LlmError> {
        if input.trim().is_empty() {
            return Err(LlmError::EmptyPrompt);
        }

        let transport = Arc::clone(&self.transport);
        let provider = self.registry.get_mut(name)?;
        let answer = provider.send_turn(transport.as_ref(), input).await?;

        let config = provider.config();
        Ok(Reply {
            provider: config.name.clone(),
            answer,
            label: config.model.clone(),
            color: config.color.clone(),
            color_code: config.color_code.clone(),
        })
    }

    /// Start a brainstorm on `seed`.
    ///
    /// `rounds` and `participants` fall back to the settings; with no
    /// participants configured every provider takes part. Participants are
    /// switched to the brainstorm persona before the first turn.
    pub fn brainstorm<'a>(
        &'a mut self,
        seed: &str,
        rounds: Option<usize>,
        participants: &[String],
    ) -> Result<impl Stream<Item = Result<Turn, LlmError>> + Send + use<'a>, LlmError> {
        let rounds = rounds.unwrap_or(self.brainstorm_rounds);
        let names: Vec<String> = if !participants.is_empty() {
            participants.to_vec()
        } else if !self.brainstorm_participants.is_empty() {
            self.brainstorm_participants.clone()
        } else {
            self.registry.names().into_iter().map(String::from).collect()
        };
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut selected = self.registry.select_mut(&names)?;
        self.brainstorm.start(&mut selected);

        tracing::debug!(rounds, participants = ?names, "starting brainstorm");
        Ok(self
            .brainstorm
            .run(self.transport.as_ref(), seed.to_string(), rounds, selected))
    }
}
