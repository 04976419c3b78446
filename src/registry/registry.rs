// ABOUTME: Implements ProviderRegistry - an insertion-ordered container of
// ABOUTME: providers with name lookup and an active selection.

use crate::config::Settings;
use crate::error::LlmError;
use crate::llm::{Provider, ProviderKind};

/// Providers keyed by name, in insertion order, with one marked active.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
    active: usize,
}

impl ProviderRegistry {
    /// Create a registry, failing if `active` names none of the providers.
    pub fn new(providers: Vec<Provider>, active: &str) -> Result<Self, LlmError> {
        let active = providers
            .iter()
            .position(|p| p.name() == active)
            .ok_or_else(|| LlmError::UnknownProvider(active.to_string()))?;
        Ok(Self { providers, active })
    }

    /// One provider per supported kind, configured from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, LlmError> {
        let providers = ProviderKind::ALL
            .into_iter()
            .map(|kind| Provider::new(kind, settings.provider_config(kind)))
            .collect();
        Self::new(providers, &settings.active_provider)
    }

    fn index_of(&self, name: &str) -> Result<usize, LlmError> {
        self.providers
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| LlmError::UnknownProvider(name.to_string()))
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Result<&Provider, LlmError> {
        let index = self.index_of(name)?;
        Ok(&self.providers[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Provider, LlmError> {
        let index = self.index_of(name)?;
        Ok(&mut self.providers[index])
    }

    pub fn active(&self) -> &Provider {
        &self.providers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Provider {
        &mut self.providers[self.active]
    }

    /// Select the active provider. On error the selection is unchanged.
    pub fn set_active(&mut self, name: &str) -> Result<(), LlmError> {
        self.active = self.index_of(name)?;
        Ok(())
    }

    /// All providers, in insertion order.
    pub fn all(&self) -> &[Provider] {
        &self.providers
    }

    pub fn all_mut(&mut self) -> &mut [Provider] {
        &mut self.providers
    }

    /// Provider names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Mutable handles to the named providers, in the order given.
    ///
    /// Fails on an unknown or repeated name.
    pub fn select_mut(&mut self, names: &[&str]) -> Result<Vec<&mut Provider>, LlmError> {
        let indices = names
            .iter()
            .map(|name| self.index_of(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut slots: Vec<Option<&mut Provider>> = self.providers.iter_mut().map(Some).collect();
        let mut selected = Vec::with_capacity(indices.len());
        for (name, index) in names.iter().zip(indices) {
            let provider = slots[index]
                .take()
                .ok_or_else(|| LlmError::DuplicateProvider((*name).to_string()))?;
            selected.push(provider);
        }

        Ok(selected)
    }
}
