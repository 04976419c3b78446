// ABOUTME: Settings model and loader - active provider, credentials and
// ABOUTME: optional per-provider overrides, read from a JSON settings file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::llm::{
    ANTHROPIC_DEFAULT_HOST, ANTHROPIC_DEFAULT_MODEL, ANTHROPIC_DEFAULT_PATH, GEMINI_DEFAULT_HOST,
    GEMINI_DEFAULT_MODEL, GEMINI_DEFAULT_PATH, OLLAMA_DEFAULT_HOST, OLLAMA_DEFAULT_MODEL,
    OLLAMA_DEFAULT_PATH, OLLAMA_DEFAULT_PORT, OPENAI_DEFAULT_HOST, OPENAI_DEFAULT_MODEL,
    OPENAI_DEFAULT_PATH, Protocol, ProviderConfig, ProviderKind, XAI_DEFAULT_HOST,
    XAI_DEFAULT_MODEL, XAI_DEFAULT_PATH,
};

pub const DEFAULT_SYSTEM_ROLE: &str = "You are a helpful assistant. Provide very short answers with one or two lines. Always provide code blocks as raw text without surrounding them with backticks. Please answer without backticks";

pub const DEFAULT_BRAINSTORM_ROLE: &str = "You are one of several assistants taking part in a brainstorming discussion. You receive the discussion so far, each entry prefixed with the name of its speaker. Build on what the others said and add one short, new contribution. Do not repeat earlier points and do not prefix your answer with your name.";

pub const DEFAULT_BRAINSTORM_ROUNDS: usize = 2;

/// Optional overrides for one provider. Unset fields take the kind's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub url: Option<String>,
    pub model: Option<String>,
    pub protocol: Option<Protocol>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub system_role: Option<String>,
    pub color: Option<String>,
    pub color_code: Option<String>,
}

/// Root settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub active_provider: String,
    /// Role used by every provider without its own `system_role`.
    pub system_role: String,
    pub brainstorm_role: String,
    pub brainstorm_rounds: usize,
    /// Brainstorm participants by name; empty means every provider.
    pub brainstorm_participants: Vec<String>,
    pub keys: HashMap<String, String>,
    pub providers: HashMap<String, ProviderSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_provider: ProviderKind::OpenAI.as_str().to_string(),
            system_role: DEFAULT_SYSTEM_ROLE.to_string(),
            brainstorm_role: DEFAULT_BRAINSTORM_ROLE.to_string(),
            brainstorm_rounds: DEFAULT_BRAINSTORM_ROUNDS,
            brainstorm_participants: Vec::new(),
            keys: HashMap::new(),
            providers: HashMap::new(),
        }
    }
}

struct KindDefaults {
    protocol: Protocol,
    host: &'static str,
    port: u16,
    path: &'static str,
    model: &'static str,
    color: &'static str,
    color_code: &'static str,
}

fn kind_defaults(kind: ProviderKind) -> KindDefaults {
    match kind {
        ProviderKind::OpenAI => KindDefaults {
            protocol: Protocol::Https,
            host: OPENAI_DEFAULT_HOST,
            port: 443,
            path: OPENAI_DEFAULT_PATH,
            model: OPENAI_DEFAULT_MODEL,
            color: "region.cyanish",
            color_code: "#2AA198",
        },
        ProviderKind::Anthropic => KindDefaults {
            protocol: Protocol::Https,
            host: ANTHROPIC_DEFAULT_HOST,
            port: 443,
            path: ANTHROPIC_DEFAULT_PATH,
            model: ANTHROPIC_DEFAULT_MODEL,
            color: "region.orangish",
            color_code: "#CB4B16",
        },
        ProviderKind::Gemini => KindDefaults {
            protocol: Protocol::Https,
            host: GEMINI_DEFAULT_HOST,
            port: 443,
            path: GEMINI_DEFAULT_PATH,
            model: GEMINI_DEFAULT_MODEL,
            color: "region.bluish",
            color_code: "#268BD2",
        },
        ProviderKind::Ollama => KindDefaults {
            protocol: Protocol::Http,
            host: OLLAMA_DEFAULT_HOST,
            port: OLLAMA_DEFAULT_PORT,
            path: OLLAMA_DEFAULT_PATH,
            model: OLLAMA_DEFAULT_MODEL,
            color: "region.greenish",
            color_code: "#859900",
        },
        ProviderKind::Xai => KindDefaults {
            protocol: Protocol::Https,
            host: XAI_DEFAULT_HOST,
            port: 443,
            path: XAI_DEFAULT_PATH,
            model: XAI_DEFAULT_MODEL,
            color: "region.purplish",
            color_code: "#6C71C4",
        },
    }
}

/// Environment variables consulted, in order, when no key is configured.
pub fn key_env_vars(kind: ProviderKind) -> &'static [&'static str] {
    match kind {
        ProviderKind::OpenAI => &["OPENAI_API_KEY"],
        ProviderKind::Anthropic => &["ANTHROPIC_API_KEY"],
        ProviderKind::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        ProviderKind::Ollama => &[],
        ProviderKind::Xai => &["XAI_API_KEY"],
    }
}

impl Settings {
    /// Load settings from the default path, or defaults if the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// `<config dir>/confab/settings.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("confab")
            .join("settings.json")
    }

    /// Reject names of vendors confab does not know.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = self
            .providers
            .keys()
            .chain(self.keys.keys())
            .chain(self.brainstorm_participants.iter());
        for name in names {
            if name.parse::<ProviderKind>().is_err() {
                return Err(ConfigError::Invalid(format!("unknown provider '{}'", name)));
            }
        }
        Ok(())
    }

    /// The credential for `kind`, falling back to the environment.
    pub fn api_key(&self, kind: ProviderKind) -> String {
        self.api_key_with(kind, |var| std::env::var(var).ok())
    }

    /// Like `api_key`, with an injectable environment lookup.
    pub fn api_key_with(&self, kind: ProviderKind, env: impl Fn(&str) -> Option<String>) -> String {
        if let Some(key) = self.keys.get(kind.as_str()) {
            return key.clone();
        }
        key_env_vars(kind)
            .iter()
            .find_map(|var| env(var))
            .unwrap_or_default()
    }

    /// Resolve the full configuration for one provider.
    pub fn provider_config(&self, kind: ProviderKind) -> ProviderConfig {
        self.provider_config_with(kind, self.api_key(kind))
    }

    fn provider_config_with(&self, kind: ProviderKind, api_key: String) -> ProviderConfig {
        let defaults = kind_defaults(kind);
        let overrides = self
            .providers
            .get(kind.as_str())
            .cloned()
            .unwrap_or_default();

        let protocol = overrides.protocol.unwrap_or(defaults.protocol);
        let port = overrides.port.unwrap_or(if protocol == defaults.protocol {
            defaults.port
        } else {
            match protocol {
                Protocol::Http => 80,
                Protocol::Https => 443,
            }
        });

        ProviderConfig {
            name: kind.as_str().to_string(),
            api_key,
            model: overrides.model.unwrap_or_else(|| defaults.model.to_string()),
            protocol,
            host: overrides.host.unwrap_or_else(|| defaults.host.to_string()),
            port,
            url_path: overrides.url.unwrap_or_else(|| defaults.path.to_string()),
            system_role: overrides
                .system_role
                .unwrap_or_else(|| self.system_role.clone()),
            color: overrides.color.unwrap_or_else(|| defaults.color.to_string()),
            color_code: overrides
                .color_code
                .unwrap_or_else(|| defaults.color_code.to_string()),
        }
    }
}
