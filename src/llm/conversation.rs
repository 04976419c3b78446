// ABOUTME: Per-provider conversation state - the active system role and
// ABOUTME: the running message history, seeded according to the dialect.

use super::Message;

/// How a dialect carries the system role inside the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySeed {
    /// History starts empty; the role travels in a separate request field.
    Empty,
    /// History starts with `{role: system, content: <role>}`.
    SystemMessage,
    /// History starts with `{role: assistant, content: <role>}`.
    AssistantMessage,
}

impl HistorySeed {
    /// The baseline history for a given system role.
    pub fn baseline(&self, system_role: &str) -> Vec<Message> {
        match self {
            HistorySeed::Empty => Vec::new(),
            HistorySeed::SystemMessage => vec![Message::system(system_role)],
            HistorySeed::AssistantMessage => vec![Message::assistant(system_role)],
        }
    }
}

/// The system role plus an append-only history.
///
/// Changing the role to a different value throws the accumulated turns away
/// and reseeds the history. History is otherwise never trimmed.
#[derive(Debug, Clone)]
pub struct Conversation {
    seed: HistorySeed,
    system_role: String,
    history: Vec<Message>,
}

impl Conversation {
    pub fn new(seed: HistorySeed, system_role: impl Into<String>) -> Self {
        let system_role = system_role.into();
        Self {
            seed,
            history: seed.baseline(&system_role),
            system_role,
        }
    }

    pub fn system_role(&self) -> &str {
        &self.system_role
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Replace the system role. Returns `true` if the history was reset.
    pub fn set_system_role(&mut self, system_role: &str) -> bool {
        if self.system_role == system_role {
            return false;
        }
        self.system_role = system_role.to_string();
        self.reset();
        true
    }

    /// Drop every turn and reseed from the current system role.
    pub fn reset(&mut self) {
        self.history = self.seed.baseline(&self.system_role);
    }

    pub fn push(&mut self, message: Message) {
        self.history.push(message);
    }
}
