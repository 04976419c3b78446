// ABOUTME: Transcript of a brainstorm - speaker/content pairs in order.
// ABOUTME: Renders to the flattened "<speaker>: <content>" block sent to participants.

/// One contribution to the discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub content: String,
}

/// Append-only log for a single brainstorm run.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Start a transcript with the seed message.
    pub fn seeded(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        let mut transcript = Self::default();
        transcript.push(speaker, content);
        transcript
    }

    pub fn push(&mut self, speaker: impl Into<String>, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker: speaker.into(),
            content: content.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry as `"<speaker>: <content>\n\n"`, concatenated.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}\n\n", e.speaker, e.content))
            .collect()
    }
}
