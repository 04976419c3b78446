// ABOUTME: Brainstorm orchestrator - drives participants through fixed rounds.
// ABOUTME: Turns are produced lazily as a stream so callers can render as they go.

use futures::Stream;

use super::Transcript;
use crate::error::LlmError;
use crate::llm::{Provider, Transport};

/// Speaker name of the seed entry.
const SEED_SPEAKER: &str = "user";

/// One participant's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: String,
    pub content: String,
}

/// Round-robin discussion among providers sharing one persona.
///
/// # Protocol
///
/// - `start()` gives every participant the brainstorm system role, which
///   resets their history when it differs from their current role.
/// - `run()` seeds a fresh transcript and, for each round, asks every
///   participant in order. Each participant receives the whole transcript so
///   far as a single user message, so vendors with different role
///   vocabularies take part on equal terms.
/// - The run ends after `rounds * participants.len()` turns. There is no
///   convergence detection.
#[derive(Debug, Clone)]
pub struct Brainstorm {
    system_role: String,
}

impl Brainstorm {
    pub fn new(system_role: impl Into<String>) -> Self {
        Self {
            system_role: system_role.into(),
        }
    }

    pub fn system_role(&self) -> &str {
        &self.system_role
    }

    /// Put every participant into the brainstorm persona.
    pub fn start(&self, participants: &mut [&mut Provider]) {
        for participant in participants.iter_mut() {
            participant.set_system_role(&self.system_role);
        }
    }

    /// Run the discussion, yielding each turn as soon as it is answered.
    ///
    /// Requests are strictly sequential. A failed turn is yielded as an error
    /// and ends the stream; turns already yielded stand.
    pub fn run<'a>(
        &'a self,
        transport: &'a dyn Transport,
        seed: String,
        rounds: usize,
        mut participants: Vec<&'a mut Provider>,
    ) -> impl Stream<Item = Result<Turn, LlmError>> + Send + 'a {
        async_stream::try_stream! {
            let mut transcript = Transcript::seeded(SEED_SPEAKER, seed);

            for round in 1..=rounds {
                for participant in participants.iter_mut() {
                    let prompt = transcript.render();
                    let content = participant.send_turn(transport, &prompt).await?;

                    tracing::debug!(
                        round,
                        speaker = participant.name(),
                        transcript_len = transcript.len(),
                        "brainstorm turn"
                    );

                    let turn = Turn {
                        speaker: participant.name().to_string(),
                        content,
                    };
                    transcript.push(turn.speaker.clone(), turn.content.clone());
                    yield turn;
                }
            }
        }
    }
}
